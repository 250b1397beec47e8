use trackdo_core::db::open_db_in_memory;
use trackdo_core::{
    FileSlotStorage, MemorySlotStorage, SnapshotStorage, SqliteSlotStorage, StorageError,
};

fn assert_replaces_whole_value(storage: &dyn SnapshotStorage) {
    assert!(storage.read_slot("tasks").unwrap().is_none());

    storage.write_slot("tasks", b"[1,2,3]").unwrap();
    assert_eq!(storage.read_slot("tasks").unwrap().unwrap(), b"[1,2,3]");

    storage.write_slot("tasks", b"[]").unwrap();
    assert_eq!(storage.read_slot("tasks").unwrap().unwrap(), b"[]");

    storage.write_slot("other", b"x").unwrap();
    assert_eq!(storage.read_slot("tasks").unwrap().unwrap(), b"[]");
}

fn assert_rejects_bad_keys(storage: &dyn SnapshotStorage) {
    let err = storage.write_slot("../escape", b"x").unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey(_)));
    let err = storage.read_slot("").unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey(_)));
}

#[test]
fn sqlite_slots_replace_whole_value() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteSlotStorage::new(&conn);
    assert_replaces_whole_value(&storage);
    assert_rejects_bad_keys(&storage);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn file_slots_replace_whole_value() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileSlotStorage::new(dir.path()).unwrap();
    assert_replaces_whole_value(&storage);
    assert_rejects_bad_keys(&storage);
}

#[test]
fn file_slots_leave_no_temp_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileSlotStorage::new(dir.path()).unwrap();
    storage.write_slot("tasks", b"[]").unwrap();
    storage.write_slot("tasks", b"[1]").unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["tasks.json".to_string()]);
}

#[test]
fn file_slots_create_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let storage = FileSlotStorage::new(&nested).unwrap();
    assert!(nested.is_dir());
    assert_eq!(storage.slot_path("tasks").unwrap(), nested.join("tasks.json"));
}

#[test]
fn memory_slots_replace_whole_value() {
    let storage = MemorySlotStorage::new();
    assert_replaces_whole_value(&storage);
    assert_rejects_bad_keys(&storage);
    assert_eq!(storage.write_count(), 3);
}

#[test]
fn memory_slots_failing_write_keeps_previous_value() {
    let storage = MemorySlotStorage::new();
    storage.write_slot("tasks", b"[1]").unwrap();

    storage.set_fail_writes(true);
    let err = storage.write_slot("tasks", b"[2]").unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));

    assert_eq!(storage.read_slot("tasks").unwrap().unwrap(), b"[1]");
    assert_eq!(storage.write_count(), 1);
}
