use trackdo_core::{Task, TaskValidationError};
use uuid::Uuid;

#[test]
fn task_new_sets_defaults() {
    let task = Task::new("Buy milk", "Two litres, semi-skimmed").unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "Two litres, semi-skimmed");
    assert!(!task.is_completed);
}

#[test]
fn task_new_generates_distinct_ids() {
    let first = Task::new("a", "b").unwrap();
    let second = Task::new("a", "b").unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn task_rejects_blank_fields_and_nil_id() {
    assert_eq!(
        Task::new(" ", "x").unwrap_err(),
        TaskValidationError::EmptyTitle
    );
    assert_eq!(
        Task::new("x", "").unwrap_err(),
        TaskValidationError::EmptyDescription
    );
    assert_eq!(
        Task::with_id(Uuid::nil(), "x", "y").unwrap_err(),
        TaskValidationError::NilId
    );
}

#[test]
fn task_serialization_uses_snapshot_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let task = Task::with_id(id, "Call dentist", "Before Friday").unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "Call dentist");
    assert_eq!(json["description"], "Before Friday");
    assert_eq!(json["isCompleted"], false);
    assert!(json.get("is_completed").is_none());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn task_decodes_snapshot_written_by_mobile_app() {
    let raw = r#"{"id":"11111111-2222-4333-8444-555555555555","title":"Gym","description":"Leg day","isCompleted":true}"#;
    let task: Task = serde_json::from_str(raw).unwrap();
    assert_eq!(task.title, "Gym");
    assert!(task.is_completed);
}

#[test]
fn task_decodes_snapshot_written_by_ios_app() {
    let raw = r#"[{"id":"11111111-2222-4333-8444-555555555555","title":"Gym","description":"Leg day","IsCompleted":true},{"id":"66666666-7777-4888-9999-aaaaaaaaaaaa","title":"Read","description":"Ch. 3","IsCompleted":false}]"#;
    let tasks: Vec<Task> = serde_json::from_str(raw).unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks[0].is_completed);
    assert!(!tasks[1].is_completed);

    let rewritten = serde_json::to_string(&tasks[0]).unwrap();
    assert!(rewritten.contains("\"isCompleted\":true"));
    assert!(!rewritten.contains("IsCompleted"));
}
