//! Task store service.
//!
//! # Responsibility
//! - Own the ordered task sequence shown by the host list view.
//! - Apply create/delete/load use-cases and persist snapshots per policy.
//!
//! # Invariants
//! - Insertion order is display order.
//! - Task ids are unique within the sequence; records are never edited in place.
//! - Rejected input never mutates the sequence and never writes a snapshot.
//! - Deleting an unknown id is a no-op and never writes a snapshot.
//! - A failed write leaves the store dirty and the stored snapshot intact.
//! - A failed read leaves the in-memory sequence untouched; a store is never
//!   opened over a snapshot it could not read.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskSnapshotRepository};
use crate::storage::SnapshotStorage;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// When mutations reach durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistPolicy {
    /// Every successful mutation flushes before returning.
    #[default]
    WriteThrough,
    /// Mutations only mark the store dirty; callers flush explicitly.
    Deferred,
}

/// Service error for task store use-cases.
#[derive(Debug)]
pub enum TaskStoreError {
    /// Title or description blank after trimming.
    EmptyInput(TaskValidationError),
    /// Snapshot slot could not be read.
    Load(RepoError),
    /// Snapshot could not be encoded or written.
    Persist(RepoError),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput(err) => write!(f, "empty input: {err}"),
            Self::Load(err) => write!(f, "load failed: {err}"),
            Self::Persist(err) => write!(f, "persist failed: {err}"),
        }
    }
}

impl Error for TaskStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyInput(err) => Some(err),
            Self::Load(err) | Self::Persist(err) => Some(err),
        }
    }
}

impl From<RepoError> for TaskStoreError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

/// Aggregate root for the task list.
pub struct TaskStore<S: SnapshotStorage> {
    repo: TaskSnapshotRepository<S>,
    tasks: Vec<Task>,
    policy: PersistPolicy,
    dirty: bool,
}

impl<S: SnapshotStorage> TaskStore<S> {
    /// Creates an empty store; call `load_all` to restore saved state.
    pub fn new(repo: TaskSnapshotRepository<S>) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
            policy: PersistPolicy::default(),
            dirty: false,
        }
    }

    /// Creates a write-through store over `storage` and loads the snapshot.
    ///
    /// # Errors
    /// - Returns `Load` when the slot cannot be read. No store is handed out,
    ///   so nothing can overwrite the unread snapshot.
    pub fn open(storage: S) -> Result<Self, TaskStoreError> {
        let mut store = Self::new(TaskSnapshotRepository::new(storage));
        store.load_all()?;
        Ok(store)
    }

    pub fn with_policy(mut self, policy: PersistPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> PersistPolicy {
        self.policy
    }

    pub fn repo(&self) -> &TaskSnapshotRepository<S> {
        &self.repo
    }

    /// Tasks in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether in-memory state has changes not yet in storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Appends a new task built from user input.
    ///
    /// # Contract
    /// - Blank `title` or `description` returns `EmptyInput` with no side effects.
    /// - The new task gets a fresh id and `is_completed = false`.
    /// - Under `WriteThrough` the snapshot is written before returning; a write
    ///   failure is logged and leaves the store dirty, the task stays appended.
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Task, TaskStoreError> {
        let task = Task::new(title, description).map_err(|err| {
            info!("event=task_add module=service status=rejected reason={err}");
            TaskStoreError::EmptyInput(err)
        })?;

        self.tasks.push(task.clone());
        self.mark_changed("task_add");
        info!(
            "event=task_add module=service status=ok task_id={} count={}",
            task.id,
            self.tasks.len()
        );
        Ok(task)
    }

    /// Removes the task with `id`.
    ///
    /// Returns `true` when a task was removed. An unknown id is treated as
    /// already removed: returns `false` and writes nothing.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            info!("event=task_delete module=service status=noop task_id={id}");
            return false;
        };

        self.tasks.remove(index);
        self.mark_changed("task_delete");
        info!(
            "event=task_delete module=service status=ok task_id={} count={}",
            id,
            self.tasks.len()
        );
        true
    }

    /// Replaces the in-memory sequence with the stored snapshot.
    ///
    /// Missing or malformed snapshots load as empty. Pending unflushed
    /// changes are discarded.
    ///
    /// # Errors
    /// - Returns `Load` when the slot cannot be read; the in-memory sequence
    ///   and dirty flag are left as they were.
    pub fn load_all(&mut self) -> Result<&[Task], TaskStoreError> {
        self.tasks = self.repo.load_all().map_err(TaskStoreError::Load)?;
        self.dirty = false;
        Ok(&self.tasks)
    }

    /// Writes the current sequence to storage.
    ///
    /// # Errors
    /// - Returns `Persist` when encoding or the storage write fails; the
    ///   store stays dirty and the previous snapshot is untouched.
    pub fn flush(&mut self) -> Result<(), TaskStoreError> {
        self.repo.persist(&self.tasks)?;
        self.dirty = false;
        Ok(())
    }

    fn mark_changed(&mut self, event: &'static str) {
        self.dirty = true;
        if self.policy != PersistPolicy::WriteThrough {
            return;
        }
        if let Err(err) = self.flush() {
            warn!(
                "event={} module=service status=persist_failed slot={} error={}",
                event,
                self.repo.slot_key(),
                err
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PersistPolicy, TaskStore, TaskStoreError};
    use crate::model::task::TaskValidationError;
    use crate::storage::MemorySlotStorage;

    #[test]
    fn blank_fields_are_rejected_without_write() {
        let storage = MemorySlotStorage::new();
        let mut store = TaskStore::open(&storage).expect("open");

        for (title, description) in [("", "x"), ("x", ""), ("", ""), ("   ", "x"), ("x", "\n\t")] {
            let err = store
                .add_task(title, description)
                .expect_err("blank input must be rejected");
            assert!(matches!(err, TaskStoreError::EmptyInput(_)));
        }

        assert!(store.is_empty());
        assert!(!store.is_dirty());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn empty_title_is_reported_before_empty_description() {
        let mut store = TaskStore::open(MemorySlotStorage::new()).expect("open");
        let err = store.add_task("", "").expect_err("should reject");
        assert!(matches!(
            err,
            TaskStoreError::EmptyInput(TaskValidationError::EmptyTitle)
        ));
    }

    #[test]
    fn deferred_policy_writes_only_on_flush() {
        let storage = MemorySlotStorage::new();
        let mut store = TaskStore::open(&storage)
            .expect("open")
            .with_policy(PersistPolicy::Deferred);

        store.add_task("a", "first").expect("add a");
        store.add_task("b", "second").expect("add b");
        assert!(store.is_dirty());
        assert_eq!(storage.write_count(), 0);

        store.flush().expect("flush");
        assert!(!store.is_dirty());
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn failed_write_through_keeps_task_and_dirty_flag() {
        let storage = MemorySlotStorage::new();
        let mut store = TaskStore::open(&storage).expect("open");
        store.add_task("kept", "before failure").expect("add");
        let before = storage.raw_slot("savedTrackYourDos").expect("snapshot");

        storage.set_fail_writes(true);
        store.add_task("pending", "not saved yet").expect("add still succeeds");
        assert_eq!(store.len(), 2);
        assert!(store.is_dirty());
        assert_eq!(storage.raw_slot("savedTrackYourDos"), Some(before));

        let err = store.flush().expect_err("flush should surface the failure");
        assert!(matches!(err, TaskStoreError::Persist(_)));

        storage.set_fail_writes(false);
        store.flush().expect("retry flush");
        assert!(!store.is_dirty());
    }

    #[test]
    fn unreadable_snapshot_refuses_open_and_keeps_saved_tasks() {
        let storage = MemorySlotStorage::new();
        {
            let mut store = TaskStore::open(&storage).expect("open");
            store.add_task("Groceries", "milk").expect("add a");
            store.add_task("Rent", "due friday").expect("add b");
        }
        let saved = storage.raw_slot("savedTrackYourDos").expect("snapshot");

        storage.set_fail_reads(true);
        let err = TaskStore::open(&storage)
            .err()
            .expect("open must fail when the slot is unreadable");
        assert!(matches!(err, TaskStoreError::Load(_)));
        assert_eq!(storage.write_count(), 2);

        storage.set_fail_reads(false);
        assert_eq!(storage.raw_slot("savedTrackYourDos"), Some(saved));
        let store = TaskStore::open(&storage).expect("reopen");
        let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Groceries", "Rent"]);
    }

    #[test]
    fn failed_reload_keeps_in_memory_tasks() {
        let storage = MemorySlotStorage::new();
        let mut store = TaskStore::open(&storage)
            .expect("open")
            .with_policy(PersistPolicy::Deferred);
        store.add_task("pending", "not flushed").expect("add");

        storage.set_fail_reads(true);
        let err = store.load_all().expect_err("reload must fail");
        assert!(matches!(err, TaskStoreError::Load(_)));
        assert_eq!(store.len(), 1);
        assert!(store.is_dirty());
    }
}
