//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task list and falling-word use-cases to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + message, never panics.
//!
//! # Invariants
//! - Every task store call runs under one process-wide writer lock, so
//!   concurrent host calls cannot lose snapshot updates.
//! - The simulator is process-global and only mutated under its own lock.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;
use trackdo_core::db::open_db;
use trackdo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, limit_chars,
    ping as ping_inner, FallingWordSimulator, SimulationConfig, SqliteSlotStorage, Task, TaskId,
    TaskStore, TaskStoreError, Viewport, DESCRIPTION_CHAR_LIMIT, TITLE_CHAR_LIMIT,
};
use uuid::Uuid;

const TASKS_DB_FILE_NAME: &str = "trackdo.sqlite3";
const TASKS_DB_PATH_ENV: &str = "TRACKDO_DB_PATH";

static TASKS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static TASK_STORE_LOCK: Mutex<()> = Mutex::new(());
static SIMULATOR: Mutex<Option<FallingWordSimulator>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One task row for the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task ID in string form.
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Tasks in display order.
    pub items: Vec<TaskItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected task ID, when known.
    pub task_id: Option<String>,
    /// Human-readable response message for the dismissible notice.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: String) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Current position of one falling word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordPosition {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Loads the saved task list.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Missing or malformed saved state yields an empty list, not an error.
/// - An unreadable task slot is reported in `message` with an empty list;
///   nothing is written, so the saved snapshot survives for the next call.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> TaskListResponse {
    match with_task_store(|store| Ok(store.tasks().iter().map(to_task_item).collect::<Vec<_>>())) {
        Ok(items) => {
            let message = if items.is_empty() {
                "No Do's To Track Yet".to_string()
            } else {
                format!("{} task(s).", items.len())
            };
            TaskListResponse { items, message }
        }
        Err(err) => TaskListResponse {
            items: Vec::new(),
            message: format!("task_list failed: {err}"),
        },
    }
}

/// Creates a task from the add-task form.
///
/// # FFI contract
/// - Input is cut to the title/description character limits first.
/// - Blank title or description returns `ok=false` and writes nothing.
/// - `ok=true` only once the snapshot has been written.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String, description: String) -> TaskActionResponse {
    let title = limit_chars(&title, TITLE_CHAR_LIMIT).to_string();
    let description = limit_chars(&description, DESCRIPTION_CHAR_LIMIT).to_string();

    let result = with_task_store(|store| {
        let task = store
            .add_task(title, description)
            .map_err(|err| match err {
                TaskStoreError::EmptyInput(_) => {
                    "Please enter both a task name and a description.".to_string()
                }
                other => other.to_string(),
            })?;
        if store.is_dirty() {
            store.flush().map_err(|err| err.to_string())?;
        }
        Ok(task)
    });

    match result {
        Ok(task) => TaskActionResponse::success("Task created.", task.id.to_string()),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Removes a task when the user marks it completed.
///
/// # FFI contract
/// - Unknown IDs succeed as already removed.
/// - Malformed IDs return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> TaskActionResponse {
    let id: TaskId = match Uuid::parse_str(task_id.trim()) {
        Ok(id) => id,
        Err(err) => {
            return TaskActionResponse::failure(format!("task_delete failed: invalid id: {err}"))
        }
    };

    let result = with_task_store(|store| {
        let removed = store.delete_task(id);
        if store.is_dirty() {
            store.flush().map_err(|err| err.to_string())?;
        }
        Ok(removed)
    });

    match result {
        Ok(true) => TaskActionResponse::success("Task completed.", id.to_string()),
        Ok(false) => TaskActionResponse::success("Task already removed.", id.to_string()),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Host timer period for `words_tick`, in milliseconds.
#[flutter_rust_bridge::frb(sync)]
pub fn words_tick_interval_ms() -> u32 {
    u32::try_from(SimulationConfig::default().tick_interval.as_millis()).unwrap_or(u32::MAX)
}

/// (Re)spawns the default falling words for a viewport.
#[flutter_rust_bridge::frb(sync)]
pub fn words_init(width: f64, height: f64) -> Vec<WordPosition> {
    let simulator = FallingWordSimulator::with_defaults(Viewport::new(width, height));
    let positions = to_word_positions(&simulator);
    *lock_simulator() = Some(simulator);
    positions
}

/// Updates viewport geometry. Returns `false` before `words_init`.
#[flutter_rust_bridge::frb(sync)]
pub fn words_resize(width: f64, height: f64) -> bool {
    match lock_simulator().as_mut() {
        Some(simulator) => {
            simulator.set_viewport(Viewport::new(width, height));
            true
        }
        None => false,
    }
}

/// Advances the animation and returns updated positions.
///
/// Negative or non-finite `elapsed_secs` is treated as zero; values beyond
/// `Duration::MAX` saturate. Returns an empty list before `words_init`.
#[flutter_rust_bridge::frb(sync)]
pub fn words_tick(elapsed_secs: f64) -> Vec<WordPosition> {
    let elapsed = if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
        Duration::try_from_secs_f64(elapsed_secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    };

    let mut guard = lock_simulator();
    match guard.as_mut() {
        Some(simulator) => {
            simulator.tick(elapsed);
            to_word_positions(simulator)
        }
        None => Vec::new(),
    }
}

/// Current positions without advancing the animation.
#[flutter_rust_bridge::frb(sync)]
pub fn words_positions() -> Vec<WordPosition> {
    lock_simulator()
        .as_ref()
        .map(to_word_positions)
        .unwrap_or_default()
}

fn resolve_tasks_db_path() -> PathBuf {
    TASKS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(TASKS_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(TASKS_DB_FILE_NAME)
        })
        .clone()
}

fn with_task_store<T>(
    f: impl FnOnce(&mut TaskStore<SqliteSlotStorage<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let _guard = TASK_STORE_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let db_path = resolve_tasks_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=task_store_open module=ffi status=error error={err}");
        format!("task DB open failed: {err}")
    })?;
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn)).map_err(|err| {
        warn!("event=task_store_open module=ffi status=error error={err}");
        format!("saved tasks could not be read: {err}")
    })?;
    f(&mut store)
}

fn lock_simulator() -> std::sync::MutexGuard<'static, Option<FallingWordSimulator>> {
    SIMULATOR.lock().unwrap_or_else(PoisonError::into_inner)
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        is_completed: task.is_completed,
    }
}

fn to_word_positions(simulator: &FallingWordSimulator) -> Vec<WordPosition> {
    simulator
        .words()
        .iter()
        .map(|word| WordPosition {
            text: word.text().to_string(),
            x: word.position().x,
            y: word.position().y,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, task_add, task_delete, task_list, words_init,
        words_positions, words_resize, words_tick, words_tick_interval_ms,
    };
    use std::sync::{Mutex, PoisonError};
    use std::time::{SystemTime, UNIX_EPOCH};
    use trackdo_core::{DEFAULT_WORDS, TITLE_CHAR_LIMIT};

    // The simulator is process-global; words tests must not interleave.
    static WORDS_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn task_add_then_list_then_delete() {
        let title = unique_token("ffi-task");
        let created = task_add(title.clone(), "from ffi test".to_string());
        assert!(created.ok, "{}", created.message);
        let task_id = created.task_id.expect("created task should return id");

        let listed = task_list();
        assert!(listed
            .items
            .iter()
            .any(|item| item.id == task_id && item.title == title && !item.is_completed));

        let deleted = task_delete(task_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert_eq!(deleted.message, "Task completed.");

        let again = task_delete(task_id.clone());
        assert!(again.ok, "{}", again.message);
        assert_eq!(again.message, "Task already removed.");

        assert!(!task_list().items.iter().any(|item| item.id == task_id));
    }

    #[test]
    fn task_add_rejects_blank_fields() {
        let response = task_add("   ".to_string(), "desc".to_string());
        assert!(!response.ok);
        assert!(response.task_id.is_none());
        assert!(response.message.contains("task name"));
    }

    #[test]
    fn task_add_truncates_title_to_limit() {
        let long_title = format!("{}{}", unique_token("t"), "x".repeat(80));
        let created = task_add(long_title, "long title".to_string());
        assert!(created.ok, "{}", created.message);
        let task_id = created.task_id.expect("created task should return id");

        let item = task_list()
            .items
            .into_iter()
            .find(|item| item.id == task_id)
            .expect("created task should be listed");
        assert_eq!(item.title.chars().count(), TITLE_CHAR_LIMIT);

        assert!(task_delete(task_id).ok);
    }

    #[test]
    fn task_delete_rejects_malformed_id() {
        let response = task_delete("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid id"));
    }

    #[test]
    fn words_lifecycle() {
        let _guard = WORDS_TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(words_tick_interval_ms() > 0);

        let spawned = words_init(390.0, 844.0);
        assert_eq!(spawned.len(), DEFAULT_WORDS.len());
        assert!(spawned.iter().all(|word| word.y == -50.0));

        assert!(words_resize(430.0, 932.0));
        let ticked = words_tick(10.0);
        assert_eq!(ticked.len(), DEFAULT_WORDS.len());
        assert_eq!(words_positions(), ticked);

        assert_eq!(words_tick(f64::NAN).len(), DEFAULT_WORDS.len());
        assert_eq!(words_tick(-1.0).len(), DEFAULT_WORDS.len());
    }

    #[test]
    fn words_tick_survives_huge_elapsed_values() {
        let _guard = WORDS_TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        words_init(390.0, 844.0);

        for elapsed in [1e20, f64::MAX, 1e20] {
            let ticked = words_tick(elapsed);
            assert_eq!(ticked.len(), DEFAULT_WORDS.len());
            assert!(ticked.iter().all(|word| word.x.is_finite() && word.y.is_finite()));
        }
    }

    #[test]
    fn words_survive_infinite_viewport_width() {
        let _guard = WORDS_TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let spawned = words_init(f64::INFINITY, 844.0);
        assert_eq!(spawned.len(), DEFAULT_WORDS.len());
        assert!(spawned.iter().all(|word| word.x == -100.0));

        words_init(390.0, 844.0);
        assert!(words_resize(f64::INFINITY, 100.0));
        let ticked = words_tick(30.0);
        assert_eq!(ticked.len(), DEFAULT_WORDS.len());
        assert!(ticked.iter().all(|word| word.x.is_finite()));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
