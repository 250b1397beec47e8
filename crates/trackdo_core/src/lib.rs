//! Core domain logic for TrackYourDo.
//! This crate owns the task list state and the falling-word animation.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sim;
pub mod storage;

pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LoggingConfig};
pub use model::input::{limit_chars, DESCRIPTION_CHAR_LIMIT, TITLE_CHAR_LIMIT};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, TaskSnapshotRepository, DEFAULT_TASKS_SLOT};
pub use service::task_store::{PersistPolicy, TaskStore, TaskStoreError};
pub use sim::{
    FallingWordSimulator, FixedAdvanceMetrics, Position, SimulationConfig, TextMetrics, Viewport,
    WordBody, DEFAULT_WORDS,
};
pub use storage::{
    FileSlotStorage, MemorySlotStorage, SnapshotStorage, SqliteSlotStorage, StorageError,
    StorageResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
