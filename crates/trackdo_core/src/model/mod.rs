//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define canonical task records owned by the task store.
//! - Provide input-limit helpers shared with host input fields.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal from the active sequence.

pub mod input;
pub mod task;
