//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory task state and decide when it is persisted.
//! - Keep FFI and CLI layers decoupled from storage details.

pub mod task_store;
