//! Repository layer over snapshot storage.
//!
//! # Responsibility
//! - Encode and decode the task snapshot.
//! - Isolate slot storage details from the task store service.
//!
//! # Invariants
//! - Missing or malformed snapshots load as empty; storage read failures
//!   are returned so callers never overwrite a snapshot they could not read.
//! - Persisting replaces the whole snapshot or leaves it untouched.

pub mod task_repo;
