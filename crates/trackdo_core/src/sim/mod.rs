//! Falling-word background animation.
//!
//! # Responsibility
//! - Advance a fixed set of words under gravity on a central clock.
//! - Resolve simple stacking between words and wrap fallen words to the top.
//!
//! # Invariants
//! - Word velocity is never negative.
//! - Per-word activation is a deadline on the simulator clock; there are no
//!   per-word timers.
//! - A tick performs no I/O.

pub mod config;
pub mod metrics;
pub mod simulator;
pub mod word;

pub use config::{SimulationConfig, Viewport, DEFAULT_WORDS};
pub use metrics::{FixedAdvanceMetrics, TextMetrics};
pub use simulator::FallingWordSimulator;
pub use word::{Position, WordBody};
