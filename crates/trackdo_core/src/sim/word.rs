//! Per-word simulation record.

use std::time::Duration;

/// Horizontal/vertical coordinate of a word's center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One animated word: fixed label plus mutable motion state.
#[derive(Debug, Clone, PartialEq)]
pub struct WordBody {
    text: String,
    width: f64,
    pub(crate) position: Position,
    pub(crate) velocity: f64,
    pub(crate) activates_at: Duration,
}

impl WordBody {
    pub(crate) fn new(
        text: String,
        width: f64,
        position: Position,
        activates_at: Duration,
    ) -> Self {
        Self {
            text,
            width,
            position,
            velocity: 0.0,
            activates_at,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rendered label width measured at initialization.
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Downward speed, units/s.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Simulator clock time at which this word starts falling.
    pub fn activates_at(&self) -> Duration {
        self.activates_at
    }

    pub fn is_active_at(&self, clock: Duration) -> bool {
        clock >= self.activates_at
    }

    /// Whether `self` is close enough to `other` to land on it.
    pub(crate) fn overlaps(&self, other: &WordBody, proximity_threshold: f64) -> bool {
        let dx = (self.position.x - other.position.x).abs();
        let dy = (self.position.y - other.position.y).abs();
        dx < self.width.max(other.width) && dy < proximity_threshold
    }
}
