//! Simulation constants and viewport geometry.

use std::time::Duration;

/// Labels shown by the login and list screens.
pub const DEFAULT_WORDS: [&str; 13] = [
    "Track",
    "Your",
    "Do's",
    "List",
    "Due",
    "Date",
    "Reminder",
    "Tasks",
    "Goals",
    "Priorities",
    "Notes",
    "Agenda",
    "Assignments",
];

/// Rectangular area the words fall through, in host layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Tunables for the falling-word simulation.
///
/// `Default` carries the values the mobile app ships with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Downward acceleration, units/s².
    pub gravity: f64,
    /// Period the host should drive `tick` at.
    pub tick_interval: Duration,
    /// Vertical distance under which two words are considered touching.
    pub proximity_threshold: f64,
    /// How far above the word below a landed word rests.
    pub landing_offset: f64,
    /// Vertical position of every word before it starts falling.
    pub spawn_y: f64,
    /// Leftmost initial horizontal position.
    pub spawn_min_x: f64,
    /// Initial horizontal positions stop this far before the right edge.
    pub spawn_right_margin: f64,
    /// Vertical position a word jumps to after leaving the bottom edge.
    pub reset_y: f64,
    /// Horizontal margin kept on both sides when a word wraps.
    pub wrap_margin: f64,
    /// Lower bound of the per-word activation delay.
    pub min_activation_delay: Duration,
    /// Upper bound of the per-word activation delay.
    pub max_activation_delay: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: 50.0,
            tick_interval: Duration::from_millis(40),
            proximity_threshold: 50.0,
            landing_offset: 60.0,
            spawn_y: -50.0,
            spawn_min_x: -100.0,
            spawn_right_margin: 50.0,
            reset_y: -100.0,
            wrap_margin: 50.0,
            min_activation_delay: Duration::from_millis(1_500),
            max_activation_delay: Duration::from_secs(9),
        }
    }
}
