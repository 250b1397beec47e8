//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `trackdo_core` linkage.
//! - Run the falling-word simulator headlessly for a fixed span.

use std::time::Duration;
use trackdo_core::{FallingWordSimulator, Viewport};

const PROBE_VIEWPORT: Viewport = Viewport {
    width: 390.0,
    height: 844.0,
};
const PROBE_SPAN: Duration = Duration::from_secs(10);

fn main() {
    println!("trackdo_core ping={}", trackdo_core::ping());
    println!("trackdo_core version={}", trackdo_core::core_version());

    let mut simulator = FallingWordSimulator::with_defaults(PROBE_VIEWPORT);
    let interval = simulator.config().tick_interval;
    for _ in 0..simulator.ticks_in(PROBE_SPAN) {
        simulator.tick(interval);
    }
    println!(
        "trackdo_core words active={}/{} clock_ms={}",
        simulator.active_count(),
        simulator.words().len(),
        simulator.clock().as_millis()
    );
}
