//! Falling-word simulator.
//!
//! # Responsibility
//! - Spawn words above the viewport with staggered activation deadlines.
//! - Advance active words on each tick: gravity, stacking, wrap-around.
//!
//! # Invariants
//! - Words are updated in index order; a word only lands on lower-indexed
//!   active words, and the lowest index wins.
//! - A wrapped word restarts at `reset_y` with zero velocity.
//! - Randomness is injected, so a seeded RNG reproduces a run exactly.
//! - Any viewport, including non-finite geometry, and any tick length are
//!   accepted without panicking; the clock saturates at `Duration::MAX`.

use super::config::{SimulationConfig, Viewport, DEFAULT_WORDS};
use super::metrics::{FixedAdvanceMetrics, TextMetrics};
use super::word::{Position, WordBody};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Owns every word record and the central simulation clock.
#[derive(Debug, Clone)]
pub struct FallingWordSimulator<R: Rng = StdRng> {
    words: Vec<WordBody>,
    viewport: Viewport,
    config: SimulationConfig,
    clock: Duration,
    rng: R,
}

impl FallingWordSimulator<StdRng> {
    /// Default word set, shipped constants, entropy-seeded RNG.
    pub fn with_defaults(viewport: Viewport) -> Self {
        Self::initialize(
            DEFAULT_WORDS,
            viewport,
            SimulationConfig::default(),
            &FixedAdvanceMetrics::default(),
            StdRng::from_entropy(),
        )
    }
}

impl<R: Rng> FallingWordSimulator<R> {
    /// Creates the simulator and spawns every word.
    ///
    /// Each word starts at `spawn_y` with a random `x` in
    /// `[spawn_min_x, width - spawn_right_margin]`, zero velocity, and an
    /// activation deadline drawn uniformly from the configured delay range.
    pub fn initialize<I, T>(
        words: I,
        viewport: Viewport,
        config: SimulationConfig,
        metrics: &impl TextMetrics,
        mut rng: R,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let words = words
            .into_iter()
            .map(|text| {
                let text = text.into();
                let width = metrics.text_width(&text);
                let position = Position::new(spawn_x(&mut rng, viewport, &config), config.spawn_y);
                let activates_at = activation_delay(&mut rng, &config);
                WordBody::new(text, width, position, activates_at)
            })
            .collect();

        Self {
            words,
            viewport,
            config,
            clock: Duration::ZERO,
            rng,
        }
    }

    pub fn words(&self) -> &[WordBody] {
        &self.words
    }

    /// Current positions in word order, for the rendering layer.
    pub fn positions(&self) -> Vec<Position> {
        self.words.iter().map(WordBody::position).collect()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Accepts new geometry; takes effect from the next tick.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Total simulated time since initialization.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn active_count(&self) -> usize {
        self.words
            .iter()
            .filter(|word| word.is_active_at(self.clock))
            .count()
    }

    /// Advances the clock by `elapsed` and steps every active word.
    pub fn tick(&mut self, elapsed: Duration) {
        self.clock = self.clock.saturating_add(elapsed);
        let dt = elapsed.as_secs_f64();
        let clock = self.clock;
        let config = self.config;
        let viewport = self.viewport;

        for index in 0..self.words.len() {
            let (lower, rest) = self.words.split_at_mut(index);
            let word = &mut rest[0];
            if !word.is_active_at(clock) {
                continue;
            }

            word.velocity += config.gravity * dt;
            word.position.y += word.velocity * dt;

            if let Some(below) = lower
                .iter()
                .filter(|other| other.is_active_at(clock))
                .find(|other| word.overlaps(other, config.proximity_threshold))
            {
                word.position.y = below.position.y - config.landing_offset;
                word.velocity = 0.0;
            }

            if word.position.y >= viewport.height {
                word.position.y = config.reset_y;
                word.position.x = wrap_x(&mut self.rng, viewport, &config);
                word.velocity = 0.0;
            }
        }
    }

    /// Number of whole ticks that fit in `duration` at the configured interval.
    pub fn ticks_in(&self, duration: Duration) -> u32 {
        let interval = self.config.tick_interval.as_nanos();
        if interval == 0 {
            return 0;
        }
        u32::try_from(duration.as_nanos() / interval).unwrap_or(u32::MAX)
    }
}

fn spawn_x(rng: &mut impl Rng, viewport: Viewport, config: &SimulationConfig) -> f64 {
    let max_x = viewport.width - config.spawn_right_margin;
    if max_x.is_finite() && max_x > config.spawn_min_x {
        rng.gen_range(config.spawn_min_x..=max_x)
    } else {
        config.spawn_min_x
    }
}

fn wrap_x(rng: &mut impl Rng, viewport: Viewport, config: &SimulationConfig) -> f64 {
    let max_x = viewport.width - config.wrap_margin;
    if max_x.is_finite() && max_x > config.wrap_margin {
        rng.gen_range(config.wrap_margin..max_x)
    } else {
        config.wrap_margin
    }
}

fn activation_delay(rng: &mut impl Rng, config: &SimulationConfig) -> Duration {
    let min = config.min_activation_delay.as_secs_f64();
    let max = config.max_activation_delay.as_secs_f64();
    if max > min {
        Duration::from_secs_f64(rng.gen_range(min..=max))
    } else {
        config.min_activation_delay
    }
}
