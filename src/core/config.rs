//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{PondError, Result};

/// Configuration for the simulation systems
///
/// These values have been tuned to produce good pacing at the nominal
/// 16ms tick cadence. Changing them will affect gameplay feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === WORLD GEOMETRY ===
    /// World width in world units
    pub world_width: f32,

    /// World height in world units
    pub world_height: f32,

    /// Margin kept between the creature and every world edge
    ///
    /// The creature's position is clamped to
    /// `[edge_margin, extent - edge_margin]` on both axes every tick.
    pub edge_margin: f32,

    /// Fraction of world height where water begins
    ///
    /// Any position with `y > world_height * water_line_frac` is in
    /// water. Food only spawns above this line.
    pub water_line_frac: f32,

    // === MOVEMENT ===
    /// Displacement applied per held key per tick (world units)
    ///
    /// Diagonal presses apply this on both axes, so diagonal travel is
    /// faster than cardinal travel by sqrt(2). Kept as observed in the
    /// source behavior.
    pub move_speed: f32,

    /// Euclidean radius within which food is consumed
    pub eat_radius: f32,

    // === STAT MODEL ===
    /// Hunger lost per tick (100 = fed, 0 = starving)
    ///
    /// At 0.02 per tick and ~60 ticks per second, a full creature
    /// starves in roughly 80 minutes if never fed.
    pub hunger_decay: f32,

    /// Hunger level below which chill starts draining
    pub low_hunger_threshold: f32,

    /// Energy recovered per tick while sleeping
    pub energy_sleep_gain: f32,

    /// Energy spent per tick while walking or swimming
    pub energy_move_drain: f32,

    /// Chill gained per tick while meditating
    pub chill_meditate_gain: f32,

    /// Chill gained per tick while swimming
    pub chill_swim_gain: f32,

    /// Chill lost per tick while hunger is below the low threshold
    pub chill_hunger_drain: f32,

    // === FOOD ===
    /// Hunger restored by an orange
    pub orange_hunger: f32,

    /// Hunger restored by a watermelon
    pub watermelon_hunger: f32,

    /// Energy restored by any meal
    pub meal_energy: f32,

    /// Probability that a spawned item is a watermelon (else orange)
    pub watermelon_chance: f64,

    /// Food items present at startup
    pub initial_food: usize,

    /// Milliseconds between periodic food spawns
    pub spawn_interval_ms: u64,

    // === TIMING ===
    /// Milliseconds the eating lock holds before reverting
    pub eat_lock_ms: u64,

    /// Minimum milliseconds between non-forced thought requests
    pub thought_debounce_ms: u64,

    /// Milliseconds a thought stays displayable after arriving
    pub thought_display_ms: u64,

    /// Nominal milliseconds between ticks (display-frame cadence)
    pub tick_interval_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // World
            world_width: 800.0,
            world_height: 600.0,
            edge_margin: 50.0,
            water_line_frac: 0.7,

            // Movement
            move_speed: 5.0,
            eat_radius: 50.0,

            // Stats
            hunger_decay: 0.02,
            low_hunger_threshold: 20.0,
            energy_sleep_gain: 0.1,
            energy_move_drain: 0.01,
            chill_meditate_gain: 0.1,
            chill_swim_gain: 0.05,
            chill_hunger_drain: 0.05,

            // Food
            orange_hunger: 15.0,
            watermelon_hunger: 30.0,
            meal_energy: 5.0,
            watermelon_chance: 0.2,
            initial_food: 2,
            spawn_interval_ms: 10_000,

            // Timing
            eat_lock_ms: 1_000,
            thought_debounce_ms: 5_000,
            thought_display_ms: 6_000,
            tick_interval_ms: 16,
        }
    }
}

impl SimConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults for
    /// any field the file omits
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: SimConfig = toml::from_str(&text)?;
        config.validate().map_err(PondError::Config)?;
        Ok(config)
    }

    /// The y coordinate where water begins
    pub fn water_line(&self) -> f32 {
        self.world_height * self.water_line_frac
    }

    pub fn eat_lock(&self) -> Duration {
        Duration::from_millis(self.eat_lock_ms)
    }

    pub fn thought_debounce(&self) -> Duration {
        Duration::from_millis(self.thought_debounce_ms)
    }

    pub fn thought_display(&self) -> Duration {
        Duration::from_millis(self.thought_display_ms)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        // The playable rectangle must be non-empty after clamping
        if self.edge_margin * 2.0 >= self.world_width || self.edge_margin * 2.0 >= self.world_height
        {
            return Err(format!(
                "edge_margin ({}) leaves no playable area in a {}x{} world",
                self.edge_margin, self.world_width, self.world_height
            ));
        }

        // The spawn band [edge_margin, water_line] must be non-empty
        if self.water_line() <= self.edge_margin {
            return Err(format!(
                "water_line ({:.1}) must lie below edge_margin ({}) for food to spawn",
                self.water_line(),
                self.edge_margin
            ));
        }

        if !(0.0..=1.0).contains(&self.watermelon_chance) {
            return Err(format!(
                "watermelon_chance ({}) must be within [0, 1]",
                self.watermelon_chance
            ));
        }

        if self.hunger_decay < 0.0 || self.move_speed <= 0.0 {
            return Err("hunger_decay must be >= 0 and move_speed must be > 0".into());
        }

        if self.tick_interval_ms == 0 || self.spawn_interval_ms == 0 {
            return Err("tick_interval_ms and spawn_interval_ms must be > 0".into());
        }

        Ok(())
    }
}
