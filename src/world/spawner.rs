//! Periodic food spawning over the land band

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimConfig;
use crate::core::types::Vec2;
use crate::world::food::{FoodItem, FoodKind};

/// Spawns food at randomized land positions on a fixed cadence
///
/// The spawn deadline is polled at tick boundaries rather than armed as
/// a free-running timer, so dropping the spawner cancels it outright.
pub struct FoodSpawner {
    rng: ChaCha8Rng,
    next_spawn_at: Instant,
}

impl FoodSpawner {
    pub fn new(now: Instant, config: &SimConfig) -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            next_spawn_at: now + config.spawn_interval(),
        }
    }

    /// Seeded constructor for reproducible runs
    pub fn with_seed(seed: u64, now: Instant, config: &SimConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_spawn_at: now + config.spawn_interval(),
        }
    }

    /// The items present at startup
    pub fn initial_batch(&mut self, config: &SimConfig) -> Vec<FoodItem> {
        (0..config.initial_food)
            .map(|_| self.spawn_one(config))
            .collect()
    }

    /// Poll the spawn deadline; at most one item per call
    pub fn poll(&mut self, now: Instant, config: &SimConfig) -> Option<FoodItem> {
        if now < self.next_spawn_at {
            return None;
        }
        self.next_spawn_at = now + config.spawn_interval();
        Some(self.spawn_one(config))
    }

    fn spawn_one(&mut self, config: &SimConfig) -> FoodItem {
        let x = self
            .rng
            .gen_range(config.edge_margin..=config.world_width - config.edge_margin);
        let y = self.rng.gen_range(config.edge_margin..=config.water_line());
        let kind = if self.rng.gen_bool(config.watermelon_chance) {
            FoodKind::Watermelon
        } else {
            FoodKind::Orange
        };
        FoodItem::new(Vec2::new(x, y), kind)
    }
}
