//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for spawned food items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodId(pub Uuid);

impl FoodId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FoodId {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulation tick counter
pub type Tick = u64;

/// Horizontal facing of the creature
///
/// Facing changes only while a horizontal movement key is held; it
/// persists when the creature stops (no idle reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// 2D position in world coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Clamp both axes into the playable rectangle `[min, max_x] x [min, max_y]`
    pub fn clamped(self, min: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            x: self.x.clamp(min, max_x),
            y: self.y.clamp(min, max_y),
        }
    }
}
