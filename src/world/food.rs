//! Food items scattered over the land band

use serde::{Deserialize, Serialize};

use crate::core::config::SimConfig;
use crate::core::types::{FoodId, Vec2};

/// What kind of food an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Orange,
    Watermelon,
}

impl FoodKind {
    /// Hunger restored when consumed
    pub fn hunger_value(&self, config: &SimConfig) -> f32 {
        match self {
            Self::Orange => config.orange_hunger,
            Self::Watermelon => config.watermelon_hunger,
        }
    }
}

/// A single spawned food item
///
/// Owned exclusively by the pond's ordered collection and removed
/// exactly once when consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: FoodId,
    pub position: Vec2,
    pub kind: FoodKind,
}

impl FoodItem {
    pub fn new(position: Vec2, kind: FoodKind) -> Self {
        Self {
            id: FoodId::new(),
            position,
            kind,
        }
    }
}
