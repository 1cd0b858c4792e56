//! Read-only view handed to rendering and HUD collaborators
//!
//! Captured once per frame by the host; nothing in it writes back into
//! the simulation.

use std::time::Instant;

use serde::Serialize;

use crate::core::types::{Direction, FoodId};
use crate::creature::state::BehavioralState;
use crate::world::food::FoodKind;
use crate::world::pond::Pond;

#[derive(Debug, Clone, Serialize)]
pub struct PondSnapshot {
    pub tick: u64,
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    pub state: BehavioralState,
    pub hunger: f32,
    pub chill: f32,
    pub energy: f32,
    pub food: Vec<FoodSnapshot>,
    pub thought: Option<ThoughtSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FoodSnapshot {
    pub id: FoodId,
    pub kind: FoodKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThoughtSnapshot {
    pub text: String,
    pub age_ms: u64,
    /// Past the display window; renderers hide it but the text stays
    /// until a newer thought replaces it
    pub expired: bool,
}

impl PondSnapshot {
    pub fn capture(pond: &Pond, now: Instant) -> Self {
        let thought = pond.gate.current().map(|t| ThoughtSnapshot {
            text: t.text.clone(),
            age_ms: t.age(now).as_millis() as u64,
            expired: t.is_expired(now, pond.config.thought_display()),
        });

        Self {
            tick: pond.current_tick,
            x: pond.position.x,
            y: pond.position.y,
            direction: pond.direction,
            state: pond.state.current(),
            hunger: pond.stats.hunger,
            chill: pond.stats.chill,
            energy: pond.stats.energy,
            food: pond
                .foods
                .iter()
                .map(|f| FoodSnapshot {
                    id: f.id,
                    kind: f.kind,
                    x: f.position.x,
                    y: f.position.y,
                })
                .collect(),
            thought,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimConfig;
    use crate::llm::gate::ThoughtOutcome;
    use std::time::Duration;

    #[test]
    fn test_snapshot_reflects_pond() {
        let now = Instant::now();
        let pond = Pond::with_seed(SimConfig::default(), 2, now);
        let snapshot = PondSnapshot::capture(&pond, now);

        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.state, BehavioralState::Idle);
        assert_eq!(snapshot.food.len(), 2);
        assert!(snapshot.thought.is_none());
    }

    #[test]
    fn test_thought_expiry_flag() {
        let now = Instant::now();
        let mut pond = Pond::with_seed(SimConfig::default(), 2, now);
        pond.toggle_meditate(now);
        let job = pond.take_thought_jobs().pop().unwrap();
        pond.results_sender()
            .send(ThoughtOutcome {
                epoch: job.epoch,
                text: Some("ommm".into()),
            })
            .unwrap();
        pond.drain_thoughts(now);

        let fresh = PondSnapshot::capture(&pond, now + Duration::from_millis(100));
        assert!(!fresh.thought.as_ref().unwrap().expired);

        let late = PondSnapshot::capture(&pond, now + Duration::from_millis(6_500));
        assert!(late.thought.as_ref().unwrap().expired);
    }

    #[test]
    fn test_snapshot_serializes() {
        let now = Instant::now();
        let pond = Pond::with_seed(SimConfig::default(), 2, now);
        let snapshot = PondSnapshot::capture(&pond, now);
        assert!(serde_json::to_string(&snapshot).is_ok());
    }
}
