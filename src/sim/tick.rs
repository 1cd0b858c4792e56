//! Tick orchestration
//!
//! One call advances the world a single step:
//! thought delivery -> spawner poll -> unlock service -> physics ->
//! state settle -> consumption -> stat update
//!
//! Nothing in this path can fail; every degraded case is a no-op for
//! the tick.

use std::time::Instant;

use crate::core::types::FoodId;
use crate::creature::state::BehavioralState;
use crate::sim::physics::{self, PhysicsInput};
use crate::world::food::FoodKind;
use crate::world::pond::Pond;

/// Events generated during a simulation tick
///
/// Returned by [`run_tick`] for logs and the host UI.
#[derive(Debug, Clone)]
pub enum SimEvent {
    /// The behavioral state changed, whatever the trigger
    StateChanged {
        from: BehavioralState,
        to: BehavioralState,
        tick: u64,
    },
    /// The spawner produced a new item
    FoodSpawned {
        id: FoodId,
        kind: FoodKind,
        x: f32,
        y: f32,
        tick: u64,
    },
    /// An item was consumed; stats are the post-meal values
    FoodConsumed {
        id: FoodId,
        kind: FoodKind,
        hunger: f32,
        energy: f32,
        tick: u64,
    },
    /// The gate honored a thought request
    ThoughtRequested {
        tag: BehavioralState,
        forced: bool,
        tick: u64,
    },
}

/// Run a single simulation tick
pub fn run_tick(pond: &mut Pond, now: Instant) -> Vec<SimEvent> {
    let mut events = Vec::new();
    let tick = pond.current_tick;

    // Thought responses that resolved since the last tick
    pond.drain_thoughts(now);

    // Spawner deadline
    if let Some(item) = pond.spawner.poll(now, &pond.config) {
        tracing::debug!(
            kind = ?item.kind,
            x = item.position.x,
            y = item.position.y,
            "food spawned"
        );
        events.push(SimEvent::FoodSpawned {
            id: item.id,
            kind: item.kind,
            x: item.position.x,
            y: item.position.y,
            tick,
        });
        pond.foods.push(item);
    }

    // Deferred eating unlock
    let before_unlock = pond.state.current();
    if let Some(to) = pond.state.service_unlock(now) {
        events.push(SimEvent::StateChanged {
            from: before_unlock,
            to,
            tick,
        });
    }

    // Physics over an explicit snapshot of the current state
    let outcome = physics::resolve(
        PhysicsInput {
            position: pond.position,
            direction: pond.direction,
            state: pond.state.current(),
            keys: &pond.input,
            food: &pond.foods,
        },
        &pond.config,
    );

    pond.position = outcome.position;
    if pond.direction != outcome.direction {
        pond.direction = outcome.direction;
    }

    // Automatic classification, suppressed while locked
    if let Some(candidate) = outcome.candidate {
        let from = pond.state.current();
        if pond.state.apply_auto(candidate) {
            events.push(SimEvent::StateChanged {
                from,
                to: candidate,
                tick,
            });
            // Ambient thought on reclassification, subject to debounce
            if pond.request_thought(candidate, now, false) {
                events.push(SimEvent::ThoughtRequested {
                    tag: candidate,
                    forced: false,
                    tick,
                });
            }
        }
    }

    // Consumption, in collection order; with several hits in one tick
    // the last item's lock schedule wins.
    if !outcome.eaten.is_empty() {
        let revert_to = if outcome.in_water {
            BehavioralState::Swimming
        } else {
            BehavioralState::Idle
        };

        for id in &outcome.eaten {
            let Some(index) = pond.foods.iter().position(|f| f.id == *id) else {
                continue;
            };
            let item = pond.foods.remove(index);
            pond.stats
                .feed(item.kind.hunger_value(&pond.config), pond.config.meal_energy);

            let from = pond.state.current();
            pond.state
                .begin_eating(revert_to, now, pond.config.eat_lock());
            if from != BehavioralState::Eating {
                events.push(SimEvent::StateChanged {
                    from,
                    to: BehavioralState::Eating,
                    tick,
                });
            }

            tracing::debug!(
                kind = ?item.kind,
                hunger = pond.stats.hunger,
                energy = pond.stats.energy,
                "food consumed"
            );
            events.push(SimEvent::FoodConsumed {
                id: item.id,
                kind: item.kind,
                hunger: pond.stats.hunger,
                energy: pond.stats.energy,
                tick,
            });
        }

        // One forced request per consuming tick, not per item
        if pond.request_thought(BehavioralState::Eating, now, true) {
            events.push(SimEvent::ThoughtRequested {
                tag: BehavioralState::Eating,
                forced: true,
                tick,
            });
        }
    }

    // Stats read the state the tick settled on
    pond.stats.update(pond.state.current(), &pond.config);

    pond.current_tick += 1;
    events
}
