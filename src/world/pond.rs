//! The pond world - one creature, its food, and the collaborator seams

use std::time::Instant;

use tokio::sync::mpsc;

use crate::core::config::SimConfig;
use crate::core::types::{Direction, Tick, Vec2};
use crate::creature::state::{BehavioralState, StateMachine, ToggleOutcome};
use crate::creature::stats::Stats;
use crate::llm::gate::{ThoughtGate, ThoughtJob, ThoughtOutcome};
use crate::sim::input::InputState;
use crate::world::food::FoodItem;
use crate::world::spawner::FoodSpawner;

/// The whole simulation state
///
/// Single-writer per field: only the tick orchestration mutates the
/// creature fields, and thought responses funnel through one channel
/// applied between ticks.
pub struct Pond {
    pub current_tick: Tick,
    pub config: SimConfig,
    pub position: Vec2,
    pub direction: Direction,
    pub state: StateMachine,
    pub stats: Stats,
    pub foods: Vec<FoodItem>,
    pub input: InputState,
    pub spawner: FoodSpawner,
    pub gate: ThoughtGate,
    /// Honored requests waiting for a dispatcher to hand to the client
    outbox: Vec<ThoughtJob>,
    results_tx: mpsc::UnboundedSender<ThoughtOutcome>,
    results_rx: mpsc::UnboundedReceiver<ThoughtOutcome>,
}

impl Pond {
    pub fn new(config: SimConfig, now: Instant) -> Self {
        let spawner = FoodSpawner::new(now, &config);
        Self::build(config, spawner)
    }

    /// Seeded constructor for reproducible runs
    pub fn with_seed(config: SimConfig, seed: u64, now: Instant) -> Self {
        let spawner = FoodSpawner::with_seed(seed, now, &config);
        Self::build(config, spawner)
    }

    fn build(config: SimConfig, mut spawner: FoodSpawner) -> Self {
        let foods = spawner.initial_batch(&config);
        let gate = ThoughtGate::new(config.thought_debounce());
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let position = Vec2::new(config.world_width / 2.0, config.world_height / 2.0);

        Self {
            current_tick: 0,
            config,
            position,
            direction: Direction::Right,
            state: StateMachine::new(),
            stats: Stats::default(),
            foods,
            input: InputState::new(),
            spawner,
            gate,
            outbox: Vec::new(),
            results_tx,
            results_rx,
        }
    }

    /// User action: toggle sleeping on or off
    pub fn toggle_sleep(&mut self, _now: Instant) -> ToggleOutcome {
        let outcome = self.state.toggle_sleep();
        if let ToggleOutcome::Switched(to) = outcome {
            tracing::debug!(state = to.tag(), "sleep toggled");
        }
        outcome
    }

    /// User action: toggle meditating on or off
    ///
    /// Switching on is refused while a thought request is pending;
    /// switching off is always a plain state change. Switching on
    /// dispatches a forced thought tagged with the new state.
    pub fn toggle_meditate(&mut self, now: Instant) -> ToggleOutcome {
        let turning_on = self.state.current() != BehavioralState::Meditating;
        if turning_on && self.gate.is_busy() {
            return ToggleOutcome::Refused;
        }
        let outcome = self.state.toggle_meditate();
        if outcome == ToggleOutcome::Switched(BehavioralState::Meditating) {
            self.request_thought(BehavioralState::Meditating, now, true);
        }
        if let ToggleOutcome::Switched(to) = outcome {
            tracing::debug!(state = to.tag(), "meditate toggled");
        }
        outcome
    }

    /// Ask the gate for a dispatch slot; queue the job if honored
    pub(crate) fn request_thought(
        &mut self,
        tag: BehavioralState,
        now: Instant,
        forced: bool,
    ) -> bool {
        match self.gate.try_request(now, forced) {
            Some(epoch) => {
                self.outbox.push(ThoughtJob {
                    epoch,
                    tag,
                    stats: self.stats.clone(),
                });
                true
            }
            None => false,
        }
    }

    /// Hand pending thought jobs to the dispatcher
    pub fn take_thought_jobs(&mut self) -> Vec<ThoughtJob> {
        std::mem::take(&mut self.outbox)
    }

    /// Sender completed jobs report back through
    pub fn results_sender(&self) -> mpsc::UnboundedSender<ThoughtOutcome> {
        self.results_tx.clone()
    }

    /// Apply every thought response that resolved since the last call
    ///
    /// Each application is one atomic gate mutation; superseded epochs
    /// are dropped inside the gate.
    pub fn drain_thoughts(&mut self, now: Instant) {
        while let Ok(outcome) = self.results_rx.try_recv() {
            self.gate.apply(outcome, now);
        }
    }
}
