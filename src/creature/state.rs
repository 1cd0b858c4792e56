//! Behavioral state machine with locked episodes

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// The creature's single behavioral state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehavioralState {
    Idle,
    Walking,
    Swimming,
    Eating,
    Sleeping,
    Meditating,
}

impl BehavioralState {
    /// Locked states suppress automatic reclassification until their
    /// episode ends
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Eating | Self::Sleeping | Self::Meditating)
    }

    /// Lowercase tag used in prompts and logs
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Swimming => "swimming",
            Self::Eating => "eating",
            Self::Sleeping => "sleeping",
            Self::Meditating => "meditating",
        }
    }
}

/// Outcome of a user toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The toggle applied; this is the state after it
    Switched(BehavioralState),
    /// The action is unavailable in the current state
    Refused,
}

/// A scheduled end to an eating episode
#[derive(Debug, Clone, Copy)]
struct PendingUnlock {
    fires_at: Instant,
    revert_to: BehavioralState,
    token: u64,
}

/// The authoritative behavioral state
///
/// Every locked episode is stamped with a monotonically increasing
/// token. The deferred eating unlock remembers its episode's token and
/// only writes the revert state while that token is still current, so
/// an unlock that was superseded by a user toggle quietly no-ops.
#[derive(Debug)]
pub struct StateMachine {
    current: BehavioralState,
    lock_token: u64,
    pending_unlock: Option<PendingUnlock>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            current: BehavioralState::Idle,
            lock_token: 0,
            pending_unlock: None,
        }
    }

    pub fn current(&self) -> BehavioralState {
        self.current
    }

    pub fn is_locked(&self) -> bool {
        self.current.is_locked()
    }

    /// Apply the physics-derived classification
    ///
    /// Only `Idle`, `Walking`, and `Swimming` are valid candidates.
    /// No-op while a lock is active. Returns whether the state changed.
    pub fn apply_auto(&mut self, candidate: BehavioralState) -> bool {
        debug_assert!(!candidate.is_locked());
        if self.is_locked() || self.current == candidate {
            return false;
        }
        self.current = candidate;
        true
    }

    /// Force the eating lock after a consumption and schedule its end
    ///
    /// Several consumptions in one tick restart the episode each time;
    /// the newest schedule wins.
    pub fn begin_eating(&mut self, revert_to: BehavioralState, now: Instant, lock_for: Duration) {
        self.current = BehavioralState::Eating;
        self.lock_token += 1;
        self.pending_unlock = Some(PendingUnlock {
            fires_at: now + lock_for,
            revert_to,
            token: self.lock_token,
        });
    }

    /// Service the deferred unlock
    ///
    /// Fires at most once per episode. A pending unlock whose token was
    /// superseded is discarded without touching the state. Returns the
    /// new state when the unlock applied.
    pub fn service_unlock(&mut self, now: Instant) -> Option<BehavioralState> {
        let pending = self.pending_unlock?;
        if now < pending.fires_at {
            return None;
        }
        self.pending_unlock = None;
        if pending.token != self.lock_token {
            tracing::debug!("discarding stale eating unlock");
            return None;
        }
        self.current = pending.revert_to;
        Some(pending.revert_to)
    }

    /// User action: toggle sleeping on or off
    pub fn toggle_sleep(&mut self) -> ToggleOutcome {
        self.toggle_locked(BehavioralState::Sleeping, BehavioralState::Meditating)
    }

    /// User action: toggle meditating on or off
    pub fn toggle_meditate(&mut self) -> ToggleOutcome {
        self.toggle_locked(BehavioralState::Meditating, BehavioralState::Sleeping)
    }

    fn toggle_locked(&mut self, target: BehavioralState, other: BehavioralState) -> ToggleOutcome {
        if self.current == target {
            // Switching off goes straight to Idle, never back through
            // the water/movement classification.
            self.current = BehavioralState::Idle;
            self.lock_token += 1;
            return ToggleOutcome::Switched(BehavioralState::Idle);
        }
        if self.current == other || self.current == BehavioralState::Swimming {
            return ToggleOutcome::Refused;
        }
        // Entering from Idle, Walking, or Eating starts a new locked
        // episode; any pending eating unlock becomes stale.
        self.current = target;
        self.lock_token += 1;
        ToggleOutcome::Switched(target)
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
