//! Debounce gate in front of the text-generation collaborator
//!
//! The gate owns every piece of request bookkeeping: the last dispatch
//! time, the busy flag, the request epoch, and the current thought.
//! Callers never see the collaborator directly; they ask the gate for
//! permission and later hand completed responses back to it.

use std::time::{Duration, Instant};

use crate::creature::state::BehavioralState;
use crate::creature::stats::Stats;
use crate::creature::thought::Thought;

/// A request the gate has honored, ready for dispatch
#[derive(Debug, Clone)]
pub struct ThoughtJob {
    pub epoch: u64,
    pub tag: BehavioralState,
    pub stats: Stats,
}

/// Completion of a dispatched job
///
/// `text` is `None` when the collaborator failed; failures clear the
/// busy flag without touching the current thought.
#[derive(Debug, Clone)]
pub struct ThoughtOutcome {
    pub epoch: u64,
    pub text: Option<String>,
}

/// Rate limiter and response arbiter for thought requests
pub struct ThoughtGate {
    debounce: Duration,
    last_dispatch: Option<Instant>,
    busy: bool,
    epoch: u64,
    current: Option<Thought>,
}

impl ThoughtGate {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_dispatch: None,
            busy: false,
            epoch: 0,
            current: None,
        }
    }

    /// Whether a request is in flight
    ///
    /// Exposed so callers can refuse actions (meditate) while pending.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn current(&self) -> Option<&Thought> {
        self.current.as_ref()
    }

    /// Decide whether a request may go out
    ///
    /// Non-forced requests are refused inside the debounce window.
    /// Forced requests (consumption, meditate) bypass the window but
    /// still restart it. Every honored request bumps the epoch and
    /// returns it for tagging the eventual response.
    pub fn try_request(&mut self, now: Instant, forced: bool) -> Option<u64> {
        if !forced {
            if let Some(last) = self.last_dispatch {
                if now.saturating_duration_since(last) < self.debounce {
                    return None;
                }
            }
        }
        self.last_dispatch = Some(now);
        self.busy = true;
        self.epoch += 1;
        Some(self.epoch)
    }

    /// Apply a completed request if it is still the relevant one
    ///
    /// A single atomic mutation per response. Responses carrying a
    /// superseded epoch are dropped whole, so overlapping requests can
    /// never interleave their effects.
    pub fn apply(&mut self, outcome: ThoughtOutcome, now: Instant) {
        if outcome.epoch != self.epoch {
            tracing::debug!(epoch = outcome.epoch, "dropping superseded thought response");
            return;
        }
        self.busy = false;
        match outcome.text {
            Some(text) => {
                tracing::debug!(%text, "thought arrived");
                self.current = Some(Thought::new(text, now));
            }
            None => tracing::warn!("thought generation failed, keeping previous thought"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> ThoughtGate {
        ThoughtGate::new(Duration::from_millis(5000))
    }

    #[test]
    fn test_first_request_always_honored() {
        let mut g = gate();
        assert!(g.try_request(Instant::now(), false).is_some());
        assert!(g.is_busy());
    }

    #[test]
    fn test_debounce_window() {
        let now = Instant::now();
        let mut g = gate();
        g.try_request(now, false);

        assert!(g
            .try_request(now + Duration::from_millis(4999), false)
            .is_none());
        assert!(g
            .try_request(now + Duration::from_millis(5000), false)
            .is_some());
    }

    #[test]
    fn test_forced_bypasses_and_restarts_window() {
        let now = Instant::now();
        let mut g = gate();
        g.try_request(now, false);

        // Forced goes through immediately
        assert!(g
            .try_request(now + Duration::from_millis(100), true)
            .is_some());

        // The window restarted at the forced dispatch
        assert!(g
            .try_request(now + Duration::from_millis(5000), false)
            .is_none());
        assert!(g
            .try_request(now + Duration::from_millis(5100), false)
            .is_some());
    }

    #[test]
    fn test_success_sets_thought_and_clears_busy() {
        let now = Instant::now();
        let mut g = gate();
        let epoch = g.try_request(now, false).unwrap();

        g.apply(
            ThoughtOutcome {
                epoch,
                text: Some("mmm, orange".into()),
            },
            now + Duration::from_millis(300),
        );

        assert!(!g.is_busy());
        assert_eq!(g.current().unwrap().text, "mmm, orange");
    }

    #[test]
    fn test_failure_clears_busy_keeps_thought() {
        let now = Instant::now();
        let mut g = gate();
        let epoch = g.try_request(now, false).unwrap();
        g.apply(
            ThoughtOutcome {
                epoch,
                text: Some("splash".into()),
            },
            now,
        );

        let epoch = g.try_request(now + Duration::from_millis(6000), false).unwrap();
        g.apply(
            ThoughtOutcome { epoch, text: None },
            now + Duration::from_millis(6500),
        );

        assert!(!g.is_busy());
        assert_eq!(g.current().unwrap().text, "splash");
    }

    #[test]
    fn test_superseded_response_dropped() {
        let now = Instant::now();
        let mut g = gate();
        let first = g.try_request(now, true).unwrap();
        let second = g.try_request(now + Duration::from_millis(10), true).unwrap();

        // The newer response lands first
        g.apply(
            ThoughtOutcome {
                epoch: second,
                text: Some("new".into()),
            },
            now + Duration::from_millis(200),
        );
        // The stale one resolves later and must change nothing
        g.apply(
            ThoughtOutcome {
                epoch: first,
                text: Some("old".into()),
            },
            now + Duration::from_millis(300),
        );

        assert!(!g.is_busy());
        assert_eq!(g.current().unwrap().text, "new");
    }

    #[test]
    fn test_stale_failure_does_not_clear_busy() {
        let now = Instant::now();
        let mut g = gate();
        let first = g.try_request(now, true).unwrap();
        let _second = g.try_request(now + Duration::from_millis(10), true).unwrap();

        g.apply(
            ThoughtOutcome {
                epoch: first,
                text: None,
            },
            now + Duration::from_millis(100),
        );

        // The second request is still in flight
        assert!(g.is_busy());
    }
}
