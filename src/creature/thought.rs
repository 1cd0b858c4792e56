//! Thoughts produced by the text-generation collaborator

use std::time::{Duration, Instant};

/// A generated thought, stamped when its response arrived
///
/// At most one thought is current at a time; a newer one replaces it
/// regardless of expiry. Expiry itself is a display concern decided by
/// readers via [`Thought::is_expired`].
#[derive(Debug, Clone)]
pub struct Thought {
    pub text: String,
    pub created_at: Instant,
}

impl Thought {
    pub fn new(text: impl Into<String>, created_at: Instant) -> Self {
        Self {
            text: text.into(),
            created_at,
        }
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    /// Whether the thought has outlived its display window
    pub fn is_expired(&self, now: Instant, display_for: Duration) -> bool {
        self.age(now) >= display_for
    }
}
