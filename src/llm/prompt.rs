//! Creature context for thought prompts
//!
//! Builds the state summary handed to the text-generation collaborator
//! so thoughts reflect what the creature is doing and how it feels.

use crate::creature::state::BehavioralState;
use crate::creature::stats::Stats;

/// System prompt establishing the creature's voice
pub const SYSTEM_PROMPT: &str = "You are the inner voice of a small pond creature. \
Given its current activity and vitals, reply with exactly one short first-person \
thought, under 15 words, no quotation marks.";

/// Snapshot of creature state serialized into the user prompt
pub struct ThoughtContext {
    pub tag: BehavioralState,
    pub hunger: f32,
    pub chill: f32,
    pub energy: f32,
}

impl ThoughtContext {
    pub fn new(tag: BehavioralState, stats: &Stats) -> Self {
        Self {
            tag,
            hunger: stats.hunger,
            chill: stats.chill,
            energy: stats.energy,
        }
    }

    /// Generate the user prompt text
    pub fn summary(&self) -> String {
        format!(
            "Currently {}. Hunger {:.0}/100, chill {:.0}/100, energy {:.0}/100.",
            self.tag.tag(),
            self.hunger,
            self.chill,
            self.energy
        )
    }
}
