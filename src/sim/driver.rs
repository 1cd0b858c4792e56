//! Async tick driver
//!
//! Owns no simulation state of its own: it schedules ticks at the
//! display-frame cadence, hands honored thought jobs to the client as
//! detached tasks, and funnels their completions back into the pond.
//! Dropping the loop cancels the tick interval and the spawner
//! deadline with it; in-flight thought tasks resolve into a closed
//! channel and are ignored.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

use crate::llm::client::LlmClient;
use crate::llm::gate::ThoughtOutcome;
use crate::sim::tick::run_tick;
use crate::world::pond::Pond;

/// Drive the pond until `shutdown` flips to true
pub async fn run_driver(
    pond: &mut Pond,
    client: Option<Arc<LlmClient>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(pond.config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        interval_ms = pond.config.tick_interval_ms,
        "tick driver started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let events = run_tick(pond, now);
                for event in &events {
                    tracing::trace!(?event, "tick event");
                }
                dispatch_jobs(pond, client.as_ref());
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    tracing::info!(tick = pond.current_tick, "tick driver stopped");
}

/// Spawn a detached generation task for every honored request
fn dispatch_jobs(pond: &mut Pond, client: Option<&Arc<LlmClient>>) {
    for job in pond.take_thought_jobs() {
        let sender = pond.results_sender();
        match client {
            Some(client) => {
                let client = Arc::clone(client);
                tokio::spawn(async move {
                    let text = match client.generate_thought(job.tag, &job.stats).await {
                        Ok(text) => Some(text),
                        Err(error) => {
                            tracing::warn!(%error, "thought generation failed");
                            None
                        }
                    };
                    // Receiver gone means shutdown; the response is
                    // simply ignored.
                    let _ = sender.send(ThoughtOutcome {
                        epoch: job.epoch,
                        text,
                    });
                });
            }
            None => {
                // No collaborator configured: resolve as a failure so
                // the busy flag clears.
                let _ = sender.send(ThoughtOutcome {
                    epoch: job.epoch,
                    text: None,
                });
            }
        }
    }
}
