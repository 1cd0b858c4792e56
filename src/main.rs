//! Pondling - Entry Point
//!
//! Sets up the async runtime and an interactive loop for poking the
//! creature: stepping ticks, holding movement keys, toggling sleep and
//! meditation, and running the live frame-cadence driver.

use pondling::core::config::SimConfig;
use pondling::core::error::Result;
use pondling::creature::state::ToggleOutcome;
use pondling::llm::client::LlmClient;
use pondling::llm::gate::ThoughtOutcome;
use pondling::sim::driver::run_driver;
use pondling::sim::input::MoveKey;
use pondling::sim::snapshot::PondSnapshot;
use pondling::sim::tick::run_tick;
use pondling::world::pond::Pond;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tokio::runtime::Runtime;
use tokio::sync::watch;

#[derive(Parser)]
#[command(name = "pondling", about = "Autonomous pond creature simulation")]
struct Args {
    /// RNG seed for reproducible food spawning
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML config file (defaults apply for omitted fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run this many ticks headless, print the final state, and exit
    #[arg(long)]
    ticks: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pondling=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };

    tracing::info!("Pondling starting...");

    let rt = Runtime::new()?;

    let mut now = Instant::now();
    let mut pond = match args.seed {
        Some(seed) => Pond::with_seed(config, seed, now),
        None => Pond::new(config, now),
    };

    // Optional - the creature runs fine without a thought collaborator
    let client = LlmClient::from_env().ok().map(Arc::new);
    if client.is_none() {
        tracing::warn!("LLM_API_KEY not set - running without generated thoughts");
    }

    // Headless mode: step at the nominal cadence and report
    if let Some(ticks) = args.ticks {
        for _ in 0..ticks {
            now += pond.config.tick_interval();
            run_tick(&mut pond, now);
            resolve_thoughts(&rt, &mut pond, client.as_ref(), now);
        }
        let snapshot = PondSnapshot::capture(&pond, now);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("\n=== PONDLING ===");
    println!("One small creature, one small pond");
    println!();
    println!("Commands:");
    println!("  tick / t           - Advance simulation by one tick");
    println!("  run <n>            - Run n ticks at nominal cadence");
    println!("  hold <u|d|l|r>...  - Hold movement keys (e.g. 'hold l u')");
    println!("  release            - Release all movement keys");
    println!("  sleep              - Toggle sleeping");
    println!("  meditate           - Toggle meditating");
    println!("  live <secs>        - Run the real-time driver for n seconds");
    println!("  status / s         - Show detailed status");
    println!("  quit / q           - Exit");
    println!();

    loop {
        display_status(&pond, now);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            now += pond.config.tick_interval();
            run_tick(&mut pond, now);
            resolve_thoughts(&rt, &mut pond, client.as_ref(), now);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if let Ok(n) = rest.trim().parse::<u64>() {
                for _ in 0..n {
                    now += pond.config.tick_interval();
                    run_tick(&mut pond, now);
                    resolve_thoughts(&rt, &mut pond, client.as_ref(), now);
                }
                println!("Completed {} ticks. Now at tick {}.", n, pond.current_tick);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("hold") {
            let mut held = 0;
            for word in rest.split_whitespace() {
                if let Some(key) = parse_key(word) {
                    pond.input.press(key);
                    held += 1;
                } else {
                    println!("Unknown key '{}' (use u, d, l, r)", word);
                }
            }
            if held == 0 {
                println!("Usage: hold <u|d|l|r>...");
            }
            continue;
        }

        if input == "release" {
            pond.input.clear();
            continue;
        }

        if input == "sleep" {
            match pond.toggle_sleep(now) {
                ToggleOutcome::Switched(state) => println!("Now {}.", state.tag()),
                ToggleOutcome::Refused => println!("Can't sleep right now."),
            }
            continue;
        }

        if input == "meditate" {
            match pond.toggle_meditate(now) {
                ToggleOutcome::Switched(state) => {
                    println!("Now {}.", state.tag());
                    resolve_thoughts(&rt, &mut pond, client.as_ref(), now);
                }
                ToggleOutcome::Refused => println!("Can't meditate right now."),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("live ") {
            if let Ok(secs) = rest.trim().parse::<u64>() {
                println!("Running live for {} seconds...", secs);
                rt.block_on(async {
                    let (stop_tx, stop_rx) = watch::channel(false);
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_secs(secs)).await;
                        let _ = stop_tx.send(true);
                    });
                    run_driver(&mut pond, client.clone(), stop_rx).await;
                });
                now = Instant::now();
                println!("Live run done. Now at tick {}.", pond.current_tick);
            } else {
                println!("Usage: live <seconds>");
            }
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&pond, now);
            continue;
        }

        println!("Unknown command. Available: tick, run <n>, hold, release, sleep, meditate, live <secs>, status, quit");
    }

    println!(
        "\nGoodbye! Final state: tick {}, {} food items uneaten.",
        pond.current_tick,
        pond.foods.len()
    );
    Ok(())
}

/// Block on any queued thought jobs and apply their responses
///
/// The interactive loop trades the driver's detached tasks for a
/// synchronous wait; the gate sees the same outcome messages either
/// way.
fn resolve_thoughts(rt: &Runtime, pond: &mut Pond, client: Option<&Arc<LlmClient>>, now: Instant) {
    let jobs = pond.take_thought_jobs();
    if jobs.is_empty() {
        return;
    }
    let sender = pond.results_sender();
    for job in jobs {
        let text = match client {
            Some(client) => match rt.block_on(client.generate_thought(job.tag, &job.stats)) {
                Ok(text) => Some(text),
                Err(error) => {
                    tracing::warn!(%error, "thought generation failed");
                    None
                }
            },
            None => None,
        };
        let _ = sender.send(ThoughtOutcome {
            epoch: job.epoch,
            text,
        });
    }
    pond.drain_thoughts(now);
}

fn parse_key(word: &str) -> Option<MoveKey> {
    match word {
        "u" | "up" => Some(MoveKey::Up),
        "d" | "down" => Some(MoveKey::Down),
        "l" | "left" => Some(MoveKey::Left),
        "r" | "right" => Some(MoveKey::Right),
        _ => None,
    }
}

/// Display a brief status summary
fn display_status(pond: &Pond, now: Instant) {
    let snapshot = PondSnapshot::capture(pond, now);
    println!();
    println!(
        "--- Tick {} | ({:.0}, {:.0}) facing {:?} | {} ---",
        snapshot.tick,
        snapshot.x,
        snapshot.y,
        snapshot.direction,
        snapshot.state.tag()
    );
    println!(
        "  Hunger {:.0}%  Chill {:.0}%  Energy {:.0}%  Food on ground: {}",
        snapshot.hunger,
        snapshot.chill,
        snapshot.energy,
        snapshot.food.len()
    );
    if let Some(thought) = &snapshot.thought {
        if !thought.expired {
            println!("  \"{}\"", thought.text);
        }
    }
    println!();
}

/// Display detailed status including every food item
fn display_detailed_status(pond: &Pond, now: Instant) {
    let snapshot = PondSnapshot::capture(pond, now);
    println!();
    println!("=== Detailed Status (Tick {}) ===", snapshot.tick);
    println!(
        "  Position: ({:.1}, {:.1}), facing {:?}",
        snapshot.x, snapshot.y, snapshot.direction
    );
    println!("  State: {}", snapshot.state.tag());
    println!(
        "  Stats: hunger {:.2}, chill {:.2}, energy {:.2}",
        snapshot.hunger, snapshot.chill, snapshot.energy
    );
    println!("  Food ({} items):", snapshot.food.len());
    for item in &snapshot.food {
        println!("    {:?} at ({:.0}, {:.0})", item.kind, item.x, item.y);
    }
    match &snapshot.thought {
        Some(thought) => println!(
            "  Thought: \"{}\" ({}ms old{})",
            thought.text,
            thought.age_ms,
            if thought.expired { ", expired" } else { "" }
        ),
        None => println!("  Thought: none yet"),
    }
    println!();
}
