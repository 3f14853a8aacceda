//! Lane Runner headless driver
//!
//! Plays runs on a fixed 16ms timer with the demo autopilot at the wheel,
//! logs what happens and keeps the best score on disk.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use lane_runner::flavor::{CannedFlavor, FlavorDispatcher};
use lane_runner::sim::autopilot;
use lane_runner::{Game, GameEvent, HighScores, MemoryStore, Settings};

/// Frame period of the headless timer
const FRAME_MS: f64 = 16.0;

#[derive(Debug, Parser)]
#[command(name = "lane-runner", about = "Headless lane runner simulation")]
struct Args {
    /// Settings file (JSON)
    #[arg(long, default_value = "lane_runner.json")]
    settings: PathBuf,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of runs to play
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Frame budget per run before giving up
    #[arg(long, default_value_t = 60 * 60 * 10)]
    max_frames: u32,

    /// Keep the player in the center lane instead of dodging
    #[arg(long)]
    no_autopilot: bool,

    /// Sleep between frames so a run takes real time
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Lane Runner (headless) starting...");

    let settings = Settings::load(&args.settings);
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
    log::info!("Seed: {seed}");

    let mut game = Game::seeded(settings.tuning.clone(), seed).context("invalid tuning")?;
    game = match &settings.best_score_path {
        Some(path) => game.with_store(Box::new(HighScores::load(path))),
        None => game.with_store(Box::new(MemoryStore::new())),
    };
    if settings.flavor_text {
        let flavor = FlavorDispatcher::new(Arc::new(CannedFlavor), settings.flavor_timeout());
        game = game.with_flavor(flavor);
    }
    println!("Best score: {:06}", game.best_score());

    for run in 1..=args.runs {
        play_run(&mut game, &args, run, settings.flavor_text);
        game.go_home();
    }
    Ok(())
}

fn play_run(game: &mut Game, args: &Args, run: u32, flavor_text: bool) {
    game.start();
    let controls = game.controls();
    let mut clock = 0.0;

    for _ in 0..args.max_frames {
        if !args.no_autopilot {
            if let Some(session) = game.session() {
                let lane = controls.lane();
                if let Some(direction) = autopilot::choose_direction(session, game.tuning(), lane) {
                    controls.request_lane_change(direction);
                }
            }
        }

        if game.frame(clock) == ControlFlow::Break(()) {
            break;
        }
        clock += FRAME_MS;
        if args.realtime {
            std::thread::sleep(Duration::from_millis(FRAME_MS as u64));
        }
    }
    let finished = game.result().is_some();
    if !finished {
        log::warn!("Run {run} hit the frame budget, abandoning");
        game.stop();
    }

    for event in game.drain_events() {
        match event {
            GameEvent::RunStarted { opponent } => {
                println!("Run {run}: Anton vs {} ({})", opponent.name, opponent.era);
            }
            GameEvent::RunEnded { result, new_best } => {
                println!(
                    "WASTED  score {:06}  cause: {}  top speed {} km/h{}",
                    result.final_score,
                    result.cause,
                    lane_runner::display_speed_kmh(result.top_speed),
                    if new_best { "  NEW BEST!" } else { "" }
                );
            }
        }
    }

    if !flavor_text || !finished {
        return;
    }
    if let Some(taunt) = wait_for(|| game.taunt().map(str::to_string)) {
        println!("  taunt: \"{taunt}\"");
    }
    if let Some(line) = wait_for(|| game.commentary().map(str::to_string)) {
        println!("  commentary: \"{line}\"");
    }
}

/// Poll a flavor slot until it resolves. Slots carry their own timeout, so
/// this only gives up as a last resort.
fn wait_for(mut poll: impl FnMut() -> Option<String>) -> Option<String> {
    for _ in 0..1000 {
        if let Some(text) = poll() {
            return Some(text);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    None
}
