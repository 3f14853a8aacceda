//! Run state machine and tick driver
//!
//! `Game` owns the run session, the RNG and the collaborators. It turns
//! per-frame timestamps into fixed simulation steps (Idle → Running → Over),
//! reports the end of each run exactly once, and keeps flavor text and
//! best-score bookkeeping off the simulation's critical path.

use std::ops::ControlFlow;

use rand_pcg::Pcg32;

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::error::ConfigError;
use crate::flavor::{FlavorDispatcher, FlavorSlot};
use crate::highscores::{BestScoreStore, MemoryStore};
use crate::input::LaneControl;
use crate::sim::rng::{self, RandomSource};
use crate::sim::{RIVALS, RivalProfile, RunResult, RunSession, tick};
use crate::tuning::Tuning;

pub use crate::sim::RunPhase;

/// Notifications for whoever renders and persists the game
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A fresh run began against `opponent`
    RunStarted { opponent: &'static RivalProfile },
    /// The run crashed. Emitted exactly once per run.
    RunEnded { result: RunResult, new_best: bool },
}

/// Result of asking for one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Tick ran, run continues
    Continued,
    /// Tick ran and ended the run
    Terminated,
    /// No run active, nothing happened
    Inactive,
}

/// The game: one run at a time
pub struct Game<R: RandomSource = Pcg32> {
    tuning: Tuning,
    rng: R,
    phase: RunPhase,
    /// Live while Running, frozen while Over
    session: Option<RunSession>,
    result: Option<RunResult>,
    controls: LaneControl,
    store: Box<dyn BestScoreStore>,
    best_score: u64,
    flavor: Option<FlavorDispatcher>,
    opponent: Option<&'static RivalProfile>,
    taunt: Option<FlavorSlot>,
    commentary: Option<FlavorSlot>,
    events: Vec<GameEvent>,
    accumulator_ms: f64,
    last_frame_ms: Option<f64>,
}

impl Game<Pcg32> {
    /// Game driven by a seeded PCG stream
    pub fn seeded(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        Self::new(tuning, rng::seeded(seed))
    }
}

impl<R: RandomSource> Game<R> {
    /// Validate `tuning` and build an idle game. Best score starts at 0 until
    /// a store is attached.
    pub fn new(tuning: Tuning, rng: R) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let controls = LaneControl::new(tuning.lane_count);
        Ok(Self {
            tuning,
            rng,
            phase: RunPhase::Idle,
            session: None,
            result: None,
            controls,
            store: Box::new(MemoryStore::new()),
            best_score: 0,
            flavor: None,
            opponent: None,
            taunt: None,
            commentary: None,
            events: Vec::new(),
            accumulator_ms: 0.0,
            last_frame_ms: None,
        })
    }

    /// Attach a best-score store; its value is read once, here
    pub fn with_store(mut self, store: Box<dyn BestScoreStore>) -> Self {
        self.best_score = store.best();
        self.store = store;
        self
    }

    /// Attach a flavor-text collaborator
    pub fn with_flavor(mut self, flavor: FlavorDispatcher) -> Self {
        self.flavor = Some(flavor);
        self
    }

    // === Commands ===

    /// Begin a fresh run (from Idle, or as a restart from Over).
    /// Ignored while a run is already in progress.
    pub fn start(&mut self) {
        if self.phase == RunPhase::Running {
            return;
        }

        let opponent = &RIVALS[self.rng.pick_index(RIVALS.len())];
        self.session = Some(RunSession::new(&self.tuning));
        self.result = None;
        self.commentary = None;
        self.accumulator_ms = 0.0;
        self.last_frame_ms = None;
        self.controls.arm();
        self.phase = RunPhase::Running;

        self.opponent = Some(opponent);
        self.taunt = self.flavor.as_ref().map(|f| f.taunt(opponent));
        log::info!("Run started vs {} ({})", opponent.name, opponent.era);
        self.events.push(GameEvent::RunStarted { opponent });
    }

    /// Back to the title screen from a finished run; drops the snapshot
    pub fn go_home(&mut self) {
        if self.phase != RunPhase::Over {
            return;
        }
        self.clear_run();
        log::info!("Returned to title");
    }

    /// Abandon the current run without a result. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.phase != RunPhase::Running {
            return;
        }
        self.clear_run();
        log::info!("Run abandoned");
    }

    /// Shift the player one lane (`-1` left, `+1` right)
    pub fn request_lane_change(&self, direction: i32) -> usize {
        self.controls.request_lane_change(direction)
    }

    /// Handle for an independent input source
    pub fn controls(&self) -> LaneControl {
        self.controls.clone()
    }

    // === Ticking ===

    /// Per-frame callback. Converts the elapsed time into fixed steps and
    /// returns `Break` once there is nothing left to schedule.
    pub fn frame(&mut self, now_ms: f64) -> ControlFlow<()> {
        if self.phase != RunPhase::Running {
            return ControlFlow::Break(());
        }

        let dt = match self.last_frame_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.accumulator_ms += dt;

        let mut substeps = 0;
        while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            self.accumulator_ms -= SIM_DT_MS;
            substeps += 1;
            if self.step() == StepOutcome::Terminated {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Advance exactly one fixed simulation step
    pub fn step(&mut self) -> StepOutcome {
        if self.phase != RunPhase::Running {
            return StepOutcome::Inactive;
        }
        let Some(session) = self.session.as_mut() else {
            return StepOutcome::Inactive;
        };

        let lane = self.controls.lane();
        let report = tick(session, lane, &mut self.rng, &self.tuning, SIM_DT_MS);
        match report.crash {
            Some(crash) => {
                self.finish(crash.cause);
                StepOutcome::Terminated
            }
            None => StepOutcome::Continued,
        }
    }

    fn finish(&mut self, cause: &str) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let result = session.finish(cause);
        self.phase = RunPhase::Over;
        self.controls.disarm();

        let new_best = match self.store.submit(&result) {
            Ok(new_best) => new_best,
            Err(e) => {
                log::warn!("Could not record best score: {e}");
                result.final_score > self.best_score
            }
        };
        if new_best {
            self.best_score = result.final_score;
            log::info!("New best score: {}", result.final_score);
        }
        log::info!(
            "Run over: {} points, hit {} after {} ticks",
            result.final_score,
            result.cause,
            result.ticks
        );

        self.commentary = self
            .flavor
            .as_ref()
            .map(|f| f.commentary(result.final_score, &result.cause));
        self.events.push(GameEvent::RunEnded {
            result: result.clone(),
            new_best,
        });
        self.result = Some(result);
    }

    fn clear_run(&mut self) {
        self.controls.disarm();
        self.phase = RunPhase::Idle;
        self.session = None;
        self.result = None;
        self.opponent = None;
        self.taunt = None;
        self.commentary = None;
        self.accumulator_ms = 0.0;
        self.last_frame_ms = None;
    }

    // === Queries ===

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Current (Running) or final (Over) session
    pub fn session(&self) -> Option<&RunSession> {
        self.session.as_ref()
    }

    /// Result of the finished run, while Over
    pub fn result(&self) -> Option<&RunResult> {
        self.result.as_ref()
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Rival picked as this run's opponent
    pub fn opponent(&self) -> Option<&'static RivalProfile> {
        self.opponent
    }

    /// Score shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.session.as_ref().map_or(0, RunSession::display_score)
    }

    /// Speed shown on the HUD
    pub fn display_speed_kmh(&self) -> u32 {
        self.session
            .as_ref()
            .map_or(0, |s| crate::display_speed_kmh(s.player.track_speed))
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pre-race taunt, once it has arrived (`None` while loading or disabled)
    pub fn taunt(&mut self) -> Option<&str> {
        self.taunt.as_mut().and_then(FlavorSlot::poll)
    }

    /// Post-crash commentary, once it has arrived
    pub fn commentary(&mut self) -> Option<&str> {
        self.commentary.as_mut().and_then(FlavorSlot::poll)
    }

    /// Whether commentary was requested and is still on its way
    pub fn commentary_pending(&self) -> bool {
        self.commentary.as_ref().is_some_and(FlavorSlot::is_pending)
    }
}
