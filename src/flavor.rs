//! Flavor-text collaborator
//!
//! Pre-race trash talk and post-crash commentary come from an injected,
//! possibly remote, text source. Requests queue up for a single worker thread
//! and are polled without blocking; errors, empty replies and timeouts all
//! resolve to fixed fallback lines. Nothing here feeds back into the simulation.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::FlavorError;
use crate::sim::catalog::RivalProfile;

/// Replacement lines when the collaborator can't deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallbacks {
    /// Collaborator answered with nothing
    pub empty: &'static str,
    /// Collaborator failed or ran out of time
    pub failed: &'static str,
}

pub const TAUNT_FALLBACKS: Fallbacks = Fallbacks {
    empty: "Prepare to eat my pixelated dust!",
    failed: "I'm the bad guy, and I'm faster than you!",
};

pub const COMMENTARY_FALLBACKS: Fallbacks = Fallbacks {
    empty: "Total wipeout! Try again, dude!",
    failed: "Game Over! Insert Coin to Try Again.",
};

/// Default time a request may take before its fallback is shown
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Requests that may wait behind the one in flight. Beyond this, new requests
/// resolve to their fallback straight away.
pub const QUEUE_DEPTH: usize = 4;

type Reply = Result<String, FlavorError>;
type Job = Box<dyn FnOnce() + Send>;

/// Source of short advisory text. Calls may block; they run on a worker.
pub trait FlavorText: Send + Sync {
    /// One-line trash talk aimed at the run's opponent
    fn rival_taunt(&self, rival: &RivalProfile) -> Result<String, FlavorError>;

    /// Short recap of a finished run
    fn race_commentary(&self, score: u64, cause: &str) -> Result<String, FlavorError>;
}

/// A pending or resolved piece of flavor text
#[derive(Debug)]
pub struct FlavorSlot {
    rx: Option<Receiver<Reply>>,
    deadline: Instant,
    fallbacks: Fallbacks,
    text: Option<String>,
}

impl FlavorSlot {
    fn pending(rx: Receiver<Reply>, timeout: Duration, fallbacks: Fallbacks) -> Self {
        Self {
            rx: Some(rx),
            deadline: Instant::now() + timeout,
            fallbacks,
            text: None,
        }
    }

    fn failed(fallbacks: Fallbacks) -> Self {
        Self {
            rx: None,
            deadline: Instant::now(),
            fallbacks,
            text: Some(fallbacks.failed.to_string()),
        }
    }

    /// Text if it has arrived (or its fallback kicked in), `None` while loading.
    /// Once resolved the text never changes; late replies are dropped.
    pub fn poll(&mut self) -> Option<&str> {
        if self.text.is_none() {
            let outcome = match &self.rx {
                Some(rx) => match rx.try_recv() {
                    Ok(reply) => Some(reply),
                    Err(TryRecvError::Empty) if Instant::now() < self.deadline => None,
                    Err(TryRecvError::Empty) => Some(Err(FlavorError::TimedOut)),
                    Err(TryRecvError::Disconnected) => Some(Err(FlavorError::Disconnected)),
                },
                None => Some(Err(FlavorError::Disconnected)),
            };
            if let Some(reply) = outcome {
                self.resolve(reply);
            }
        }
        self.text.as_deref()
    }

    /// Whether the text is still on its way
    pub fn is_pending(&self) -> bool {
        self.text.is_none()
    }

    fn resolve(&mut self, reply: Reply) {
        let text = match reply {
            Ok(text) if text.trim().is_empty() => self.fallbacks.empty.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                log::warn!("Flavor text unavailable: {e}");
                self.fallbacks.failed.to_string()
            }
        };
        self.text = Some(text);
        self.rx = None;
    }
}

/// Sends requests to a [`FlavorText`] on one long-lived worker thread.
/// Clones share the worker, which exits once every clone is dropped.
#[derive(Clone)]
pub struct FlavorDispatcher {
    client: Arc<dyn FlavorText>,
    jobs: Option<SyncSender<Job>>,
    timeout: Duration,
}

impl std::fmt::Debug for FlavorDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlavorDispatcher")
            .field("timeout", &self.timeout)
            .field("worker", &self.jobs.is_some())
            .finish_non_exhaustive()
    }
}

impl FlavorDispatcher {
    pub fn new(client: Arc<dyn FlavorText>, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::sync_channel::<Job>(QUEUE_DEPTH);
        let spawned = thread::Builder::new()
            .name("flavor-worker".to_string())
            .spawn(move || {
                for job in rx {
                    job();
                }
            });
        let jobs = match spawned {
            Ok(_) => Some(tx),
            Err(e) => {
                log::warn!("Could not start flavor worker: {e}");
                None
            }
        };
        Self {
            client,
            jobs,
            timeout,
        }
    }

    /// Ask for a pre-race taunt against `rival`
    pub fn taunt(&self, rival: &'static RivalProfile) -> FlavorSlot {
        let client = Arc::clone(&self.client);
        self.submit("taunt", TAUNT_FALLBACKS, move || client.rival_taunt(rival))
    }

    /// Ask for commentary on a finished run
    pub fn commentary(&self, score: u64, cause: &str) -> FlavorSlot {
        let client = Arc::clone(&self.client);
        let cause = cause.to_string();
        self.submit("commentary", COMMENTARY_FALLBACKS, move || {
            client.race_commentary(score, &cause)
        })
    }

    fn submit<F>(&self, what: &str, fallbacks: Fallbacks, request: F) -> FlavorSlot
    where
        F: FnOnce() -> Reply + Send + 'static,
    {
        let Some(jobs) = &self.jobs else {
            return FlavorSlot::failed(fallbacks);
        };
        let (tx, rx) = mpsc::channel();
        let job: Job = Box::new(move || {
            // Receiver may be gone if the slot was dropped; nothing to do then
            let _ = tx.send(request());
        });
        match jobs.try_send(job) {
            Ok(()) => FlavorSlot::pending(rx, self.timeout, fallbacks),
            Err(TrySendError::Full(_)) => {
                log::warn!("Flavor queue full, dropping {what} request");
                FlavorSlot::failed(fallbacks)
            }
            Err(TrySendError::Disconnected(_)) => {
                log::warn!("Flavor worker gone, dropping {what} request");
                FlavorSlot::failed(fallbacks)
            }
        }
    }
}

/// Offline flavor source: stock rival taunts and canned announcer lines
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedFlavor;

impl FlavorText for CannedFlavor {
    fn rival_taunt(&self, rival: &RivalProfile) -> Result<String, FlavorError> {
        Ok(rival.taunt.to_string())
    }

    fn race_commentary(&self, score: u64, cause: &str) -> Result<String, FlavorError> {
        let line = match score {
            0..=99 => format!(
                "Bogus! Anton wiped out on a {cause} before the synths even kicked in."
            ),
            100..=999 => format!(
                "Radical start, {score} meters of menace, then total wipeout on a {cause}!"
            ),
            _ => format!(
                "{score} meters of pure neon villainy until a {cause} crashed the party. Gnarly!"
            ),
        };
        Ok(line)
    }
}
