//! Best score store
//!
//! The game only needs two things from storage: the best score so far, and a
//! compare-and-write after each run. Where it lives is up to the store.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::sim::RunResult;

/// Read accessor plus compare-and-write for the best score
pub trait BestScoreStore: Send {
    /// Best score recorded so far (0 if none)
    fn best(&self) -> u64;

    /// Record `result` if it beats the stored best. Returns whether it did.
    fn submit(&mut self, result: &RunResult) -> Result<bool, StoreError>;
}

/// The best run on record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// What ended the record run
    pub cause: String,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// In-memory store (tests, or when persistence is off)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub entry: Option<HighScoreEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(score: u64) -> Self {
        Self {
            entry: Some(HighScoreEntry {
                score,
                cause: String::new(),
                timestamp: 0,
            }),
        }
    }
}

impl BestScoreStore for MemoryStore {
    fn best(&self) -> u64 {
        self.entry.as_ref().map(|e| e.score).unwrap_or(0)
    }

    fn submit(&mut self, result: &RunResult) -> Result<bool, StoreError> {
        if result.final_score <= self.best() {
            return Ok(false);
        }
        self.entry = Some(entry_for(result));
        Ok(true)
    }
}

/// Best score persisted as a small JSON file
#[derive(Debug, Clone)]
pub struct HighScores {
    path: PathBuf,
    entry: Option<HighScoreEntry>,
}

impl HighScores {
    /// Load the record from `path`. A missing file means no record yet; an
    /// unreadable or malformed one is reported and treated the same way.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entry = match Self::read(&path) {
            Ok(Some(entry)) => {
                log::info!("Loaded best score {} from {}", entry.score, path.display());
                Some(entry)
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                None
            }
            Err(e) => {
                log::warn!("Ignoring best score file {}: {e}", path.display());
                None
            }
        };
        Self { path, entry }
    }

    fn read(path: &Path) -> Result<Option<HighScoreEntry>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Write the current record to disk
    pub fn save(&self) -> Result<(), StoreError> {
        let Some(entry) = &self.entry else {
            return Ok(());
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(entry)?;
        fs::write(&self.path, json)?;
        log::info!("Best score saved ({})", entry.score);
        Ok(())
    }

    pub fn entry(&self) -> Option<&HighScoreEntry> {
        self.entry.as_ref()
    }
}

impl BestScoreStore for HighScores {
    fn best(&self) -> u64 {
        self.entry.as_ref().map(|e| e.score).unwrap_or(0)
    }

    fn submit(&mut self, result: &RunResult) -> Result<bool, StoreError> {
        if result.final_score <= self.best() {
            return Ok(false);
        }
        let previous = self.entry.replace(entry_for(result));
        if let Err(e) = self.save() {
            self.entry = previous;
            return Err(e);
        }
        Ok(true)
    }
}

fn entry_for(result: &RunResult) -> HighScoreEntry {
    HighScoreEntry {
        score: result.final_score,
        cause: result.cause.clone(),
        timestamp: now_ms(),
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
