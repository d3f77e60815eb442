//! # Persistence Module
//!
//! JSON save files for run progress and the score history board.
//!
//! A save stores where the run left off (level, moves, banked score) plus
//! the best historical scores. Loading is forgiving: a missing or corrupt
//! file just means a fresh game.

use crate::config::MAX_HISTORY;
use crate::MazecrawlResult;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serializable snapshot of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    /// Level the run is on
    pub level: u32,
    /// Moves taken on the current level
    pub move_count: u32,
    /// Score banked across completed levels
    pub total_score: u64,
    /// Best final scores of past runs, descending
    pub history: Vec<u64>,
}

impl SaveData {
    /// A fresh run at level 1 with an empty history.
    pub fn new_run() -> Self {
        Self {
            level: 1,
            move_count: 0,
            total_score: 0,
            history: Vec::new(),
        }
    }

    /// Records a finished-run score on the history board, keeping only the
    /// top [`MAX_HISTORY`] entries.
    pub fn record_score(&mut self, score: u64) {
        self.history.push(score);
        self.history.sort_unstable_by(|a, b| b.cmp(a));
        self.history.truncate(MAX_HISTORY);
    }

    /// The best historical score, or 0 when none is recorded.
    pub fn best_score(&self) -> u64 {
        self.history.first().copied().unwrap_or(0)
    }

    /// Writes the save as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> MazecrawlResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reads a save if one exists.
    ///
    /// Returns `Ok(None)` for a missing file; an unreadable or corrupt file
    /// is logged and treated the same way rather than killing the game.
    pub fn load(path: &Path) -> MazecrawlResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("save file {} unreadable: {}", path.display(), e);
                return Ok(None);
            }
        };
        match serde_json::from_str(&contents) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                warn!("save file {} corrupt: {}", path.display(), e);
                Ok(None)
            }
        }
    }
}

impl Default for SaveData {
    fn default() -> Self {
        Self::new_run()
    }
}
