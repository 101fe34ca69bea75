//! Persisted top-score table.
//!
//! Submitting appends, sorts by score (highest first, ties keep insertion
//! order) and truncates to [`LEADERBOARD_CAPACITY`].

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::LEADERBOARD_CAPACITY;

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("leaderboard I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("leaderboard file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Record a score. Returns its 0-based rank, or `None` if it did not make the table.
    pub fn submit(&mut self, name: impl Into<String>, score: u64) -> Option<usize> {
        self.entries.push(ScoreEntry {
            name: name.into(),
            score,
        });
        let inserted = self.entries.len() - 1;
        // Stable sort: equal scores keep their submission order.
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[b].score.cmp(&self.entries[a].score));
        let rank = order.iter().position(|&i| i == inserted);

        let mut sorted: Vec<ScoreEntry> = order
            .into_iter()
            .map(|i| self.entries[i].clone())
            .collect();
        sorted.truncate(LEADERBOARD_CAPACITY);
        self.entries = sorted;

        rank.filter(|&r| r < LEADERBOARD_CAPACITY)
    }

    /// Whether `score` would enter the table.
    pub fn qualifies(&self, score: u64) -> bool {
        self.entries.len() < LEADERBOARD_CAPACITY
            || self.entries.last().is_some_and(|last| score > last.score)
    }

    /// Load from `path`. A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, LeaderboardError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let mut board: Leaderboard = serde_json::from_str(&json)?;
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));
        board.entries.truncate(LEADERBOARD_CAPACITY);
        Ok(board)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), LeaderboardError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), entries = self.entries.len(), "leaderboard saved");
        Ok(())
    }
}
