//! High score leaderboard
//!
//! Tracks the top 10 finished sessions. Storage is left to the front end;
//! the board imports and exports itself as JSON.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::state::GameVariant;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
    pub variant: GameVariant,
    /// Caller-supplied timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(
        &mut self,
        score: u64,
        level: u32,
        variant: GameVariant,
        timestamp: f64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            variant,
            timestamp,
        };

        // Sorted descending by score; ties keep the older entry first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Import a board saved by [`HighScores::to_json`].
    ///
    /// Entries are re-sorted and trimmed, so a hand-edited file can't break
    /// the ordering.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut scores: Self = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
