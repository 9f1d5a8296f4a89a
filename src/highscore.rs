//! High-score persistence
//!
//! One non-negative integer as decimal ASCII in a flat file. Reads
//! default to 0 on any failure; writes are best-effort and never
//! interrupt play.

use std::path::{Path, PathBuf};

/// The persisted best score plus the file it lives in
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Read the stored score, treating a missing or malformed file as 0
    pub fn load(path: &Path) -> Self {
        let best = std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);
        if best > 0 {
            log::info!("Loaded high score {best} from {}", path.display());
        }
        Self {
            path: path.to_path_buf(),
            best,
        }
    }

    /// Best score seen so far (persisted value)
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Write-through: persist `score` if it beats the stored best.
    /// Write failures are logged and swallowed.
    pub fn record(&mut self, score: u32) {
        if score <= self.best {
            return;
        }
        self.best = score;
        if let Err(e) = std::fs::write(&self.path, score.to_string()) {
            log::warn!("Failed to write high score to {}: {e}", self.path.display());
        }
    }

    /// Default location: `~/.starfall_score`, falling back to the
    /// working directory when HOME is unset
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".starfall_score")
    }
}
