//! Data-driven game balance
//!
//! Spawn chances and fall speeds scale with the current score through
//! saturating curves. The exact shape is a difficulty knob, not a
//! contract, so all of it lives in one serde struct that can be
//! overridden from a JSON file next to the high-score file. Defaults
//! reproduce the shipped balance.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A saturating score curve: `base + min(score / divisor, cap)`.
/// Monotone non-decreasing in score, clamped at `base + cap`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateCurve {
    pub base: f64,
    pub divisor: f64,
    pub cap: f64,
}

impl RateCurve {
    pub fn at(&self, score: u32) -> f64 {
        self.base + (score as f64 / self.divisor).min(self.cap)
    }
}

/// Fall-speed bounds, each rising with score on its own saturating
/// curve. `range` yields the `(lo, hi)` pair a spawn speed is drawn from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedCurve {
    pub lo: RateCurve,
    pub hi: RateCurve,
}

impl SpeedCurve {
    pub fn range(&self, score: u32) -> (f32, f32) {
        (self.lo.at(score) as f32, self.hi.at(score) as f32)
    }
}

/// All difficulty/balance parameters in one place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Target frame rate; timed effects are stored in frames of this
    pub fps: u32,
    /// Per-frame star spawn chance
    pub star_spawn: RateCurve,
    /// Per-frame bomb spawn chance
    pub bomb_spawn: RateCurve,
    /// Star fall speed in pixels/frame
    pub star_speed: SpeedCurve,
    /// Bomb fall speed in pixels/frame
    pub bomb_speed: SpeedCurve,
    /// Chance that a star spawn also awards a power-up charge
    pub powerup_chance: f64,
    /// Shield duration in seconds once activated
    pub shield_secs: u32,
    /// Slow-time duration in seconds once activated
    pub slow_time_secs: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: 60,
            star_spawn: RateCurve {
                base: 0.03,
                divisor: 1500.0,
                cap: 0.06,
            },
            bomb_spawn: RateCurve {
                base: 0.007,
                divisor: 3000.0,
                cap: 0.03,
            },
            star_speed: SpeedCurve {
                lo: RateCurve {
                    base: 3.0,
                    divisor: 100.0,
                    cap: 12.0,
                },
                hi: RateCurve {
                    base: 5.0,
                    divisor: 80.0,
                    cap: 14.0,
                },
            },
            bomb_speed: SpeedCurve {
                lo: RateCurve {
                    base: 4.0,
                    divisor: 80.0,
                    cap: 16.0,
                },
                hi: RateCurve {
                    base: 6.0,
                    divisor: 60.0,
                    cap: 18.0,
                },
            },
            powerup_chance: 0.1,
            shield_secs: 5,
            slow_time_secs: 4,
        }
    }
}

impl Tuning {
    /// Shield duration in frames
    pub fn shield_frames(&self) -> u32 {
        self.fps * self.shield_secs
    }

    /// Slow-time duration in frames
    pub fn slow_time_frames(&self) -> u32 {
        self.fps * self.slow_time_secs
    }

    /// Load tuning overrides from a JSON file. Missing or unparsable
    /// files fall back to defaults without surfacing an error.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Default location: `~/.starfall.json`, next to the high-score
    /// file, falling back to the working directory when HOME is unset
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".starfall.json")
    }
}
