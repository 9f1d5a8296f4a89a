//! Starfall - catch the falling stars, dodge the bombs
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `render`: Surface trait, scene drawing, terminal backend
//! - `tuning`: Data-driven difficulty/balance parameters
//! - `highscore`: One-line high-score file persistence

pub mod highscore;
pub mod render;
pub mod sim;
pub mod tuning;

pub use highscore::HighScoreStore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical play area the simulation runs in, in pixels. Backends
    /// scale this onto whatever output they actually have.
    pub const PLAY_WIDTH: f32 = 1280.0;
    pub const PLAY_HEIGHT: f32 = 720.0;

    /// Entity sizes (square bounding boxes)
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const STAR_SIZE: f32 = 30.0;
    pub const BOMB_SIZE: f32 = 40.0;

    /// Points awarded per caught star
    pub const STAR_POINTS: u32 = 10;

    /// Particles spawned per explosion burst
    pub const PARTICLE_COUNT: usize = 40;
    /// Downward acceleration applied to particles each frame
    pub const PARTICLE_GRAVITY: f32 = 0.3;
    /// Radius shrink per frame (floor 0)
    pub const PARTICLE_SHRINK: f32 = 0.15;

    /// Fall-speed multiplier while slow time is active
    pub const SLOW_TIME_FACTOR: f32 = 0.5;
}
