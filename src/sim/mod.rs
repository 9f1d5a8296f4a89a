//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only (one tick per frame, no wall-clock time)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod rect;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{
    FallingObject, GamePhase, GameState, ObjectColor, ObjectKind, Particle, ParticleColor, Player,
};
pub use tick::{FrameInput, tick};
