//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here, owned by a single
//! `GameState` aggregate. The RNG is seeded and owned by the state so a
//! run is reproducible from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen, waiting for the start command
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen, overlay shown
    Paused,
    /// A bomb got through; waiting for restart or quit
    GameOver,
}

/// Particle tint, chosen at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    Red,
    White,
}

/// A short-lived decaying point used for explosion effects
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: ParticleColor,
    /// Remaining lifetime in frames
    pub life: u32,
}

impl Particle {
    /// Spawn one burst member at the explosion point
    pub fn new(pos: Vec2, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(-8.0..-2.0)),
            radius: rng.random_range(4..=7) as f32,
            color: if rng.random_bool(0.5) {
                ParticleColor::Red
            } else {
                ParticleColor::White
            },
            life: rng.random_range(20..=40),
        }
    }

    /// Gravity, integration, decay. One frame.
    pub fn advance(&mut self) {
        self.vel.y += PARTICLE_GRAVITY;
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.radius = (self.radius - PARTICLE_SHRINK).max(0.0);
    }

    /// Eviction test for the owner's collection
    pub fn is_expired(&self) -> bool {
        self.life == 0 || self.radius <= 0.0
    }
}

/// What a falling object is, which decides both its danger and its look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Star,
    Bomb,
}

/// Render tint, fixed at spawn. Bombs are always `Hazard`; stars pick
/// one of the two bright variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectColor {
    Gold,
    White,
    Hazard,
}

/// A moving rectangular entity, either collectible or hazardous
#[derive(Debug, Clone, Copy)]
pub struct FallingObject {
    pub rect: Rect,
    /// Fall speed in pixels/frame, sampled once at spawn
    pub speed: f32,
    pub kind: ObjectKind,
    pub color: ObjectColor,
}

impl FallingObject {
    /// Spawn at a random x just above the play area. The speed range
    /// widens with score so runs get harder the longer they last.
    pub fn spawn(
        kind: ObjectKind,
        rng: &mut Pcg32,
        area: Vec2,
        score: u32,
        tuning: &Tuning,
    ) -> Self {
        let (size, curve) = match kind {
            ObjectKind::Star => (STAR_SIZE, &tuning.star_speed),
            ObjectKind::Bomb => (BOMB_SIZE, &tuning.bomb_speed),
        };
        let x = rng.random_range(0.0..(area.x - size));
        let (lo, hi) = curve.range(score);
        let speed = if hi > lo { rng.random_range(lo..hi) } else { lo };
        let color = match kind {
            ObjectKind::Bomb => ObjectColor::Hazard,
            ObjectKind::Star => {
                if rng.random_bool(0.5) {
                    ObjectColor::White
                } else {
                    ObjectColor::Gold
                }
            }
        };
        Self {
            rect: Rect::new(x, -size, size, size),
            speed,
            kind,
            color,
        }
    }

    /// Move down one frame; slow time halves the descent
    pub fn advance(&mut self, slow_time_active: bool) {
        let factor = if slow_time_active { SLOW_TIME_FACTOR } else { 1.0 };
        self.rect.y += self.speed * factor;
    }
}

/// The user-controlled paddle
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub rect: Rect,
    pub shield_active: bool,
    /// Remaining shield duration in frames
    pub shield_timer: u32,
}

impl Player {
    pub fn new(area: Vec2) -> Self {
        Self {
            rect: Rect::new(
                (area.x - PLAYER_SIZE) / 2.0,
                area.y - 150.0,
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
            shield_active: false,
            shield_timer: 0,
        }
    }

    /// Follow the pointer, stay inside the play area, run the shield
    /// countdown. The clamped rect, not the raw pointer, is what later
    /// frames and collisions see.
    pub fn update(&mut self, pointer: Vec2, area: Vec2) {
        self.rect.set_center(pointer);
        self.rect = self
            .rect
            .clamped_to(&Rect::new(0.0, 0.0, area.x, area.y));
        if self.shield_active {
            self.shield_timer = self.shield_timer.saturating_sub(1);
            if self.shield_timer == 0 {
                self.shield_active = false;
            }
        }
    }
}

/// Complete game state: every entity collection, counter, and timer,
/// plus the seeded RNG that drives spawning
#[derive(Debug, Clone)]
pub struct GameState {
    /// Play-area extent in logical pixels
    pub area: Vec2,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub stars: Vec<FallingObject>,
    pub bombs: Vec<FallingObject>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Stars that reached the bottom uncaught
    pub missed: u32,
    pub shield_count: u32,
    pub slow_time_count: u32,
    pub slow_time_active: bool,
    pub slow_time_timer: u32,
    /// Best score seen, session or persisted
    pub high_score: u32,
    /// Frames spent in Playing since the last reset
    pub spawn_timer: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64, area: Vec2, high_score: u32) -> Self {
        Self {
            area,
            seed,
            phase: GamePhase::Menu,
            player: Player::new(area),
            stars: Vec::new(),
            bombs: Vec::new(),
            particles: Vec::new(),
            score: 0,
            missed: 0,
            shield_count: 0,
            slow_time_count: 0,
            slow_time_active: false,
            slow_time_timer: 0,
            high_score,
            spawn_timer: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Back to construction-time defaults, keeping the loaded high
    /// score and the play area. The RNG stream continues rather than
    /// reseeding, so a full session stays reproducible from its seed.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.player = Player::new(self.area);
        self.stars.clear();
        self.bombs.clear();
        self.particles.clear();
        self.score = 0;
        self.missed = 0;
        self.shield_count = 0;
        self.slow_time_count = 0;
        self.slow_time_active = false;
        self.slow_time_timer = 0;
        self.spawn_timer = 0;
    }

    /// Consume one shield charge and raise the shield. No-op while the
    /// shield is already up or with nothing to spend.
    pub fn activate_shield(&mut self, tuning: &Tuning) {
        if self.shield_count == 0 || self.player.shield_active {
            return;
        }
        self.shield_count -= 1;
        self.player.shield_active = true;
        self.player.shield_timer = tuning.shield_frames();
    }

    /// Consume one slow-time charge and halve fall speeds for a while.
    /// Independent of the shield.
    pub fn activate_slow_time(&mut self, tuning: &Tuning) {
        if self.slow_time_count == 0 || self.slow_time_active {
            return;
        }
        self.slow_time_count -= 1;
        self.slow_time_active = true;
        self.slow_time_timer = tuning.slow_time_frames();
    }

    /// Burst of particles at a contact point
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        for _ in 0..PARTICLE_COUNT {
            let particle = Particle::new(pos, &mut self.rng);
            self.particles.push(particle);
        }
    }
}
