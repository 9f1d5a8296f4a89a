//! Scene drawing
//!
//! Translates game state into `Surface` primitives. No game logic is
//! performed here; nothing in this module mutates the simulation.
//!
//! Draw order per frame is fixed back-to-front: background, particles,
//! stars, bombs, player, UI overlay. Game-over adds a dimming overlay
//! and centered text on top of everything.

use glam::Vec2;

use super::{Color, Surface, TextStyle};
use crate::sim::{
    FallingObject, GamePhase, GameState, ObjectColor, ObjectKind, Particle, ParticleColor, Player,
};

// Palette
const C_BG: Color = Color::rgb(5, 5, 25);
const C_PLAYER: Color = Color::rgb(0, 230, 255);
const C_STAR_GOLD: Color = Color::rgb(255, 255, 100);
const C_STAR_WHITE: Color = Color::rgb(255, 255, 255);
const C_BOMB: Color = Color::rgb(255, 50, 50);
const C_FUSE: Color = Color::rgb(255, 215, 0);
const C_SHIELD: Color = Color::rgb(50, 255, 50);
const C_SHIELD_RING: Color = Color::rgb(0, 255, 100);
const C_TEXT: Color = Color::rgb(255, 255, 255);
const C_TEXT_ALERT: Color = Color::rgb(255, 100, 100);
const C_TEXT_DIM: Color = Color::rgb(200, 200, 200);
const C_SLOW: Color = Color::rgb(255, 255, 0);
const C_PARTICLE_RED: Color = Color::rgb(255, 80, 80);
const C_PARTICLE_WHITE: Color = Color::rgb(255, 255, 255);

/// Alpha of the dimming overlay behind pause/game-over text
const OVERLAY_ALPHA: u8 = 180;

/// Render one complete frame
pub fn draw_frame<S: Surface>(state: &GameState, surface: &mut S) {
    surface.clear(C_BG);

    if state.phase == GamePhase::Menu {
        draw_menu(surface);
        return;
    }

    for particle in &state.particles {
        draw_particle(particle, surface);
    }
    for star in &state.stars {
        draw_object(star, surface);
    }
    for bomb in &state.bombs {
        draw_object(bomb, surface);
    }
    draw_player(&state.player, surface);
    draw_hud(state, surface);

    if state.phase == GamePhase::GameOver {
        draw_game_over(state, surface);
    }
}

/// Pause overlay, drawn by the host on top of the last frame
pub fn draw_pause<S: Surface>(surface: &mut S) {
    surface.fill_overlay(Color::rgb(0, 0, 0), OVERLAY_ALPHA);
    let h = surface.size().y;
    draw_centered(surface, "PAUSED", TextStyle::Large, C_TEXT, h / 2.0 - 50.0);
    draw_centered(
        surface,
        "Press ESC to Resume",
        TextStyle::Medium,
        C_TEXT,
        h / 2.0 + 20.0,
    );
}

fn draw_particle<S: Surface>(particle: &Particle, surface: &mut S) {
    if particle.radius <= 0.0 {
        return;
    }
    let color = match particle.color {
        ParticleColor::Red => C_PARTICLE_RED,
        ParticleColor::White => C_PARTICLE_WHITE,
    };
    surface.fill_circle(particle.pos.round(), particle.radius, color);
}

fn draw_object<S: Surface>(object: &FallingObject, surface: &mut S) {
    match object.kind {
        ObjectKind::Star => {
            let color = match object.color {
                ObjectColor::White => C_STAR_WHITE,
                _ => C_STAR_GOLD,
            };
            surface.fill_rect(object.rect, color, 6.0);
        }
        ObjectKind::Bomb => {
            let center = object.rect.center();
            let radius = object.rect.w / 2.0;
            surface.fill_circle(center, radius, C_BOMB);
            // Fuse poking out of the top; cosmetic, no collision
            let mut fuse = crate::sim::Rect::new(0.0, 0.0, 6.0, 14.0);
            fuse.set_center(Vec2::new(center.x, center.y - radius - 7.0));
            surface.fill_rect(fuse, C_FUSE, 0.0);
        }
    }
}

fn draw_player<S: Surface>(player: &Player, surface: &mut S) {
    let color = if player.shield_active { C_SHIELD } else { C_PLAYER };
    surface.fill_rect(player.rect, color, 10.0);
    if player.shield_active {
        surface.stroke_rect(player.rect.inflate(6.0), C_SHIELD_RING, 4.0, 16.0);
    }
}

fn draw_hud<S: Surface>(state: &GameState, surface: &mut S) {
    surface.text(
        Vec2::new(20.0, 20.0),
        &format!("Score: {}", state.score),
        TextStyle::Medium,
        C_TEXT,
    );
    surface.text(
        Vec2::new(20.0, 70.0),
        &format!("High Score: {}", state.high_score),
        TextStyle::Small,
        C_TEXT,
    );
    surface.text(
        Vec2::new(20.0, 110.0),
        &format!("Shields: {}", state.shield_count),
        TextStyle::Small,
        C_SHIELD,
    );
    surface.text(
        Vec2::new(20.0, 140.0),
        &format!("Slow Time: {}", state.slow_time_count),
        TextStyle::Small,
        C_SLOW,
    );
    surface.text(
        Vec2::new(20.0, 170.0),
        &format!("Missed: {}", state.missed),
        TextStyle::Small,
        C_TEXT_DIM,
    );

    if state.player.shield_active {
        draw_centered(surface, "SHIELD ACTIVE!", TextStyle::Small, C_SHIELD, 30.0);
    }
    if state.slow_time_active {
        draw_centered(surface, "SLOW TIME ACTIVE!", TextStyle::Small, C_SLOW, 60.0);
    }
}

fn draw_game_over<S: Surface>(state: &GameState, surface: &mut S) {
    surface.fill_overlay(Color::rgb(0, 0, 0), OVERLAY_ALPHA);
    let h = surface.size().y;
    draw_centered(
        surface,
        "GAME OVER!",
        TextStyle::Large,
        C_TEXT_ALERT,
        h / 2.0 - 100.0,
    );
    draw_centered(
        surface,
        &format!("Final Score: {}", state.score),
        TextStyle::Medium,
        C_TEXT,
        h / 2.0 - 30.0,
    );
    draw_centered(
        surface,
        "Press R to Restart or ESC to Quit",
        TextStyle::Small,
        C_TEXT,
        h / 2.0 + 40.0,
    );
}

fn draw_menu<S: Surface>(surface: &mut S) {
    let h = surface.size().y;
    draw_centered(
        surface,
        "Catch the Falling Stars",
        TextStyle::Large,
        C_TEXT,
        h / 2.0 - 100.0,
    );
    draw_centered(surface, "Bomb Edition", TextStyle::Medium, C_BOMB, h / 2.0 - 40.0);
    draw_centered(
        surface,
        "Press SPACE to Start",
        TextStyle::Medium,
        C_TEXT,
        h / 2.0 + 40.0,
    );
    draw_centered(
        surface,
        "Mouse or Arrows to move, S Shield, T Slow Time, ESC Pause, Q Quit",
        TextStyle::Small,
        C_TEXT_DIM,
        h / 2.0 + 100.0,
    );
}

fn draw_centered<S: Surface>(surface: &mut S, text: &str, style: TextStyle, color: Color, y: f32) {
    let x = (surface.size().x - surface.text_size(text, style).x) / 2.0;
    surface.text(Vec2::new(x, y), text, style, color);
}
