//! Per-frame simulation step
//!
//! One `tick` advances the game exactly one frame: spawn trials, paddle
//! tracking, star/bomb resolution, particle decay, effect timers, high
//! score. The simulation only moves while `Playing`; every other phase
//! handles its transition command and returns untouched.

use glam::Vec2;
use rand::Rng;

use super::state::{FallingObject, GamePhase, GameState, ObjectKind};
use crate::consts::STAR_POINTS;
use crate::tuning::Tuning;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Current pointer position in play-area coordinates
    pub pointer: Vec2,
    /// Leave the menu and begin playing
    pub start: bool,
    /// Toggle pause (no effect in Menu or GameOver)
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
    pub activate_shield: bool,
    pub activate_slow_time: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput, tuning: &Tuning) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset();
            }
            return;
        }
        GamePhase::Paused => return,
        GamePhase::Playing => {}
    }

    if input.activate_shield {
        state.activate_shield(tuning);
    }
    if input.activate_slow_time {
        state.activate_slow_time(tuning);
    }

    spawn_objects(state, tuning);

    let area = state.area;
    state.player.update(input.pointer, area);

    resolve_stars(state);
    resolve_bombs(state);

    for particle in state.particles.iter_mut() {
        particle.advance();
    }
    state.particles.retain(|p| !p.is_expired());

    if state.slow_time_active {
        state.slow_time_timer = state.slow_time_timer.saturating_sub(1);
        if state.slow_time_timer == 0 {
            state.slow_time_active = false;
        }
    }

    if state.score > state.high_score {
        state.high_score = state.score;
    }
}

/// Independent Bernoulli trial per kind per frame. A star spawn may
/// carry a bonus charge with it.
fn spawn_objects(state: &mut GameState, tuning: &Tuning) {
    state.spawn_timer += 1;

    let star_chance = tuning.star_spawn.at(state.score).clamp(0.0, 1.0);
    if state.rng.random_bool(star_chance) {
        let star = FallingObject::spawn(
            ObjectKind::Star,
            &mut state.rng,
            state.area,
            state.score,
            tuning,
        );
        state.stars.push(star);
        if state.rng.random_bool(tuning.powerup_chance.clamp(0.0, 1.0)) {
            if state.rng.random_bool(0.5) {
                state.shield_count += 1;
            } else {
                state.slow_time_count += 1;
            }
        }
    }

    let bomb_chance = tuning.bomb_spawn.at(state.score).clamp(0.0, 1.0);
    if state.rng.random_bool(bomb_chance) {
        let bomb = FallingObject::spawn(
            ObjectKind::Bomb,
            &mut state.rng,
            state.area,
            state.score,
            tuning,
        );
        state.bombs.push(bomb);
    }
}

/// Advance every star, then keep only the ones still in play. The
/// collection is taken out of the state and rebuilt by retention, so
/// removal never skips or double-processes an entry.
fn resolve_stars(state: &mut GameState) {
    let mut stars = std::mem::take(&mut state.stars);
    stars.retain_mut(|star| {
        star.advance(state.slow_time_active);
        if star.rect.intersects(&state.player.rect) {
            state.score += STAR_POINTS;
            state.spawn_explosion(star.rect.center());
            false
        } else if star.rect.top() > state.area.y {
            state.missed += 1;
            false
        } else {
            true
        }
    });
    state.stars = stars;
}

/// Same retention pass for bombs. A shielded hit spends the shield; an
/// unshielded hit ends the run. Either way the bomb explodes. Bombs
/// that fall past the bottom vanish without penalty.
fn resolve_bombs(state: &mut GameState) {
    let mut bombs = std::mem::take(&mut state.bombs);
    bombs.retain_mut(|bomb| {
        bomb.advance(state.slow_time_active);
        if bomb.rect.intersects(&state.player.rect) {
            state.spawn_explosion(bomb.rect.center());
            if state.player.shield_active {
                state.player.shield_active = false;
                state.player.shield_timer = 0;
            } else {
                state.phase = GamePhase::GameOver;
            }
            false
        } else if bomb.rect.top() > state.area.y {
            false
        } else {
            true
        }
    });
    state.bombs = bombs;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BOMB_SIZE, PLAY_HEIGHT, PLAY_WIDTH, STAR_SIZE};
    use crate::sim::rect::Rect;
    use crate::sim::state::ObjectColor;
    use crate::tuning::RateCurve;

    fn area() -> Vec2 {
        Vec2::new(PLAY_WIDTH, PLAY_HEIGHT)
    }

    /// Tuning with spawning disabled, so tests control every entity
    fn quiet_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        let off = RateCurve {
            base: 0.0,
            divisor: 1.0,
            cap: 0.0,
        };
        tuning.star_spawn = off;
        tuning.bomb_spawn = off;
        tuning
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, area(), 0);
        state.phase = GamePhase::Playing;
        state
    }

    /// Input that parks the paddle exactly where it already is
    fn hold_input(state: &GameState) -> FrameInput {
        FrameInput {
            pointer: state.player.rect.center(),
            ..FrameInput::default()
        }
    }

    fn star_at(center: Vec2) -> FallingObject {
        FallingObject {
            rect: Rect::from_center(center, STAR_SIZE, STAR_SIZE),
            speed: 0.0,
            kind: ObjectKind::Star,
            color: ObjectColor::Gold,
        }
    }

    fn bomb_at(center: Vec2) -> FallingObject {
        FallingObject {
            rect: Rect::from_center(center, BOMB_SIZE, BOMB_SIZE),
            speed: 0.0,
            kind: ObjectKind::Bomb,
            color: ObjectColor::Hazard,
        }
    }

    #[test]
    fn test_paused_tick_changes_nothing() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        state.stars.push(star_at(Vec2::new(100.0, 100.0)));
        state.bombs.push(bomb_at(Vec2::new(200.0, 100.0)));
        state.score = 30;
        state.missed = 2;
        state.phase = GamePhase::Paused;
        let before_star_y = state.stars[0].rect.y;
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert_eq!(state.score, 30);
        assert_eq!(state.missed, 2);
        assert_eq!(state.stars.len(), 1);
        assert_eq!(state.bombs.len(), 1);
        assert_eq!(state.stars[0].rect.y, before_star_y);
        assert_eq!(state.spawn_timer, 0);
    }

    #[test]
    fn test_game_over_tick_changes_nothing() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        state.stars.push(star_at(Vec2::new(100.0, 100.0)));
        state.score = 30;
        state.phase = GamePhase::GameOver;
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert_eq!(state.score, 30);
        assert_eq!(state.stars.len(), 1);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_menu_waits_for_start() {
        let tuning = quiet_tuning();
        let mut state = GameState::new(1, area(), 0);
        tick(&mut state, &FrameInput::default(), &tuning);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.spawn_timer, 0);
        let input = FrameInput {
            start: true,
            ..FrameInput::default()
        };
        tick(&mut state, &input, &tuning);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_toggles_only_from_play_states() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        let pause = FrameInput {
            pause: true,
            ..hold_input(&state)
        };
        tick(&mut state, &pause, &tuning);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &pause, &tuning);
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        tick(&mut state, &pause, &tuning);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_caught_star_scores_and_explodes() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        let center = state.player.rect.center();
        state.stars.push(star_at(center));
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert_eq!(state.score, 10);
        assert_eq!(state.missed, 0);
        assert!(state.stars.is_empty());
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_fallen_star_counts_as_missed() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        let mut star = star_at(Vec2::new(100.0, 100.0));
        star.rect.y = PLAY_HEIGHT + 1.0;
        state.stars.push(star);
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert_eq!(state.missed, 1);
        assert_eq!(state.score, 0);
        assert!(state.stars.is_empty());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_star_still_falling_is_kept() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        let mut star = star_at(Vec2::new(100.0, 100.0));
        star.speed = 4.0;
        state.stars.push(star);
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert_eq!(state.stars.len(), 1);
        assert_eq!(state.stars[0].rect.y, 100.0 - STAR_SIZE / 2.0 + 4.0);
    }

    #[test]
    fn test_bomb_without_shield_ends_the_run() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        let center = state.player.rect.center();
        state.bombs.push(bomb_at(center));
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.bombs.is_empty());
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_shield_absorbs_one_bomb() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        state.shield_count = 1;
        state.activate_shield(&tuning);
        let center = state.player.rect.center();
        state.bombs.push(bomb_at(center));
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.bombs.is_empty());
        assert!(!state.player.shield_active);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_bomb_past_bottom_is_free() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        let mut bomb = bomb_at(Vec2::new(100.0, 100.0));
        bomb.rect.y = PLAY_HEIGHT + 1.0;
        state.bombs.push(bomb);
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert!(state.bombs.is_empty());
        assert_eq!(state.missed, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_restart_resets_but_keeps_high_score() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        state.score = 70;
        state.high_score = 70;
        state.phase = GamePhase::GameOver;
        let input = FrameInput {
            restart: true,
            ..FrameInput::default()
        };
        tick(&mut state, &input, &tuning);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 70);
    }

    #[test]
    fn test_high_score_follows_score() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        state.score = 45;
        state.high_score = 20;
        let center = state.player.rect.center();
        state.stars.push(star_at(center));
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert_eq!(state.score, 55);
        assert_eq!(state.high_score, 55);
    }

    #[test]
    fn test_slow_time_expires() {
        let tuning = quiet_tuning();
        let mut state = playing_state();
        state.slow_time_active = true;
        state.slow_time_timer = 2;
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert!(state.slow_time_active);
        let input = hold_input(&state);
        tick(&mut state, &input, &tuning);
        assert!(!state.slow_time_active);
        assert_eq!(state.slow_time_timer, 0);
    }

    #[test]
    fn test_default_tuning_eventually_spawns() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        let input = FrameInput {
            pointer: Vec2::new(PLAY_WIDTH / 2.0, PLAY_HEIGHT - 125.0),
            ..FrameInput::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input, &tuning);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert!(state.spawn_timer > 0);
        // With a 3% star rate per frame something must have fallen
        assert!(
            !state.stars.is_empty()
                || state.missed > 0
                || state.score > 0
                || !state.bombs.is_empty()
                || state.phase == GamePhase::GameOver
        );
    }
}
