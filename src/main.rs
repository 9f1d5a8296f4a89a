//! Starfall terminal host
//!
//! Owns everything the simulation treats as a collaborator: terminal
//! setup/teardown, input polling, the frame-rate limiter, and the
//! high-score file. One dedicated thread performs blocking event reads
//! and forwards them over a channel so the frame loop never waits on
//! I/O; the loop itself runs drain-input → tick → draw → present →
//! sleep at a fixed rate.

use std::collections::HashMap;
use std::io::{BufWriter, Stdout, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal,
};
use glam::Vec2;

use starfall::consts::{PLAY_HEIGHT, PLAY_WIDTH};
use starfall::render::scene;
use starfall::render::term::TermSurface;
use starfall::sim::{FrameInput, GamePhase, GameState, tick};
use starfall::{HighScoreStore, Tuning};

/// Pointer movement per frame while an arrow key is held, in logical px
const KEY_NUDGE: f32 = 14.0;

/// A key counts as "held" if its last press/repeat arrived within this
/// many frames. Classic terminals emit no release events; OS key-repeat
/// refreshes the timestamp faster than this window expires.
const HOLD_WINDOW: u64 = 4;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Map a terminal cell to the logical play area
fn cell_to_logical(col: u16, row: u16, cols: u16, rows: u16) -> Vec2 {
    Vec2::new(
        (col as f32 + 0.5) / cols.max(1) as f32 * PLAY_WIDTH,
        (row as f32 + 0.5) / rows.max(1) as f32 * PLAY_HEIGHT,
    )
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    log::info!("Starfall starting");

    let tuning = Tuning::load(&Tuning::default_path());
    let store = HighScoreStore::load(&HighScoreStore::default_path());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Blocking event reads live on their own thread; the frame loop only
    // ever drains the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, tuning, store);

    // Always restore the terminal, even when the loop errored
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Starfall exiting");
    result
}

fn run(
    out: &mut BufWriter<Stdout>,
    rx: &mpsc::Receiver<Event>,
    tuning: Tuning,
    mut store: HighScoreStore,
) -> std::io::Result<()> {
    let frame_budget = Duration::from_secs(1) / tuning.fps.max(1);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Session seed {seed}");

    let area = Vec2::new(PLAY_WIDTH, PLAY_HEIGHT);
    let mut state = GameState::new(seed, area, store.best());

    let (mut cols, mut rows) = terminal::size()?;
    let mut surface = TermSurface::new(cols, rows, area);

    // The pointer persists across frames; mouse events overwrite it,
    // held arrow keys nudge it.
    let mut pointer = state.player.rect.center();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut input = FrameInput {
            pointer,
            ..FrameInput::default()
        };

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Esc => {
                                if state.phase == GamePhase::GameOver {
                                    return Ok(());
                                }
                                input.pause = true;
                            }
                            KeyCode::Char(' ') => input.start = true,
                            KeyCode::Char('r') | KeyCode::Char('R') => input.restart = true,
                            KeyCode::Char('s') | KeyCode::Char('S') => {
                                input.activate_shield = true;
                            }
                            KeyCode::Char('t') | KeyCode::Char('T') => {
                                input.activate_slow_time = true;
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
                    column,
                    row,
                    ..
                }) => {
                    pointer = cell_to_logical(column, row, cols, rows);
                }
                Event::Resize(c, r) => {
                    cols = c;
                    rows = r;
                    surface = TermSurface::new(cols, rows, area);
                }
                _ => {}
            }
        }

        // Keyboard-only play: arrows (or A/D) steer the pointer
        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);
        if left {
            pointer.x = (pointer.x - KEY_NUDGE).max(0.0);
        }
        if right {
            pointer.x = (pointer.x + KEY_NUDGE).min(PLAY_WIDTH);
        }
        input.pointer = pointer;

        tick(&mut state, &input, &tuning);

        // Write-through: the store only touches the file on a new best
        store.record(state.high_score);

        scene::draw_frame(&state, &mut surface);
        if state.phase == GamePhase::Paused {
            scene::draw_pause(&mut surface);
        }
        surface.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}
