mod audio;
mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use dodge_arena::engine;
use dodge_arena::events::GameEvent;
use dodge_arena::session::{self, InputFrame, MenuSlot, SessionState};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Where the sound clips live, relative to the working directory.
const AUDIO_DIR: &str = "assets/audio";

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run the whole program against one session state.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we sample which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) into an [`InputFrame`], so diagonals and
/// attack-while-moving work with no interference.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut audio = audio::AudioManager::new(Path::new(AUDIO_DIR));
    let mut state = SessionState::new();
    let mut rng = thread_rng();

    // The session clock: milliseconds since the program started.
    let start = Instant::now();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let now_ms = start.elapsed().as_millis() as u64;

        let mut events: Vec<GameEvent> = Vec::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('1') => {
                            events.extend(session::apply_menu_input(
                                &mut state,
                                MenuSlot::One,
                                now_ms,
                                &mut rng,
                            ));
                        }
                        KeyCode::Char('2') => {
                            events.extend(session::apply_menu_input(
                                &mut state,
                                MenuSlot::Two,
                                now_ms,
                                &mut rng,
                            ));
                        }
                        KeyCode::Char('3') => {
                            events.extend(session::apply_menu_input(
                                &mut state,
                                MenuSlot::Three,
                                now_ms,
                                &mut rng,
                            ));
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            session::toggle_pause(&mut state);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            session::request_restart(&mut state);
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            let enabled = audio.is_enabled();
                            audio.set_enabled(!enabled);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Sample held keys into this tick's input ───────────────────────────
        let input = InputFrame {
            up: is_held(&key_frame, &KeyCode::Up, frame),
            down: is_held(&key_frame, &KeyCode::Down, frame),
            left: is_held(&key_frame, &KeyCode::Left, frame),
            right: is_held(&key_frame, &KeyCode::Right, frame),
            attack: is_held(&key_frame, &KeyCode::Char(' '), frame),
            dash: is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame),
        };

        events.extend(engine::tick(&mut state, &input, now_ms, &mut rng));

        for event in &events {
            match event {
                GameEvent::Sound(cue) => audio.play(*cue),
                GameEvent::Victory | GameEvent::Defeat => {
                    let summary = state.summary();
                    log::info!(
                        "run over: score {} at level {} ({:?}, {:?})",
                        summary.score,
                        summary.level,
                        summary.mode,
                        summary.difficulty
                    );
                }
                _ => {}
            }
        }

        display::render(out, &state, now_ms)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let _ = env_logger::Builder::from_default_env().try_init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
