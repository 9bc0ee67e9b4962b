mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use space_invaders::app::{App, AppState, FrameInput};
use space_invaders::assets::{AssetLoader, DirAssetLoader, FONT};
use space_invaders::audio::{AudioSink, SilentAudio};
use space_invaders::constants::{FIELD_HEIGHT, FIELD_WIDTH, FRAME_RATE};
use space_invaders::entities::PlayerInput;
use space_invaders::scene::Viewport;

const FRAME: Duration = Duration::from_micros(1_000_000 / FRAME_RATE as u64);

/// Longest frame the simulation will accept; stalls (terminal resize,
/// suspended process) are clamped so the wave does not teleport.
const MAX_DT: f32 = 0.1;

const LOG_FILE: &str = "space_invaders.log";

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Input collection ──────────────────────────────────────────────────────────

/// Drain every pending terminal event (non-blocking) into one frame's input.
///
/// Input model: instead of acting on each key event individually, a
/// `key_frame` map records the frame number of the last press/repeat event
/// for every key.  Keys still "fresh" this frame count as held, so Space and
/// a direction can be held at the same time.
///
/// * **Keyboard-enhancement capable** terminals send `Release` events →
///   keys are removed immediately.
/// * **Classic terminals** only send `Press` (OS key-repeat shows as
///   repeated `Press`) → keys expire after `HOLD_WINDOW` frames of silence.
fn collect_input(
    rx: &mpsc::Receiver<Event>,
    key_frame: &mut HashMap<KeyCode, u64>,
    frame: u64,
    view: &Viewport,
) -> FrameInput {
    let mut input = FrameInput::default();

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
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            input.closed = true;
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            input.closed = true;
                        }
                        KeyCode::Enter
                        | KeyCode::Char('s')
                        | KeyCode::Char('S')
                        | KeyCode::Char('r')
                        | KeyCode::Char('R') => input.start = true,
                        KeyCode::Char('x') | KeyCode::Char('X') => input.exit = true,
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
                kind: MouseEventKind::Down(_),
                column,
                row,
                ..
            }) => input.clicks.push(view.to_world(column, row)),
            _ => {}
        }
    }

    input.player = PlayerInput {
        left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        fire: is_held(key_frame, &KeyCode::Char(' '), frame),
    };
    input
}

// ── Main loop ─────────────────────────────────────────────────────────────────

/// One loop for every state: gather input, step the app, draw, pace.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    loader: &impl AssetLoader,
    audio: &mut impl AudioSink,
) -> anyhow::Result<()> {
    let mut app = App::new();
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let dt = frame_start
            .duration_since(last_frame)
            .as_secs_f32()
            .min(MAX_DT);
        last_frame = frame_start;

        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, FIELD_WIDTH, FIELD_HEIGHT);

        let input = collect_input(rx, &mut key_frame, frame, &view);
        if app.step(&input, dt, &mut rng, loader, audio) == AppState::Exit {
            break;
        }

        display::render(out, &app, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }

    if let Some(session) = app.session() {
        tracing::info!(score = session.score, level = session.wave.level, "last session");
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// `info` unless `directives` (the `RUST_LOG` value) says otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn init_logging() -> anyhow::Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[cfg(feature = "audio")]
fn open_audio() -> Box<dyn AudioSink> {
    match space_invaders::audio::RodioAudio::try_default() {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            tracing::warn!(error = %e, "no audio device; continuing silently");
            Box::new(SilentAudio)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_audio() -> Box<dyn AudioSink> {
    Box::new(SilentAudio)
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let loader = DirAssetLoader::new(".");
    // Without the font there is nothing to show; abort before touching the
    // terminal.
    let font = loader.load_font(FONT).context("loading font")?;
    tracing::info!(bytes = font.data.len(), "starting");

    let mut audio = open_audio();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never blocks on I/O.
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

    let result = run(&mut out, &rx, &loader, &mut audio);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting with error");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).to_string(), "info");
        assert_eq!(log_filter(Some("")).to_string(), "info");
    }

    #[test]
    fn log_filter_follows_rust_log() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(log_filter(Some("warn")).to_string(), "warn");
        assert_eq!(
            log_filter(Some("space_invaders=trace")).to_string(),
            "space_invaders=trace"
        );
    }

    #[test]
    fn held_key_expires_after_window() {
        let mut key_frame = HashMap::new();
        key_frame.insert(KeyCode::Char(' '), 10);
        assert!(is_held(&key_frame, &KeyCode::Char(' '), 10 + HOLD_WINDOW));
        assert!(!is_held(&key_frame, &KeyCode::Char(' '), 11 + HOLD_WINDOW));
        assert!(!is_held(&key_frame, &KeyCode::Left, 10));
    }
}
