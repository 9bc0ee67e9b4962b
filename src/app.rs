//! Top-level state machine: Menu → Playing → GameOver → … → Exit.
//!
//! The front-end calls `App::step` exactly once per frame from a single
//! loop, whatever the current state is.  Each entry into `Playing` loads
//! the session assets and starts a brand-new session.

use rand::Rng;

use crate::assets::{AssetLoader, SessionAssets};
use crate::audio::AudioSink;
use crate::compute::{init_session, tick};
use crate::constants::FIELD_WIDTH;
use crate::entities::{PlayerInput, Rect, SessionState, SessionStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Playing,
    GameOver,
    Exit,
}

// ── Menu ──────────────────────────────────────────────────────────────────────

const TITLE_SIZE: f32 = 50.0;
const OPTION_SIZE: f32 = 30.0;
/// Rough glyph advance as a fraction of the character size.
const GLYPH_ASPECT: f32 = 0.6;

/// A line of menu text and the box it occupies, in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub label: &'static str,
    pub bounds: Rect,
}

impl MenuItem {
    fn centered(label: &'static str, y: f32, size: f32) -> Self {
        let w = label.chars().count() as f32 * size * GLYPH_ASPECT;
        MenuItem {
            label,
            bounds: Rect::new(FIELD_WIDTH / 2.0 - w / 2.0, y, w, size),
        }
    }
}

/// The title screen, or the game-over screen when `game_over` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuLayout {
    pub title: MenuItem,
    pub start: MenuItem,
    pub exit: MenuItem,
}

impl MenuLayout {
    pub fn new(game_over: bool) -> Self {
        let (title, start) = if game_over {
            ("Game Over!", "Restart")
        } else {
            ("Space Invaders", "Start Game")
        };
        MenuLayout {
            title: MenuItem::centered(title, 100.0, TITLE_SIZE),
            start: MenuItem::centered(start, 200.0, OPTION_SIZE),
            exit: MenuItem::centered("Exit", 250.0, OPTION_SIZE),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Exit,
}

/// Resolve this frame's menu input.  The first click that lands on an
/// option wins; keyboard shortcuts are checked after clicks.
pub fn menu_choice(layout: &MenuLayout, input: &FrameInput) -> Option<MenuChoice> {
    for &(x, y) in &input.clicks {
        if layout.start.bounds.contains(x, y) {
            return Some(MenuChoice::Start);
        }
        if layout.exit.bounds.contains(x, y) {
            return Some(MenuChoice::Exit);
        }
    }
    if input.start {
        Some(MenuChoice::Start)
    } else if input.exit {
        Some(MenuChoice::Exit)
    } else {
        None
    }
}

// ── Frame input ───────────────────────────────────────────────────────────────

/// Everything the front-end collected since the previous frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// The window (terminal) was asked to close.
    pub closed: bool,
    /// Mouse presses, already mapped to world coordinates.
    pub clicks: Vec<(f32, f32)>,
    /// Menu shortcut for the start / restart option.
    pub start: bool,
    /// Menu shortcut for the exit option.
    pub exit: bool,
    pub player: PlayerInput,
}

// ── App ───────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct App {
    state: AppState,
    /// The running session, or the one that just ended while on the
    /// game-over screen.
    session: Option<SessionState>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        App {
            state: AppState::Menu,
            session: None,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Layout to draw when a menu is showing.
    pub fn menu(&self) -> Option<MenuLayout> {
        match self.state {
            AppState::Menu => Some(MenuLayout::new(false)),
            AppState::GameOver => Some(MenuLayout::new(true)),
            AppState::Playing | AppState::Exit => None,
        }
    }

    /// Run one frame and return the resulting state.  `Exit` is terminal.
    pub fn step(
        &mut self,
        input: &FrameInput,
        dt: f32,
        rng: &mut impl Rng,
        loader: &impl AssetLoader,
        audio: &mut impl AudioSink,
    ) -> AppState {
        if self.state == AppState::Exit {
            return AppState::Exit;
        }

        if input.closed {
            if self.state == AppState::Playing {
                audio.stop_music();
            }
            self.set_state(AppState::Exit);
            return self.state;
        }

        match self.state {
            AppState::Menu | AppState::GameOver => {
                let layout = MenuLayout::new(self.state == AppState::GameOver);
                match menu_choice(&layout, input) {
                    Some(MenuChoice::Start) => self.start_session(loader, audio),
                    Some(MenuChoice::Exit) => self.set_state(AppState::Exit),
                    None => {}
                }
            }
            AppState::Playing => self.play_frame(input, dt, rng, audio),
            AppState::Exit => {}
        }
        self.state
    }

    fn start_session(&mut self, loader: &impl AssetLoader, audio: &mut impl AudioSink) {
        match SessionAssets::load(loader) {
            Ok(assets) => {
                audio.bind(&assets);
                audio.start_music();
                self.session = Some(init_session(assets.sprite_sizes()));
                self.set_state(AppState::Playing);
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot load session assets");
                self.session = None;
                self.set_state(AppState::Exit);
            }
        }
    }

    fn play_frame(
        &mut self,
        input: &FrameInput,
        dt: f32,
        rng: &mut impl Rng,
        audio: &mut impl AudioSink,
    ) {
        let Some(session) = self.session.as_ref() else {
            tracing::warn!("playing without a session; returning to menu");
            self.set_state(AppState::Menu);
            return;
        };

        let next = tick(session, &input.player, dt, rng);
        for &cue in &next.sounds {
            audio.play(cue);
        }
        let over = next.status == SessionStatus::GameOver;
        self.session = Some(next);

        if over {
            audio.stop_music();
            self.set_state(AppState::GameOver);
        }
    }

    fn set_state(&mut self, next: AppState) {
        if next != self.state {
            tracing::info!(from = ?self.state, to = ?next, "state change");
            self.state = next;
        }
    }
}
