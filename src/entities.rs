//! All game entity types: pure data, no game rules.

use crate::constants::{PROJECTILE_HEIGHT, PROJECTILE_WIDTH};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in world units (origin top-left, y grows down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// True when the two boxes share a region of positive area.
    /// Boxes that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let left = self.x.max(other.x);
        let right = (self.x + self.w).min(other.x + other.w);
        let top = self.y.max(other.y);
        let bottom = (self.y + self.h).min(other.y + other.h);
        left < right && top < bottom
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// Width and height of a sprite, taken from its texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

/// Sprite sizes for one session, read from the loaded textures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSizes {
    pub player: Size,
    pub enemy: Size,
    pub power_up: Size,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

/// The player ship.  There is no health: the session ends when the wave
/// reaches the bottom, not on contact.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub size: Size,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size.w, self.size.h)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub size: Size,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size.w, self.size.h)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A player shot.  Always `PROJECTILE_WIDTH × PROJECTILE_HEIGHT`.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Halves the shoot cooldown for `RAPID_FIRE_DURATION` seconds.
    RapidFire,
    /// Spawns and can be collected, but has no effect yet.
    Shield,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub size: Size,
    pub kind: PowerUpKind,
    /// Zero at spawn.  Nothing reads it until power-ups get a lifetime.
    pub timer: f32,
}

impl PowerUp {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size.w, self.size.h)
    }
}

// ── Wave / session ────────────────────────────────────────────────────────────

/// Per-level wave tunables.  Speed and row count only ever grow.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveState {
    /// +1.0 moving right, -1.0 moving left.
    pub direction: f32,
    pub speed: f32,
    pub rows: u32,
    /// 1 for the opening wave, +1 per clear.
    pub level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    GameOver,
}

/// Sounds the update loop asks the audio sink to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shoot,
    Hit,
    GameOver,
}

/// Held-key state sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Everything one play session owns.  Cloneable so `tick` can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub score: u32,
    pub wave: WaveState,
    /// Seconds until the next shot is allowed.  May go negative.
    pub shoot_cooldown: f32,
    pub rapid_fire_active: bool,
    /// Seconds of rapid-fire left.  Counts down every frame, even when
    /// inactive.
    pub rapid_fire_remaining: f32,
    pub status: SessionStatus,
    pub sizes: SpriteSizes,
    /// Sounds triggered during the most recent frame.
    pub sounds: Vec<SoundCue>,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl SessionState {
    pub fn field(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

