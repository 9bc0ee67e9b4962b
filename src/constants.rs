//! Fixed tuning values.  Everything that changes during play lives on
//! `WaveState` / `SessionState` instead.

// ── Play field ────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;

/// Gap kept between the bottom edge of the field and the player / the
/// game-over line for enemies.
pub const BOTTOM_MARGIN: f32 = 10.0;

/// Frame cap of the outer loop (updates per second).
pub const FRAME_RATE: u32 = 60;

// ── Player & projectiles ─────────────────────────────────────────────────────

/// Horizontal player speed (units per second).
pub const PLAYER_SPEED: f32 = 300.0;

/// Upward projectile speed (units per second).
pub const PROJECTILE_SPEED: f32 = 500.0;
pub const PROJECTILE_WIDTH: f32 = 5.0;
pub const PROJECTILE_HEIGHT: f32 = 20.0;

/// Seconds between two shots.  Halved while rapid-fire is active.
pub const SHOOT_COOLDOWN: f32 = 0.5;

// ── Enemy wave ────────────────────────────────────────────────────────────────

pub const BASE_ENEMY_SPEED: f32 = 100.0;
pub const BASE_ENEMY_ROWS: u32 = 4;
pub const ENEMY_COLUMNS: u32 = 8;
pub const ENEMY_COLUMN_SPACING: f32 = 60.0;
pub const ENEMY_ROW_SPACING: f32 = 40.0;
pub const WAVE_START_X: f32 = 100.0;
pub const WAVE_START_Y: f32 = 50.0;

/// How far the whole wave drops each time it bounces off a side.
pub const ENEMY_DESCENT_STEP: f32 = 20.0;

/// Added to the enemy speed on every cleared wave.
pub const ENEMY_SPEED_INCREMENT: f32 = 50.0;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const KILL_SCORE: u32 = 10;
pub const WAVE_CLEAR_BONUS: u32 = 100;

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const POWER_UP_SPEED: f32 = 150.0;

/// A power-up spawns on a frame when a roll in `0..POWER_UP_ROLL_RANGE`
/// lands below `POWER_UP_ROLL_HITS` (10 / 4000 = 0.25 % per frame).
pub const POWER_UP_ROLL_RANGE: u32 = 4000;
pub const POWER_UP_ROLL_HITS: u32 = 10;

/// Spawn x is drawn from `0..FIELD_WIDTH - POWER_UP_SPAWN_MARGIN`.
pub const POWER_UP_SPAWN_MARGIN: f32 = 50.0;

/// Seconds rapid-fire stays active after pickup.
pub const RAPID_FIRE_DURATION: f32 = 10.0;
