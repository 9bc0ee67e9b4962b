//! Pure game-logic functions.
//!
//! `tick` takes an immutable reference to the current `SessionState` plus
//! an RNG handle and returns a brand-new `SessionState`.  Side effects are
//! limited to the injected RNG; sounds are reported on the returned state
//! for the caller to play.

use rand::Rng;

use crate::constants::{
    BASE_ENEMY_ROWS, BASE_ENEMY_SPEED, BOTTOM_MARGIN, ENEMY_DESCENT_STEP, ENEMY_SPEED_INCREMENT,
    FIELD_HEIGHT, FIELD_WIDTH, KILL_SCORE, PLAYER_SPEED, POWER_UP_SPEED, PROJECTILE_SPEED,
    PROJECTILE_WIDTH, RAPID_FIRE_DURATION, SHOOT_COOLDOWN, WAVE_CLEAR_BONUS,
};
use crate::entities::{
    Player, PlayerInput, PowerUpKind, Projectile, SessionState, SessionStatus, SoundCue,
    SpriteSizes, WaveState,
};
use crate::spawner::{roll_power_up, spawn_wave};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session: player centred above the bottom edge, first wave
/// in place, score and timers at zero.
pub fn init_session(sizes: SpriteSizes) -> SessionState {
    let wave = WaveState {
        direction: 1.0,
        speed: BASE_ENEMY_SPEED,
        rows: BASE_ENEMY_ROWS,
        level: 1,
    };
    SessionState {
        player: Player {
            x: FIELD_WIDTH / 2.0 - sizes.player.w / 2.0,
            y: FIELD_HEIGHT - sizes.player.h - BOTTOM_MARGIN,
            size: sizes.player,
        },
        projectiles: Vec::new(),
        enemies: spawn_wave(wave.rows, sizes.enemy),
        power_ups: Vec::new(),
        score: 0,
        wave,
        shoot_cooldown: 0.0,
        rapid_fire_active: false,
        rapid_fire_remaining: 0.0,
        status: SessionStatus::Playing,
        sizes,
        sounds: Vec::new(),
        frame: 0,
        width: FIELD_WIDTH,
        height: FIELD_HEIGHT,
    }
}

// ── Input-driven helpers ─────────────────────────────────────────────────────

/// Cooldown applied after a shot.
pub fn effective_cooldown(rapid_fire_active: bool) -> f32 {
    if rapid_fire_active {
        SHOOT_COOLDOWN / 2.0
    } else {
        SHOOT_COOLDOWN
    }
}

/// Where a new shot appears: horizontally centred on the ship, at its top.
pub fn muzzle_position(player: &Player) -> (f32, f32) {
    (
        player.x + player.size.w / 2.0 - PROJECTILE_WIDTH / 2.0,
        player.y,
    )
}

fn move_player(player: &Player, input: &PlayerInput, dt: f32, field_width: f32) -> Player {
    let mut x = player.x;
    if input.left {
        x -= PLAYER_SPEED * dt;
    }
    if input.right {
        x += PLAYER_SPEED * dt;
    }
    let max_x = (field_width - player.size.w).max(0.0);
    Player {
        x: x.clamp(0.0, max_x),
        ..player.clone()
    }
}

// ── Per-frame tick (RNG is injected) ──────────────────────────────────────

/// Advance the session by one frame of `dt` seconds.
///
/// A session that is already over is returned unchanged.  When an enemy
/// reaches the bottom line the frame stops once the whole wave has moved:
/// no bounce, collision, power-up or wave handling happens after the
/// game-over transition.
pub fn tick(
    state: &SessionState,
    input: &PlayerInput,
    dt: f32,
    rng: &mut impl Rng,
) -> SessionState {
    if state.status == SessionStatus::GameOver {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;
    next.sounds.clear();

    // ── 1. Timers ────────────────────────────────────────────────────────────
    next.shoot_cooldown -= dt;
    next.rapid_fire_remaining -= dt;

    // ── 2. Player movement ───────────────────────────────────────────────────
    next.player = move_player(&next.player, input, dt, next.width);

    // ── 3. Shooting ──────────────────────────────────────────────────────────
    if input.fire && next.shoot_cooldown <= 0.0 {
        let (x, y) = muzzle_position(&next.player);
        next.projectiles.push(Projectile { x, y });
        next.shoot_cooldown = effective_cooldown(next.rapid_fire_active);
        next.sounds.push(SoundCue::Shoot);
    }

    // ── 4. Projectiles fly up and leave through the top ──────────────────────
    next.projectiles = next
        .projectiles
        .iter()
        .map(|p| Projectile {
            y: p.y - PROJECTILE_SPEED * dt,
            ..p.clone()
        })
        .filter(|p| p.y >= 0.0)
        .collect();

    // ── 5. Enemies march sideways ────────────────────────────────────────────
    let step = next.wave.direction * next.wave.speed * dt;
    let mut reverse = false;
    for enemy in next.enemies.iter_mut() {
        enemy.x += step;
        if enemy.x <= 0.0 || enemy.x >= next.width - enemy.size.w {
            reverse = true;
        }
    }
    let bottom = next.height - BOTTOM_MARGIN;
    if next.enemies.iter().any(|e| e.y >= bottom - e.size.h) {
        tracing::info!(score = next.score, level = next.wave.level, "wave reached the bottom");
        next.status = SessionStatus::GameOver;
        next.sounds.push(SoundCue::GameOver);
        return next;
    }

    // ── 6. Bounce and descend ────────────────────────────────────────────────
    if reverse {
        next.wave.direction = -next.wave.direction;
        for enemy in next.enemies.iter_mut() {
            enemy.y += ENEMY_DESCENT_STEP;
        }
    }

    // ── 7. Collision: projectiles ↔ enemies ─────────────────────────────────
    // Exhaustive pairwise scan; each projectile takes out at most the first
    // enemy it overlaps.
    let mut surviving = Vec::with_capacity(next.projectiles.len());
    for projectile in &next.projectiles {
        let bounds = projectile.bounds();
        match next.enemies.iter().position(|e| e.bounds().intersects(&bounds)) {
            Some(hit) => {
                next.enemies.remove(hit);
                next.score += KILL_SCORE;
                next.sounds.push(SoundCue::Hit);
            }
            None => surviving.push(projectile.clone()),
        }
    }
    next.projectiles = surviving;

    // ── 8. Power-up roll ─────────────────────────────────────────────────────
    if let Some(power_up) = roll_power_up(rng, next.sizes.power_up) {
        tracing::debug!(kind = ?power_up.kind, x = power_up.x, "power-up spawned");
        next.power_ups.push(power_up);
    }

    // ── 9. Power-ups fall; pick-up on contact ────────────────────────────────
    let player_bounds = next.player.bounds();
    let mut falling = Vec::with_capacity(next.power_ups.len());
    for power_up in &next.power_ups {
        let mut power_up = power_up.clone();
        power_up.y += POWER_UP_SPEED * dt;
        if power_up.bounds().intersects(&player_bounds) {
            match power_up.kind {
                PowerUpKind::RapidFire => {
                    next.rapid_fire_active = true;
                    next.rapid_fire_remaining = RAPID_FIRE_DURATION;
                }
                PowerUpKind::Shield => {
                    tracing::debug!("shield collected (no effect)");
                }
            }
            continue;
        }
        if power_up.y < next.height {
            falling.push(power_up);
        }
    }
    next.power_ups = falling;

    // ── 10. Rapid-fire expiry ────────────────────────────────────────────────
    if next.rapid_fire_remaining <= 0.0 {
        next.rapid_fire_active = false;
    }

    // ── 11. Wave cleared → next level ────────────────────────────────────────
    if next.enemies.is_empty() {
        next.wave.speed += ENEMY_SPEED_INCREMENT;
        next.wave.rows += 1;
        next.wave.level += 1;
        next.enemies = spawn_wave(next.wave.rows, next.sizes.enemy);
        next.score += WAVE_CLEAR_BONUS;
        tracing::info!(
            level = next.wave.level,
            speed = next.wave.speed,
            rows = next.wave.rows,
            score = next.score,
            "wave cleared"
        );
    }

    next
}
