//! Enemy-wave layout and the per-frame power-up roll.
//!
//! Both are free functions so the update loop can call them with whatever
//! wave state is current; randomness comes in through an injected RNG.

use rand::Rng;

use crate::constants::{
    ENEMY_COLUMNS, ENEMY_COLUMN_SPACING, ENEMY_ROW_SPACING, FIELD_WIDTH, POWER_UP_ROLL_HITS,
    POWER_UP_ROLL_RANGE, POWER_UP_SPAWN_MARGIN, WAVE_START_X, WAVE_START_Y,
};
use crate::entities::{Enemy, PowerUp, PowerUpKind, Size};

/// Lay out `rows × ENEMY_COLUMNS` enemies, row-major, on the fixed grid.
pub fn spawn_wave(rows: u32, enemy_size: Size) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity((rows * ENEMY_COLUMNS) as usize);
    for row in 0..rows {
        for col in 0..ENEMY_COLUMNS {
            enemies.push(Enemy {
                x: WAVE_START_X + col as f32 * ENEMY_COLUMN_SPACING,
                y: WAVE_START_Y + row as f32 * ENEMY_ROW_SPACING,
                size: enemy_size,
            });
        }
    }
    enemies
}

/// Roll for a power-up this frame.
///
/// The chance is `POWER_UP_ROLL_HITS / POWER_UP_ROLL_RANGE` (0.25 %).  On a
/// hit the item appears on the top edge at a random column with a kind
/// drawn uniformly from `{RapidFire, Shield}`.
pub fn roll_power_up(rng: &mut impl Rng, power_up_size: Size) -> Option<PowerUp> {
    if rng.gen_range(0..POWER_UP_ROLL_RANGE) >= POWER_UP_ROLL_HITS {
        return None;
    }
    let max_x = (FIELD_WIDTH - POWER_UP_SPAWN_MARGIN) as u32;
    let x = rng.gen_range(0..max_x) as f32;
    let kind = if rng.gen_bool(0.5) {
        PowerUpKind::RapidFire
    } else {
        PowerUpKind::Shield
    };
    Some(PowerUp {
        x,
        y: 0.0,
        size: power_up_size,
        kind,
        timer: 0.0,
    })
}
