use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invaders::entities::{PowerUpKind, Size};
use space_invaders::spawner::*;

const ENEMY: Size = Size { w: 40.0, h: 30.0 };
const POWER_UP: Size = Size { w: 20.0, h: 20.0 };

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── spawn_wave ────────────────────────────────────────────────────────────────

#[test]
fn wave_has_rows_times_eight_enemies() {
    assert_eq!(spawn_wave(4, ENEMY).len(), 32);
    assert_eq!(spawn_wave(5, ENEMY).len(), 40);
    assert!(spawn_wave(0, ENEMY).is_empty());
}

#[test]
fn wave_grid_positions() {
    let wave = spawn_wave(4, ENEMY);
    // Row-major: first row left to right, then the next row
    assert_eq!((wave[0].x, wave[0].y), (100.0, 50.0));
    assert_eq!((wave[1].x, wave[1].y), (160.0, 50.0));
    assert_eq!((wave[7].x, wave[7].y), (520.0, 50.0));
    assert_eq!((wave[8].x, wave[8].y), (100.0, 90.0));
    assert_eq!((wave[31].x, wave[31].y), (520.0, 170.0));
}

#[test]
fn wave_is_deterministic_and_sized() {
    let a = spawn_wave(3, ENEMY);
    let b = spawn_wave(3, ENEMY);
    assert_eq!(a, b);
    assert!(a.iter().all(|e| e.size == ENEMY));
}

// ── roll_power_up ─────────────────────────────────────────────────────────────

#[test]
fn low_roll_spawns_at_top() {
    let p = roll_power_up(&mut StepRng::new(0, 0), POWER_UP).expect("roll of 0 spawns");
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 0.0);
    assert_eq!(p.kind, PowerUpKind::RapidFire);
    assert_eq!(p.size, POWER_UP);
    assert_eq!(p.timer, 0.0);
}

#[test]
fn high_roll_spawns_nothing() {
    assert!(roll_power_up(&mut StepRng::new(1 << 31, 0), POWER_UP).is_none());
}

#[test]
fn spawn_rate_is_about_a_quarter_percent() {
    let mut rng = seeded_rng();
    let spawned = (0..400_000)
        .filter(|_| roll_power_up(&mut rng, POWER_UP).is_some())
        .count();
    // Expect 1000; allow ~5 standard deviations either side
    assert!((850..=1150).contains(&spawned), "spawned {spawned}");
}

#[test]
fn spawned_power_ups_stay_in_band_and_cover_both_kinds() {
    let mut rng = seeded_rng();
    let items: Vec<_> = (0..400_000)
        .filter_map(|_| roll_power_up(&mut rng, POWER_UP))
        .collect();
    assert!(items.iter().all(|p| p.x >= 0.0 && p.x < 750.0));
    assert!(items.iter().any(|p| p.kind == PowerUpKind::RapidFire));
    assert!(items.iter().any(|p| p.kind == PowerUpKind::Shield));
}
