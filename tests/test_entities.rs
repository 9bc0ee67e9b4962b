use space_invaders::entities::*;

#[test]
fn rect_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert!(a.intersects(&Rect::new(2.0, 2.0, 1.0, 1.0))); // fully inside
    assert!(!a.intersects(&Rect::new(20.0, 0.0, 5.0, 5.0)));
}

#[test]
fn rect_touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
    assert!(!a.intersects(&Rect::new(0.0, 10.0, 5.0, 5.0)));
}

#[test]
fn rect_overlap_is_symmetric() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(9.5, -3.0, 4.0, 4.0);
    assert_eq!(a.intersects(&b), b.intersects(&a));
}

#[test]
fn rect_contains_point() {
    let r = Rect::new(10.0, 10.0, 20.0, 5.0);
    assert!(r.contains(10.0, 10.0));
    assert!(r.contains(29.9, 14.9));
    assert!(!r.contains(30.0, 12.0));
    assert!(!r.contains(15.0, 9.0));
}

#[test]
fn bounds_use_entity_size() {
    let size = Size { w: 40.0, h: 30.0 };
    let enemy = Enemy { x: 1.0, y: 2.0, size };
    assert_eq!(enemy.bounds(), Rect::new(1.0, 2.0, 40.0, 30.0));

    let shot = Projectile { x: 3.0, y: 4.0 };
    assert_eq!(shot.bounds(), Rect::new(3.0, 4.0, 5.0, 20.0));
}

#[test]
fn session_clone_is_independent() {
    let size = Size { w: 10.0, h: 10.0 };
    let sizes = SpriteSizes {
        player: size,
        enemy: size,
        power_up: size,
    };
    let original = space_invaders::compute::init_session(sizes);
    let mut cloned = original.clone();

    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.clear();

    assert_ne!(original.player.x, 99.0);
    assert_eq!(original.score, 0);
    assert_eq!(original.enemies.len(), 32);
}
