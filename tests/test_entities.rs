use alien_invasion::entities::*;
use alien_invasion::settings::Settings;

fn make_settings() -> Settings {
    Settings::new(80.0, 22.0)
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges() {
    let r = Rect::new(2.0, 3.0, 4.0, 5.0);
    assert_eq!(r.left(), 2.0);
    assert_eq!(r.right(), 6.0);
    assert_eq!(r.top(), 3.0);
    assert_eq!(r.bottom(), 8.0);
    assert_eq!(r.center_x(), 4.0);
}

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 2.0, 2.0);
    assert!(a.overlaps(&Rect::new(1.0, 1.0, 2.0, 2.0)));
    assert!(a.overlaps(&Rect::new(0.5, 0.5, 0.5, 0.5))); // contained
    assert!(!a.overlaps(&Rect::new(2.0, 0.0, 2.0, 2.0))); // shared edge
    assert!(!a.overlaps(&Rect::new(0.0, 2.0, 2.0, 2.0)));
    assert!(!a.overlaps(&Rect::new(5.0, 5.0, 1.0, 1.0)));
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[test]
fn ship_starts_bottom_centre() {
    let s = make_settings();
    let ship = Ship::new(&s);
    assert_eq!(ship.rect, Rect::new(38.5, 20.0, 3.0, 2.0));
    assert!(!ship.moving_left && !ship.moving_right);
}

#[test]
fn ship_moves_with_intent() {
    let s = make_settings();
    let motion = Motion::new(&s, 1.0);
    let mut ship = Ship::new(&s);

    ship.update(&motion);
    assert_eq!(ship.rect.x, 38.5); // no intent, no motion

    ship.moving_right = true;
    ship.update(&motion);
    assert_eq!(ship.rect.x, 39.5);

    ship.moving_right = false;
    ship.moving_left = true;
    ship.update(&motion);
    ship.update(&motion);
    assert_eq!(ship.rect.x, 37.5);
}

#[test]
fn ship_stays_on_screen() {
    let s = make_settings();
    let motion = Motion::new(&s, 1.0);
    let mut ship = Ship::new(&s);

    ship.rect.x = 76.5;
    ship.moving_right = true;
    ship.update(&motion);
    assert_eq!(ship.rect.x, 77.0);
    ship.update(&motion);
    assert_eq!(ship.rect.x, 77.0);

    ship.moving_right = false;
    ship.moving_left = true;
    ship.rect.x = 0.5;
    ship.update(&motion);
    assert_eq!(ship.rect.x, 0.0);
    ship.update(&motion);
    assert_eq!(ship.rect.x, 0.0);
}

#[test]
fn ship_center_is_a_reposition() {
    let s = make_settings();
    let mut ship = Ship::new(&s);
    ship.rect.x = 3.0;
    ship.moving_left = true;
    ship.center(&s);
    assert_eq!(ship.rect.x, 38.5);
    assert!(ship.moving_left); // intents untouched
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_fired_from_ship_mid_top() {
    let s = make_settings();
    let ship = Ship::new(&s);
    let bullet = Bullet::fired_from(&ship, &s);
    assert_eq!(bullet.rect.center_x(), ship.rect.center_x());
    assert_eq!(bullet.rect.top(), ship.rect.top());
    assert_eq!(bullet.rect.width, s.bullet_width);
    assert_eq!(bullet.rect.height, s.bullet_height);
}

#[test]
fn bullet_moves_up_only() {
    let s = make_settings();
    let mut bullet = Bullet::new(Rect::new(5.0, 10.0, 1.0, 1.0));
    bullet.update(&Motion::new(&s, -1.0));
    assert_eq!(bullet.rect.x, 5.0);
    assert_eq!(bullet.rect.y, 9.25);
}

#[test]
fn bullet_off_screen_when_bottom_reaches_zero() {
    assert!(Bullet::new(Rect::new(0.0, -1.0, 1.0, 1.0)).is_off_screen());
    assert!(!Bullet::new(Rect::new(0.0, -0.5, 1.0, 1.0)).is_off_screen());
}

#[test]
fn swept_rect_covers_the_latest_move() {
    let s = make_settings();
    let mut bullet = Bullet::new(Rect::new(5.0, 10.0, 1.0, 1.0));
    assert_eq!(bullet.swept_rect(), bullet.rect);

    bullet.update(&Motion::new(&s, 1.0));
    let swept = bullet.swept_rect();
    assert_eq!(swept.x, 5.0);
    assert_eq!(swept.width, 1.0);
    assert_eq!(swept.top(), 9.25);
    assert_eq!(swept.bottom(), 11.0);
    // Collision is swept, drawing is not
    assert_eq!(bullet.bounding_rect().height, 1.0);
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[test]
fn alien_moves_with_fleet_direction() {
    let s = make_settings();
    let mut alien = Alien::new(10.0, 4.0, &s);
    alien.update(&Motion::new(&s, -1.0));
    assert!((alien.rect.x - 9.9).abs() < 1e-5);
    assert_eq!(alien.rect.y, 4.0);
}

#[test]
fn alien_edges_depend_on_heading() {
    let s = make_settings();
    let right = Alien::new(77.0, 1.0, &s);
    let left = Alien::new(0.0, 1.0, &s);
    let middle = Alien::new(30.0, 1.0, &s);

    assert!(right.touches_edge(1.0, s.screen_width));
    assert!(!right.touches_edge(-1.0, s.screen_width));
    assert!(left.touches_edge(-1.0, s.screen_width));
    assert!(!left.touches_edge(1.0, s.screen_width));
    assert!(!middle.touches_edge(1.0, s.screen_width));
    assert!(!middle.touches_edge(-1.0, s.screen_width));
}

// ── Sprite ────────────────────────────────────────────────────────────────────

#[test]
fn sprite_rect_matches_entity() {
    let s = make_settings();
    let ship = Ship::new(&s);
    let alien = Alien::new(3.0, 1.0, &s);
    assert_eq!(Sprite::Ship(&ship).rect(), ship.rect);
    assert_eq!(Sprite::Alien(&alien).rect(), alien.rect);
}

// ── Pool ──────────────────────────────────────────────────────────────────────

#[test]
fn pool_mark_then_compact() {
    let mut pool: Pool<u32> = Pool::new();
    for i in 0..5 {
        pool.push(i);
    }
    assert!(pool.mark(1));
    assert!(!pool.mark(1)); // already marked
    assert!(pool.mark(3));
    assert!(!pool.mark(99)); // out of range

    // Marked entities stay in place until compaction
    assert_eq!(pool.len(), 5);
    assert!(pool.is_marked(1));
    assert_eq!(pool.get(3), Some(&3));

    assert_eq!(pool.compact(), 2);
    assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
    assert!(!pool.is_marked(1));
}

#[test]
fn pool_mark_where_counts_new_marks() {
    let mut pool: Pool<u32> = Pool::new();
    for i in 0..6 {
        pool.push(i);
    }
    pool.mark(0);
    assert_eq!(pool.mark_where(|v| v % 2 == 0), 2); // 0 was already marked
    assert_eq!(pool.compact(), 3);
    assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
}

#[test]
fn pool_push_after_compact_and_clear() {
    let mut pool: Pool<&str> = Pool::default();
    pool.push("a");
    pool.mark(0);
    pool.compact();
    pool.push("b");
    assert!(!pool.is_marked(0));
    assert_eq!(pool.get(0), Some(&"b"));
    pool.clear();
    assert!(pool.is_empty());
}
