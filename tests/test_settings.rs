use alien_invasion::settings::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4 * b.abs().max(1.0)
}

#[test]
fn new_settings_start_at_base_values() {
    let s = Settings::new(120.0, 40.0);
    assert_eq!(s.screen_width, 120.0);
    assert_eq!(s.screen_height, 40.0);
    assert_eq!(s.ship_speed(), BASE_SHIP_SPEED);
    assert_eq!(s.bullet_speed(), BASE_BULLET_SPEED);
    assert_eq!(s.alien_speed(), BASE_ALIEN_SPEED);
    assert_eq!(s.alien_points(), BASE_ALIEN_POINTS);
    assert_eq!(s.ship_limit, 3);
    assert_eq!(s.bullets_allowed, Some(3));
}

#[test]
fn increase_speed_scales_geometrically() {
    let mut s = Settings::default();
    for n in 0..=20 {
        let scale = s.speedup_scale.powi(n);
        assert!(approx(s.ship_speed(), BASE_SHIP_SPEED * scale));
        assert!(approx(s.bullet_speed(), BASE_BULLET_SPEED * scale));
        assert!(approx(s.alien_speed(), BASE_ALIEN_SPEED * scale));
        assert_eq!(s.alien_points(), BASE_ALIEN_POINTS * s.score_up.pow(n as u32));
        s.increase_speed();
    }
}

#[test]
fn custom_scale_factors() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut s = Settings::default();
        s.speedup_scale = rng.gen_range(1.01..1.5);
        s.score_up = rng.gen_range(1..4);
        let n = rng.gen_range(0..10);
        for _ in 0..n {
            s.increase_speed();
        }
        assert!(approx(s.alien_speed(), BASE_ALIEN_SPEED * s.speedup_scale.powi(n)));
        assert_eq!(s.alien_points(), s.score_up.pow(n as u32));
    }
}

#[test]
fn initialize_dynamic_settings_resets_difficulty() {
    let mut s = Settings::default();
    for _ in 0..5 {
        s.increase_speed();
    }
    assert!(s.alien_speed() > BASE_ALIEN_SPEED);
    s.initialize_dynamic_settings();
    assert_eq!(s, Settings::default());
}

#[test]
fn alien_points_saturate() {
    let mut s = Settings::default();
    s.score_up = u64::MAX;
    s.increase_speed();
    s.increase_speed();
    assert_eq!(s.alien_points(), u64::MAX);
}
