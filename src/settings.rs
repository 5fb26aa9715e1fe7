//! Tunable parameters for the whole game.
//!
//! Sizes and scale factors are plain public fields.  The *dynamic* values
//! (speeds and points per alien) are private: they only change through
//! `initialize_dynamic_settings` and `increase_speed`, so difficulty always
//! starts from the same baseline on every new game.
//!
//! Units are terminal cells; one tick is one frame.

// ── Base values for the dynamic settings ─────────────────────────────────────

pub const BASE_SHIP_SPEED: f32 = 1.0;
pub const BASE_BULLET_SPEED: f32 = 0.75;
pub const BASE_ALIEN_SPEED: f32 = 0.1;
pub const BASE_ALIEN_POINTS: u64 = 1;

// ── Settings ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub screen_width: f32,
    pub screen_height: f32,

    /// Lives at the start of every session.
    pub ship_limit: i32,
    pub ship_width: f32,
    pub ship_height: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Maximum bullets on screen at once.  `None` removes the cap.
    pub bullets_allowed: Option<usize>,

    pub alien_width: f32,
    pub alien_height: f32,
    pub fleet_drop_speed: f32,

    /// How quickly the game speeds up after each cleared wave.
    pub speedup_scale: f32,
    /// How quickly alien point values grow after each cleared wave.
    pub score_up: u64,

    /// Ticks the world stays frozen after the ship is hit.
    pub stun_ticks: u32,

    ship_speed: f32,
    bullet_speed: f32,
    alien_speed: f32,
    alien_points: u64,
}

impl Settings {
    /// Settings for a play area of the given size, everything else default.
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let mut settings = Settings {
            screen_width,
            screen_height,
            ship_limit: 3,
            ship_width: 3.0,
            ship_height: 2.0,
            bullet_width: 1.0,
            bullet_height: 1.0,
            bullets_allowed: Some(3),
            alien_width: 3.0,
            alien_height: 1.0,
            fleet_drop_speed: 1.0,
            speedup_scale: 1.1,
            score_up: 2,
            stun_ticks: 15,
            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            alien_points: 0,
        };
        settings.initialize_dynamic_settings();
        settings
    }

    /// Put speeds and point values back to their base values.
    pub fn initialize_dynamic_settings(&mut self) {
        self.ship_speed = BASE_SHIP_SPEED;
        self.bullet_speed = BASE_BULLET_SPEED;
        self.alien_speed = BASE_ALIEN_SPEED;
        self.alien_points = BASE_ALIEN_POINTS;
    }

    /// Scale speeds and point values up by one wave.  Unbounded.
    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.alien_points = self.alien_points.saturating_mul(self.score_up);
    }

    pub fn ship_speed(&self) -> f32 {
        self.ship_speed
    }

    pub fn bullet_speed(&self) -> f32 {
        self.bullet_speed
    }

    pub fn alien_speed(&self) -> f32 {
        self.alien_speed
    }

    pub fn alien_points(&self) -> u64 {
        self.alien_points
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new(80.0, 22.0)
    }
}
