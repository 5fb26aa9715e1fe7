//! Session state machine: idle behind the play button, playing, and back
//! to idle once the last ship is lost.

use log::info;

use crate::compute::{TickReport, World};
use crate::entities::Rect;
use crate::settings::Settings;
use crate::stats::{GameStats, ScoreStore};

// ── Input commands ───────────────────────────────────────────────────────────

/// Input already translated from raw device events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Quit,
    /// Current state of the two movement intents.
    SetMoving { left: bool, right: bool },
    Fire,
    /// Keyboard shortcut for the play button.
    Restart,
    /// Mouse press, in play-area coordinates.
    Click { x: f32, y: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ── Play button ──────────────────────────────────────────────────────────────

pub const BUTTON_WIDTH: f32 = 12.0;
pub const BUTTON_HEIGHT: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
}

impl Button {
    pub fn centered(label: &'static str, settings: &Settings) -> Self {
        let x = ((settings.screen_width - BUTTON_WIDTH) / 2.0).floor();
        let y = ((settings.screen_height - BUTTON_HEIGHT) / 2.0).floor();
        Button {
            rect: Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT),
            label,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.rect.left()
            && x < self.rect.right()
            && y >= self.rect.top()
            && y < self.rect.bottom()
    }
}

// ── Game ─────────────────────────────────────────────────────────────────────

pub struct Game {
    pub settings: Settings,
    pub stats: GameStats,
    pub world: World,
    pub play_button: Button,
    store: Box<dyn ScoreStore>,
    /// Set when the last session ended on a new best score.
    new_best: bool,
}

impl Game {
    /// A new, inactive game.  The best score is loaded from `store` here and
    /// nowhere else.
    pub fn new(settings: Settings, store: Box<dyn ScoreStore>) -> Self {
        let stats = GameStats::new(settings.ship_limit, store.as_ref());
        let world = World::new(&settings);
        let play_button = Button::centered("Play", &settings);
        Game {
            settings,
            stats,
            world,
            play_button,
            store,
            new_best: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stats.game_active
    }

    /// True if the session that just ended beat the previous best score.
    pub fn new_best(&self) -> bool {
        self.new_best
    }

    /// The pointer is shown only while the play button is up.
    pub fn cursor_visible(&self) -> bool {
        !self.is_active()
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::SetMoving { left, right } => {
                let stunned = self.world.is_stunned();
                self.world.ship.moving_left = left && !stunned;
                self.world.ship.moving_right = right && !stunned;
            }
            Command::Fire => {
                if self.is_active() {
                    self.world.fire(&self.settings);
                }
            }
            Command::Restart => {
                if !self.is_active() {
                    self.start();
                }
            }
            Command::Click { x, y } => {
                if !self.is_active() && self.play_button.contains(x, y) {
                    self.start();
                }
            }
        }
        Flow::Continue
    }

    /// Begin a new session from baseline difficulty.
    pub fn start(&mut self) {
        self.stats.reset(self.settings.ship_limit);
        self.settings.initialize_dynamic_settings();
        self.world.reset(&self.settings);
        self.new_best = false;
        self.stats.game_active = true;
        info!("game started, best score {}", self.stats.best_score);
    }

    /// One simulation step.  Does nothing while inactive.
    pub fn tick(&mut self) -> TickReport {
        if !self.is_active() {
            return TickReport::default();
        }
        let report = self.world.tick(&mut self.settings, &mut self.stats);
        if self.stats.ships_left < 0 {
            self.game_over();
        }
        report
    }

    fn game_over(&mut self) {
        self.stats.game_active = false;
        self.world.ship.moving_left = false;
        self.world.ship.moving_right = false;
        self.new_best = self.stats.record_final_score(self.store.as_ref());
        info!(
            "game over: score {} (wave {}){}",
            self.stats.score,
            self.world.wave,
            if self.new_best { ", new best" } else { "" }
        );
    }

    /// Adopt a new play-area size.  Takes effect for the ship and button
    /// immediately and for the fleet on its next spawn.
    pub fn resize(&mut self, screen_width: f32, screen_height: f32) {
        self.settings.screen_width = screen_width;
        self.settings.screen_height = screen_height;
        self.play_button = Button::centered(self.play_button.label, &self.settings);
        self.world.ship.center(&self.settings);
    }
}
