//! Game entity types and the small amount of motion logic each one owns.
//!
//! Every entity is an axis-aligned rectangle.  Per-tick motion goes through
//! the `Entity` trait; everything that involves more than one entity
//! (collisions, fleet edges, waves) lives in `compute`.

use crate::settings::Settings;

// ── Geometry ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Motion capability ────────────────────────────────────────────────────────

/// Everything an entity needs to advance itself by one tick.
#[derive(Clone, Copy, Debug)]
pub struct Motion {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    /// +1.0 = fleet moving right, −1.0 = moving left.
    pub fleet_direction: f32,
    pub screen_width: f32,
}

impl Motion {
    pub fn new(settings: &Settings, fleet_direction: f32) -> Self {
        Motion {
            ship_speed: settings.ship_speed(),
            bullet_speed: settings.bullet_speed(),
            alien_speed: settings.alien_speed(),
            fleet_direction,
            screen_width: settings.screen_width,
        }
    }
}

pub trait Entity {
    fn update(&mut self, motion: &Motion);
    fn bounding_rect(&self) -> Rect;
}

// ── Ship ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            rect: Rect::new(0.0, 0.0, settings.ship_width, settings.ship_height),
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    /// Place the ship at the bottom centre of the screen.
    pub fn center(&mut self, settings: &Settings) {
        self.rect.x = (settings.screen_width - self.rect.width) / 2.0;
        self.rect.y = settings.screen_height - self.rect.height;
    }
}

impl Entity for Ship {
    fn update(&mut self, motion: &Motion) {
        if self.moving_right && self.rect.right() < motion.screen_width {
            self.rect.x = (self.rect.x + motion.ship_speed)
                .min(motion.screen_width - self.rect.width);
        }
        if self.moving_left && self.rect.left() > 0.0 {
            self.rect.x = (self.rect.x - motion.ship_speed).max(0.0);
        }
    }

    fn bounding_rect(&self) -> Rect {
        self.rect
    }
}

// ── Bullet ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
    /// `rect.y` before the latest move.
    pub prev_y: f32,
}

impl Bullet {
    pub fn new(rect: Rect) -> Self {
        Bullet { rect, prev_y: rect.y }
    }

    /// A bullet whose mid-top sits on the ship's mid-top.
    pub fn fired_from(ship: &Ship, settings: &Settings) -> Self {
        let x = ship.rect.center_x() - settings.bullet_width / 2.0;
        Bullet::new(Rect::new(
            x,
            ship.rect.top(),
            settings.bullet_width,
            settings.bullet_height,
        ))
    }

    /// Everything the bullet covered during its latest move, from its
    /// current top down to where its bottom used to be.
    pub fn swept_rect(&self) -> Rect {
        let top = self.rect.y.min(self.prev_y);
        let bottom = self.rect.y.max(self.prev_y) + self.rect.height;
        Rect::new(self.rect.x, top, self.rect.width, bottom - top)
    }

    /// Fully above the top of the screen.
    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0.0
    }
}

impl Entity for Bullet {
    fn update(&mut self, motion: &Motion) {
        self.prev_y = self.rect.y;
        self.rect.y -= motion.bullet_speed;
    }

    fn bounding_rect(&self) -> Rect {
        self.rect
    }
}

// ── Alien ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Alien {
    pub rect: Rect,
}

impl Alien {
    pub fn new(x: f32, y: f32, settings: &Settings) -> Self {
        Alien {
            rect: Rect::new(x, y, settings.alien_width, settings.alien_height),
        }
    }

    /// True when the alien has reached the edge it is heading towards.
    pub fn touches_edge(&self, fleet_direction: f32, screen_width: f32) -> bool {
        if fleet_direction > 0.0 {
            self.rect.right() >= screen_width
        } else {
            self.rect.left() <= 0.0
        }
    }
}

impl Entity for Alien {
    fn update(&mut self, motion: &Motion) {
        self.rect.x += motion.alien_speed * motion.fleet_direction;
    }

    fn bounding_rect(&self) -> Rect {
        self.rect
    }
}

// ── Render view ──────────────────────────────────────────────────────────────

/// Borrowed view of one drawable entity; renderers match on the variant.
#[derive(Clone, Copy, Debug)]
pub enum Sprite<'a> {
    Ship(&'a Ship),
    Bullet(&'a Bullet),
    Alien(&'a Alien),
}

impl Sprite<'_> {
    pub fn rect(&self) -> Rect {
        match self {
            Sprite::Ship(s) => s.bounding_rect(),
            Sprite::Bullet(b) => b.bounding_rect(),
            Sprite::Alien(a) => a.bounding_rect(),
        }
    }
}

// ── Entity pool ──────────────────────────────────────────────────────────────

/// Dense storage for short-lived entities.
///
/// Removal is two-phase: `mark` during a pass (indices stay valid), then
/// `compact` once the pass is over.
#[derive(Clone, Debug)]
pub struct Pool<T> {
    items: Vec<T>,
    removed: Vec<bool>,
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Pool {
            items: Vec::new(),
            removed: Vec::new(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.removed.push(false);
    }

    /// Number of stored entities, including any marked but not yet compacted.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Flag an entity for removal.  Returns false if it was already flagged.
    pub fn mark(&mut self, index: usize) -> bool {
        match self.removed.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.removed.get(index).copied().unwrap_or(false)
    }

    /// Flag every entity matching `pred`.  Returns how many were newly flagged.
    pub fn mark_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut count = 0;
        for i in 0..self.items.len() {
            if pred(&self.items[i]) && self.mark(i) {
                count += 1;
            }
        }
        count
    }

    /// Drop every flagged entity.  Returns how many were dropped.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        let mut flags = self.removed.iter();
        self.items.retain(|_| !flags.next().copied().unwrap_or(false));
        self.removed.clear();
        self.removed.resize(self.items.len(), false);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.removed.clear();
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Pool::new()
    }
}
