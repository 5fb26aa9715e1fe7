//! Game-world simulation: fleet layout and motion, bullets, collisions,
//! waves and the ship-hit handler.
//!
//! Free functions work on narrow pieces of state so they can be tested on
//! their own; `World::tick` strings them together in a fixed order.

use log::{debug, info};

use crate::entities::{Alien, Bullet, Entity, Motion, Pool, Ship, Sprite};
use crate::settings::Settings;
use crate::stats::GameStats;

// ── Fleet layout ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FleetGrid {
    pub columns: usize,
    pub rows: usize,
}

impl FleetGrid {
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How many aliens fit across and down, leaving a one-alien margin at the
/// sides and top plus room above the ship.  A screen that is too small
/// yields an empty grid.
pub fn fleet_grid(settings: &Settings) -> FleetGrid {
    let aw = settings.alien_width;
    let ah = settings.alien_height;
    let columns = ((settings.screen_width - 2.0 * aw) / (2.0 * aw)).floor();
    let rows = ((settings.screen_height - 3.0 * ah - settings.ship_height) / (2.0 * ah)).floor();
    FleetGrid {
        columns: columns.max(0.0) as usize,
        rows: rows.max(0.0) as usize,
    }
}

/// Top-left corner of the alien in column `column`, row `row`.
pub fn alien_position(column: usize, row: usize, settings: &Settings) -> (f32, f32) {
    let aw = settings.alien_width;
    let ah = settings.alien_height;
    (aw + 2.0 * aw * column as f32, ah + 2.0 * ah * row as f32)
}

/// A full fleet at the canonical grid layout.
pub fn spawn_fleet(settings: &Settings) -> Pool<Alien> {
    let grid = fleet_grid(settings);
    let mut aliens = Pool::new();
    for row in 0..grid.rows {
        for column in 0..grid.columns {
            let (x, y) = alien_position(column, row, settings);
            aliens.push(Alien::new(x, y, settings));
        }
    }
    debug!("spawned fleet: {} columns x {} rows", grid.columns, grid.rows);
    aliens
}

// ── Fleet motion ─────────────────────────────────────────────────────────────

/// True if any alien has reached the edge the fleet is heading towards.
/// Stops scanning at the first hit.
pub fn fleet_touches_edge(aliens: &Pool<Alien>, fleet_direction: f32, screen_width: f32) -> bool {
    aliens
        .iter()
        .any(|alien| alien.touches_edge(fleet_direction, screen_width))
}

/// Drop the whole fleet and reverse its direction.
pub fn change_fleet_direction(aliens: &mut Pool<Alien>, fleet_direction: &mut f32, drop: f32) {
    for alien in aliens.iter_mut() {
        alien.rect.y += drop;
    }
    *fleet_direction = -*fleet_direction;
}

/// One tick of fleet motion: edge check (at most one flip and drop), then
/// every alien moves sideways in the current direction.  Returns true if
/// the fleet flipped.
pub fn update_fleet(
    aliens: &mut Pool<Alien>,
    fleet_direction: &mut f32,
    settings: &Settings,
) -> bool {
    let flipped = fleet_touches_edge(aliens, *fleet_direction, settings.screen_width);
    if flipped {
        change_fleet_direction(aliens, fleet_direction, settings.fleet_drop_speed);
    }
    let motion = Motion::new(settings, *fleet_direction);
    for alien in aliens.iter_mut() {
        alien.update(&motion);
    }
    flipped
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Whether another bullet may be fired under the current cap.
pub fn can_fire(bullets: &Pool<Bullet>, settings: &Settings) -> bool {
    match settings.bullets_allowed {
        Some(cap) => bullets.len() < cap,
        None => true,
    }
}

pub fn advance_bullets(bullets: &mut Pool<Bullet>, motion: &Motion) {
    for bullet in bullets.iter_mut() {
        bullet.update(motion);
    }
}

/// Drop bullets that left the top of the screen.  Returns the number dropped.
pub fn prune_bullets(bullets: &mut Pool<Bullet>) -> usize {
    bullets.mark_where(Bullet::is_off_screen);
    bullets.compact()
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Remove every bullet and alien that overlap.  A bullet collides along
/// the whole path of its latest move, so fast bullets cannot skip over an
/// alien.  A bullet takes out every alien it touches; an alien already
/// taken out this pass cannot stop a second bullet.  Returns the number of
/// aliens destroyed.
pub fn resolve_bullet_hits(bullets: &mut Pool<Bullet>, aliens: &mut Pool<Alien>) -> usize {
    let mut destroyed = 0;
    for bi in 0..bullets.len() {
        let Some(bullet) = bullets.get(bi) else { continue };
        let bullet_rect = bullet.swept_rect();
        let mut hit = false;
        for ai in 0..aliens.len() {
            if aliens.is_marked(ai) {
                continue;
            }
            let overlaps = aliens
                .get(ai)
                .map(|alien| alien.bounding_rect().overlaps(&bullet_rect))
                .unwrap_or(false);
            if overlaps {
                hit = true;
                if aliens.mark(ai) {
                    destroyed += 1;
                }
            }
        }
        if hit {
            bullets.mark(bi);
        }
    }
    bullets.compact();
    aliens.compact();
    destroyed
}

pub fn ship_collides(ship: &Ship, aliens: &Pool<Alien>) -> bool {
    let ship_rect = ship.bounding_rect();
    aliens
        .iter()
        .any(|alien| alien.bounding_rect().overlaps(&ship_rect))
}

pub fn aliens_reached_bottom(aliens: &Pool<Alien>, screen_height: f32) -> bool {
    aliens
        .iter()
        .any(|alien| alien.bounding_rect().bottom() >= screen_height)
}

// ── World ────────────────────────────────────────────────────────────────────

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub aliens_destroyed: usize,
    pub points: u64,
    pub wave_cleared: bool,
    pub ship_hit: bool,
}

#[derive(Clone, Debug)]
pub struct World {
    pub ship: Ship,
    pub bullets: Pool<Bullet>,
    pub aliens: Pool<Alien>,
    /// +1.0 = right, −1.0 = left.
    pub fleet_direction: f32,
    /// Ticks left in the post-hit freeze.
    pub stun: u32,
    /// 1-based wave number within the session.
    pub wave: u32,
}

impl World {
    pub fn new(settings: &Settings) -> Self {
        World {
            ship: Ship::new(settings),
            bullets: Pool::new(),
            aliens: spawn_fleet(settings),
            fleet_direction: 1.0,
            stun: 0,
            wave: 1,
        }
    }

    /// Back to the start of a session: fresh fleet, no bullets, ship centred.
    pub fn reset(&mut self, settings: &Settings) {
        self.respawn(settings);
        self.ship.moving_left = false;
        self.ship.moving_right = false;
        self.fleet_direction = 1.0;
        self.stun = 0;
        self.wave = 1;
    }

    fn respawn(&mut self, settings: &Settings) {
        self.bullets.clear();
        self.aliens = spawn_fleet(settings);
        self.ship.center(settings);
    }

    pub fn is_stunned(&self) -> bool {
        self.stun > 0
    }

    /// Fire from the ship's nose.  Refused while stunned or at the cap.
    pub fn fire(&mut self, settings: &Settings) -> bool {
        if self.is_stunned() || !can_fire(&self.bullets, settings) {
            return false;
        }
        self.bullets.push(Bullet::fired_from(&self.ship, settings));
        true
    }

    /// Everything drawable, ship first.
    pub fn sprites(&self) -> impl Iterator<Item = Sprite<'_>> {
        std::iter::once(Sprite::Ship(&self.ship))
            .chain(self.aliens.iter().map(Sprite::Alien))
            .chain(self.bullets.iter().map(Sprite::Bullet))
    }

    /// Advance the world by one tick.
    ///
    /// Order: ship, bullets, fleet, bullet/alien hits, pruning, ship hit,
    /// wave check.  Bullets are pruned after the hit check so one that
    /// leaves the screen this tick still collides along its path.
    /// While stunned the world stays frozen and only the stun counts down.
    pub fn tick(&mut self, settings: &mut Settings, stats: &mut GameStats) -> TickReport {
        let mut report = TickReport::default();
        if self.is_stunned() {
            self.stun -= 1;
            return report;
        }

        let motion = Motion::new(settings, self.fleet_direction);
        self.ship.update(&motion);
        advance_bullets(&mut self.bullets, &motion);
        update_fleet(&mut self.aliens, &mut self.fleet_direction, settings);

        let destroyed = resolve_bullet_hits(&mut self.bullets, &mut self.aliens);
        prune_bullets(&mut self.bullets);
        if destroyed > 0 {
            report.aliens_destroyed = destroyed;
            report.points = settings.alien_points().saturating_mul(destroyed as u64);
            stats.add_points(report.points);
        }

        if ship_collides(&self.ship, &self.aliens)
            || aliens_reached_bottom(&self.aliens, settings.screen_height)
        {
            self.ship_hit(settings, stats);
            report.ship_hit = true;
        } else if self.aliens.is_empty() {
            self.bullets.clear();
            settings.increase_speed();
            self.aliens = spawn_fleet(settings);
            self.wave += 1;
            report.wave_cleared = true;
            if self.aliens.is_empty() {
                debug!("wave {} spawned no aliens", self.wave);
            } else {
                info!("wave cleared, starting wave {}", self.wave);
            }
        }

        report
    }

    /// Lose a life and start over with a fresh fleet.  The caller ends the
    /// game once `ships_left` goes negative.
    pub fn ship_hit(&mut self, settings: &Settings, stats: &mut GameStats) {
        stats.ships_left -= 1;
        self.respawn(settings);
        if stats.ships_left >= 0 {
            self.stun = settings.stun_ticks;
        }
        debug!("ship hit, {} ships left", stats.ships_left);
    }
}
