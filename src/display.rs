//! Rendering layer.  All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game.  No game logic is performed; this module only translates state
//! into terminal commands.
//!
//! Layout: row 0 is the scoreboard, the play area starts at `PLAY_TOP`, and
//! the last row holds the controls hint.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use alien_invasion::entities::{Alien, Bullet, Ship, Sprite};
use alien_invasion::game::{Button, Game};

pub const PLAY_TOP: u16 = 1;

/// Rows taken by the scoreboard and the hint line.
pub const CHROME_ROWS: u16 = 2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Black;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_WAVE: Color = Color::Green;
const C_SHIP: Color = Color::White;
const C_ALIEN: Color = Color::Green;
const C_BULLET: Color = Color::Grey;
const C_BUTTON: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;

    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_scoreboard(out, game, width)?;

    for sprite in game.world.sprites() {
        match sprite {
            Sprite::Ship(ship) => draw_ship(out, ship, width, height)?,
            Sprite::Alien(alien) => draw_alien(out, alien, width, height)?,
            Sprite::Bullet(bullet) => draw_bullet(out, bullet, width, height)?,
        }
    }

    if !game.is_active() {
        if game.stats.ships_left < 0 {
            draw_game_over(out, game, width)?;
        }
        draw_button(out, &game.play_button)?;
    }

    draw_controls_hint(out, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Terminal cell for a play-area position, or `None` if it falls off-screen.
fn cell(x: f32, y: f32, width: u16, height: u16) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = x.floor() as u16;
    let row = (y.floor() as u16).saturating_add(PLAY_TOP);
    if col >= width || row >= height.saturating_sub(1) {
        return None;
    }
    Some((col, row))
}

fn put<W: Write>(
    out: &mut W,
    x: f32,
    y: f32,
    text: &str,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    if let Some((col, row)) = cell(x, y, width, height) {
        let room = (width - col) as usize;
        let clipped: String = text.chars().take(room).collect();
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(clipped))?;
    }
    Ok(())
}

// ── Scoreboard (row 0) ───────────────────────────────────────────────────────

fn draw_scoreboard<W: Write>(out: &mut W, game: &Game, width: u16) -> std::io::Result<()> {
    let stats = &game.stats;

    // Best score — top left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(format!("Best:{:>8}", stats.best_score)))?;

    // Wave — centre
    let wave_str = format!("[ WAVE {} ]", game.world.wave);
    let wx = (width / 2).saturating_sub(wave_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave_str))?;

    // Lives and score — top right
    let hearts: String = "♥".repeat(stats.lives_shown() as usize);
    let lives_str = format!("{} ", hearts);
    let score_str = format!("Score:{:>8}", stats.score);
    let used = lives_str.chars().count() + score_str.chars().count();
    let rx = width.saturating_sub(used as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, ship: &Ship, width: u16, height: u16) -> std::io::Result<()> {
    // 3×2 sprite:
    //   ▲      ← nose
    //  /█\     ← fuselage + wings
    let r = ship.rect;
    out.queue(style::SetForegroundColor(C_SHIP))?;
    put(out, r.x + 1.0, r.y, "▲", width, height)?;
    put(out, r.x, r.y + 1.0, "/█\\", width, height)
}

fn draw_alien<W: Write>(out: &mut W, alien: &Alien, width: u16, height: u16) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_ALIEN))?;
    put(out, alien.rect.x, alien.rect.y, "«▼»", width, height)
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Bullet,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BULLET))?;
    put(out, bullet.rect.x, bullet.rect.y, "║", width, height)
}

// ── Play button ───────────────────────────────────────────────────────────────

fn draw_button<W: Write>(out: &mut W, button: &Button) -> std::io::Result<()> {
    let r = button.rect;
    let col = r.x.max(0.0) as u16;
    let row = r.y.max(0.0) as u16 + PLAY_TOP;
    let inner = (r.width as usize).saturating_sub(2);

    out.queue(style::SetForegroundColor(C_BUTTON))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(inner))))?;
    out.queue(cursor::MoveTo(col, row + 1))?;
    out.queue(Print(format!("║{:^inner$}║", button.label, inner = inner)))?;
    out.queue(cursor::MoveTo(col, row + 2))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(inner))))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   P / click : Play   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, game: &Game, width: u16) -> std::io::Result<()> {
    let stats = &game.stats;
    let new_best = game.new_best();
    let score_line = format!("Final Score: {:>8}", stats.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>8} ★", stats.best_score)
    } else {
        format!("Best Score:  {:>8}", stats.best_score)
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), if new_best { Color::Yellow } else { Color::DarkGrey }),
    ];

    // Stack the overlay directly above the play button.
    let cx = width / 2;
    let button_row = game.play_button.rect.y.max(0.0) as u16 + PLAY_TOP;
    let start_row = button_row.saturating_sub(lines.len() as u16 + 1);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
