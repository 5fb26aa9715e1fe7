mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, LevelFilter};

use alien_invasion::game::{Command, Flow, Game};
use alien_invasion::settings::Settings;
use alien_invasion::stats::FileScoreStore;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Held-key constants ────────────────────────────────────────────────────────

/// Min frames between shots while Space is held.
const SHOOT_COOLDOWN: u32 = 8;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: the terminal is in raw mode and owned by the renderer.
/// Logging is simply off if the file cannot be created.
fn init_logging() {
    let path = std::env::temp_dir().join("alien_invasion.log");
    let Ok(file) = File::create(&path) else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    if log::max_level() > LevelFilter::Off {
        info!("logging to {}", path.display());
    }
}

// ── Event translation ─────────────────────────────────────────────────────────

/// Play-area size for the current terminal.
fn play_area() -> std::io::Result<(f32, f32)> {
    let (width, height) = terminal::size()?;
    Ok((
        width as f32,
        height.saturating_sub(display::CHROME_ROWS) as f32,
    ))
}

/// One-shot actions for a key press.
fn key_press_command(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Restart),
        _ => None,
    }
}

fn mouse_command(mouse: MouseEvent) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Command::Click {
            x: mouse.column as f32,
            y: mouse.row as f32 - display::PLAY_TOP as f32,
        }),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we keep
/// a `key_frame` map with the frame of the last press/repeat event for every
/// key.  Each frame the keys that are still "fresh" become the ship's
/// movement intents, so Space + A/D can be held at the same time.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shoot_cooldown: u32 = 0;
    let mut frame: u64 = 0;
    let mut cursor_shown = !game.cursor_visible();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut commands = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        commands.extend(key_press_command(code, modifiers));
                        if code == KeyCode::Char(' ') && shoot_cooldown == 0 {
                            commands.push(Command::Fire);
                            shoot_cooldown = SHOOT_COOLDOWN;
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(mouse) => commands.extend(mouse_command(mouse)),
                Event::Resize(..) => {
                    let (width, height) = play_area()?;
                    game.resize(width, height);
                }
                _ => {}
            }
        }

        // ── Held keys ─────────────────────────────────────────────────────────
        let left = any_held(
            &key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        );
        let right = any_held(
            &key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        );
        commands.push(Command::SetMoving { left, right });
        if shoot_cooldown == 0 && is_held(&key_frame, &KeyCode::Char(' '), frame) {
            commands.push(Command::Fire);
            shoot_cooldown = SHOOT_COOLDOWN;
        }
        shoot_cooldown = shoot_cooldown.saturating_sub(1);

        for command in commands {
            if game.handle(command) == Flow::Quit {
                return Ok(());
            }
        }

        game.tick();

        if game.cursor_visible() != cursor_shown {
            cursor_shown = game.cursor_visible();
            if cursor_shown {
                out.execute(cursor::Show)?;
            } else {
                out.execute(cursor::Hide)?;
            }
        }

        display::render(out, game)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging();

    let (width, height) = play_area().context("reading terminal size")?;
    let store = FileScoreStore::new(FileScoreStore::default_path());
    info!("best score file: {}", store.path().display());
    let mut game = Game::new(Settings::new(width, height), Box::new(store));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(EnableMouseCapture)
        .context("enabling mouse capture")?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(
        "exiting with score {} (best {})",
        game.stats.score, game.stats.best_score
    );
    result.context("running game loop")
}
