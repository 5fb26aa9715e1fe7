//! Session statistics and best-score persistence.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum PersistenceError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, contents: String },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io { path, source } => {
                write!(f, "best score file {}: {}", path.display(), source)
            }
            PersistenceError::Parse { path, contents } => write!(
                f,
                "best score file {} does not hold a number: {:?}",
                path.display(),
                contents
            ),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io { source, .. } => Some(source),
            PersistenceError::Parse { .. } => None,
        }
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

/// Somewhere a single best score can be kept between sessions.
pub trait ScoreStore {
    fn load(&self) -> Result<u64, PersistenceError>;
    fn save(&self, score: u64) -> Result<(), PersistenceError>;
}

/// Best score stored as a decimal string in a plain text file.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileScoreStore { path: path.into() }
    }

    /// `$HOME/.alien_invasion_score`, or the working directory without `HOME`.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".alien_invasion_score")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u64, PersistenceError> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| PersistenceError::Io {
                path: self.path.clone(),
                source,
            })?;
        contents
            .trim()
            .parse()
            .map_err(|_| PersistenceError::Parse {
                path: self.path.clone(),
                contents,
            })
    }

    fn save(&self, score: u64) -> Result<(), PersistenceError> {
        std::fs::write(&self.path, score.to_string()).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

// ── GameStats ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    /// Lives remaining.  Drops to −1 on the hit that ends the game.
    pub ships_left: i32,
    pub score: u64,
    pub best_score: u64,
    pub game_active: bool,
}

impl GameStats {
    /// Fresh stats with the best score read from `store`.  An unreadable
    /// store counts as a best score of zero.
    pub fn new(ship_limit: i32, store: &dyn ScoreStore) -> Self {
        let best_score = match store.load() {
            Ok(score) => score,
            Err(err) => {
                warn!("{err}; starting with a best score of 0");
                0
            }
        };
        GameStats {
            ships_left: ship_limit,
            score: 0,
            best_score,
            game_active: false,
        }
    }

    /// Reset the values that change during a session.
    pub fn reset(&mut self, ship_limit: i32) {
        self.ships_left = ship_limit;
        self.score = 0;
    }

    /// Lives for display; never negative.
    pub fn lives_shown(&self) -> u32 {
        self.ships_left.max(0) as u32
    }

    pub fn add_points(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Called once the session has ended.  Returns true if the score beat
    /// the best score; the new best is written to `store`, and a failed
    /// write is logged without interrupting the game.
    pub fn record_final_score(&mut self, store: &dyn ScoreStore) -> bool {
        if self.score <= self.best_score {
            return false;
        }
        self.best_score = self.score;
        info!("new best score: {}", self.best_score);
        if let Err(err) = store.save(self.best_score) {
            warn!("could not save best score: {err}");
        }
        true
    }
}
