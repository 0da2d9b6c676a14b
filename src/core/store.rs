//! # Game Persistence
//!
//! Named games live in one JSON document, `games.json`, in the data
//! directory (`~/.sharebook/` by default):
//!
//! ```text
//! {
//!   "current_game": "rusty-trains",
//!   "games": {
//!     "rusty-trains": { "events": ["banksize 4000", ..], "created_at": .., "updated_at": .. }
//!   }
//! }
//! ```
//!
//! Only event logs are stored. All writes use atomic rename (write `.tmp`,
//! then `rename()`) for crash safety.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Named event logs plus a pointer to the game in play.
pub trait SessionStore {
    fn has(&self, name: &str) -> bool;
    fn get(&self, name: &str) -> Option<Vec<String>>;
    fn set(&mut self, name: &str, events: &[String]) -> Result<(), StoreError>;
    fn delete(&mut self, name: &str) -> Result<(), StoreError>;
    fn all(&self) -> BTreeMap<String, Vec<String>>;
    fn current_game(&self) -> Option<String>;
    fn set_current_game(&mut self, name: Option<&str>) -> Result<(), StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "game store I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "game store is not valid JSON: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GameRecord {
    pub events: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GameIndex {
    #[serde(default)]
    pub current_game: Option<String>,
    #[serde(default)]
    pub games: BTreeMap<String, GameRecord>,
}

impl GameIndex {
    fn has(&self, name: &str) -> bool {
        self.games.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<Vec<String>> {
        self.games.get(name).map(|record| record.events.clone())
    }

    fn set(&mut self, name: &str, events: &[String]) {
        let now = Utc::now().timestamp();
        let record = self.games.entry(name.to_string()).or_insert_with(|| GameRecord {
            created_at: now,
            ..GameRecord::default()
        });
        record.events = events.to_vec();
        record.updated_at = now;
    }

    fn delete(&mut self, name: &str) {
        self.games.remove(name);
        if self.current_game.as_deref() == Some(name) {
            self.current_game = None;
        }
    }

    fn all(&self) -> BTreeMap<String, Vec<String>> {
        self.games
            .iter()
            .map(|(name, record)| (name.clone(), record.events.clone()))
            .collect()
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// `games.json` on disk. Every change is written through immediately.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    index: GameIndex,
}

impl JsonFileStore {
    /// Open (or create) the store inside `dir`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        let path = dir.join("games.json");
        let index = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json).map_err(StoreError::Parse)?
        } else {
            GameIndex::default()
        };
        info!("Opened game store {} ({} games)", path.display(), index.games.len());
        Ok(Self { path, index })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, name: &str) -> Option<&GameRecord> {
        self.index.games.get(name)
    }

    fn save(&self) -> Result<(), StoreError> {
        atomic_write_json(&self.path, &self.index)?;
        debug!("Game store saved: {}", self.path.display());
        Ok(())
    }
}

impl SessionStore for JsonFileStore {
    fn has(&self, name: &str) -> bool {
        self.index.has(name)
    }

    fn get(&self, name: &str) -> Option<Vec<String>> {
        self.index.get(name)
    }

    fn set(&mut self, name: &str, events: &[String]) -> Result<(), StoreError> {
        self.index.set(name, events);
        self.save()
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        self.index.delete(name);
        self.save()
    }

    fn all(&self) -> BTreeMap<String, Vec<String>> {
        self.index.all()
    }

    fn current_game(&self) -> Option<String> {
        self.index.current_game.clone()
    }

    fn set_current_game(&mut self, name: Option<&str>) -> Result<(), StoreError> {
        self.index.current_game = name.map(str::to_string);
        self.save()
    }
}

/// Keeps everything in memory. Used by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    index: GameIndex,
}

impl SessionStore for MemoryStore {
    fn has(&self, name: &str) -> bool {
        self.index.has(name)
    }

    fn get(&self, name: &str) -> Option<Vec<String>> {
        self.index.get(name)
    }

    fn set(&mut self, name: &str, events: &[String]) -> Result<(), StoreError> {
        self.index.set(name, events);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        self.index.delete(name);
        Ok(())
    }

    fn all(&self) -> BTreeMap<String, Vec<String>> {
        self.index.all()
    }

    fn current_game(&self) -> Option<String> {
        self.index.current_game.clone()
    }

    fn set_current_game(&mut self, name: Option<&str>) -> Result<(), StoreError> {
        self.index.current_game = name.map(str::to_string);
        Ok(())
    }
}
