//! Best-score persistence
//!
//! One integer survives between sessions: the best score ever achieved.
//! It is read once at startup and written only when a run ends above it.
//! Storage failures are swallowed and logged; the game plays on without a
//! record.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use serde::{Deserialize, Serialize};

/// Where the best score lives between sessions
pub trait ScoreStore {
    /// Best score on record, 0 when absent or unreadable
    fn load(&mut self) -> u32;
    /// Persist a new record
    fn save(&mut self, best: u32);
}

/// Session-only record; the default for tests and hosts without storage
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    best: u32,
}

impl MemoryScoreStore {
    pub fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> u32 {
        self.best
    }

    fn save(&mut self, best: u32) {
        self.best = best;
    }
}

/// JSON file record for native hosts
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Serialize, Deserialize)]
struct Record {
    best: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileScoreStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileScoreStore {
    fn load(&mut self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<Record>(&json) {
                Ok(record) => record.best,
                Err(e) => {
                    log::warn!("ignoring corrupt high score file: {e}");
                    0
                }
            },
            Err(_) => {
                log::info!("no high score on record, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, best: u32) {
        match serde_json::to_string(&Record { best }) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    log::warn!("high score write failed: {e}");
                }
            }
            Err(e) => log::warn!("high score serialization failed: {e}"),
        }
    }
}

/// LocalStorage record (WASM only), stored as a bare integer string
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalScoreStore {
    const STORAGE_KEY: &'static str = "lane_rush_high_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalScoreStore {
    fn load(&mut self) -> u32 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = raw.parse() {
                    return best;
                }
                log::warn!("ignoring unparseable high score entry");
            }
        }
        0
    }

    fn save(&mut self, best: u32) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(Self::STORAGE_KEY, &best.to_string());
            log::info!("High score saved");
        }
    }
}
