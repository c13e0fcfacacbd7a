//! JSON file backend (native)

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::HighScoreStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("high score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// High scores kept as a flat JSON object, `{ "highScore": 12, ... }`.
///
/// The whole map is cached in memory and rewritten on every save.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    scores: BTreeMap<String, u32>,
}

impl JsonFileStore {
    /// Open a store at `path`. A missing or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match Self::read(&path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores from {}", scores.len(), path.display());
                scores
            }
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, scores }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<BTreeMap<String, u32>, StoreError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write the cached map to disk via a temp file, then rename over the old one
    pub fn flush(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&self.scores)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self, key: &str) -> u32 {
        self.scores.get(key).copied().unwrap_or(0)
    }

    fn save(&mut self, key: &str, score: u32) {
        self.scores.insert(key.to_string(), score);
        match self.flush() {
            Ok(()) => log::debug!("Saved {key}={score} to {}", self.path.display()),
            Err(e) => log::warn!("Failed to save high score {key}={score}: {e}"),
        }
    }
}
