//! Browser LocalStorage backend (wasm32)

use super::HighScoreStore;

/// One LocalStorage item per variant key, value is the decimal score
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self, key: &str) -> u32 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score for {key} reads as 0");
            return 0;
        };
        match storage.get_item(key) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                log::warn!("Discarding malformed high score {key}={value}");
                0
            }),
            _ => 0,
        }
    }

    fn save(&mut self, key: &str, score: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score {key}={score} not saved");
            return;
        };
        if storage.set_item(key, &score.to_string()).is_err() {
            log::warn!("Failed to save high score {key}={score}");
        } else {
            log::info!("High score saved: {key}={score}");
        }
    }
}
