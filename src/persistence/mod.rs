//! High score persistence
//!
//! The simulation never touches storage directly; it is handed a
//! [`HighScoreStore`]. One integer is kept per variant storage key.
//!
//! Backends:
//! - [`MemoryStore`]: shared in-memory map (tests, headless runs)
//! - [`JsonFileStore`]: JSON object on disk (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32)

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::{JsonFileStore, StoreError};
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Persistence collaborator for per-variant high scores.
///
/// Implementations swallow their own I/O failures: a failed load reads as 0
/// and a failed save is logged. Gameplay never stops over storage.
pub trait HighScoreStore {
    fn load(&self, key: &str) -> u32;
    fn save(&mut self, key: &str, score: u32);
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: Rc<RefCell<HashMap<String, u32>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry
    pub fn with_score(key: &str, score: u32) -> Self {
        let store = Self::new();
        store.scores.borrow_mut().insert(key.to_string(), score);
        store
    }

    /// Stored value, `None` if the key was never saved
    pub fn get(&self, key: &str) -> Option<u32> {
        self.scores.borrow().get(key).copied()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self, key: &str) -> u32 {
        self.get(key).unwrap_or(0)
    }

    fn save(&mut self, key: &str, score: u32) {
        self.scores.borrow_mut().insert(key.to_string(), score);
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self, key: &str) -> u32 {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, score: u32) {
        (**self).save(key, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.load("highScore"), 0);
        assert_eq!(store.get("highScore"), None);
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let mut writer = MemoryStore::new();
        let reader = writer.clone();
        writer.save("highScoreIsland", 12);
        assert_eq!(reader.load("highScoreIsland"), 12);
        assert_eq!(reader.load("highScore"), 0);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let inner = MemoryStore::with_score("highScore", 7);
        let mut boxed: Box<dyn HighScoreStore> = Box::new(inner.clone());
        assert_eq!(boxed.load("highScore"), 7);
        boxed.save("highScore", 9);
        assert_eq!(inner.load("highScore"), 9);
    }
}
