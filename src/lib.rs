//! Flappy Ball - side-scrolling obstacle arcade game engine
//!
//! Core modules:
//! - `sim`: Simulation (motion, obstacles, collisions, scoring, session lifecycle)
//! - `variant`: Data-driven per-theme tuning
//! - `persistence`: High score storage backends
//! - `host`: Adapter from platform callbacks to session commands
//! - `assets`: Fallbacks for assets that fail to load
//! - `autopilot`: Demo-mode controller

pub mod assets;
pub mod autopilot;
pub mod host;
pub mod persistence;
pub mod sim;
pub mod variant;

pub use host::{Gesture, HostAdapter};
pub use persistence::{HighScoreStore, MemoryStore};
pub use sim::{GameEvent, GamePhase, Session, Snapshot, Viewport};
pub use variant::{Variant, VariantConfig};

/// Engine-wide constants
pub mod consts {
    use crate::sim::Viewport;

    /// Tick interval while running (~40 Hz)
    pub const TICK_INTERVAL_MS: f64 = 25.0;
    /// Maximum ticks run for one host frame, however late it arrives
    pub const MAX_CATCHUP_TICKS: u32 = 8;
    /// Portrait phone screen, used until the host reports its size
    pub const DEFAULT_VIEWPORT: Viewport = Viewport::new(1080.0, 1920.0);
}
