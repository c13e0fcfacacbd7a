//! Game simulation
//!
//! All gameplay logic lives here. Nothing in this module draws, plays
//! sound or touches storage directly:
//! - Storage goes through an injected `HighScoreStore`
//! - Sound and dialogs are driven by drained `GameEvent`s
//! - Randomness comes from a seeded RNG owned by the session

pub mod collision;
pub mod entity;
pub mod obstacle;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{Barrier, Rect, barrier_hit, check_collision, circle_rect_overlap};
pub use entity::Entity;
pub use obstacle::ObstaclePair;
pub use scoring::{GameOverSummary, Rating, Scoreboard, speed_for_score};
pub use state::{GameEvent, GamePhase, Session, Snapshot, Viewport};
pub use tick::tick;
