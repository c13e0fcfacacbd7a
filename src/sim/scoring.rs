//! Score, high score and difficulty progression

use serde::{Deserialize, Serialize};

use crate::variant::SpeedTier;

/// Obstacle scroll speed for a score.
///
/// Tiers are checked highest threshold first; the first one the score is
/// strictly above wins. Falls back to `base_speed`.
pub fn speed_for_score(base_speed: f32, tiers: &[SpeedTier], score: u32) -> f32 {
    tiers
        .iter()
        .find(|tier| score > tier.above)
        .map_or(base_speed, |tier| tier.speed)
}

/// Current and best score for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
}

impl Scoreboard {
    pub fn new(high_score: u32) -> Self {
        Self { score: 0, high_score }
    }

    /// Count one obstacle. Returns the new best if this beat it.
    pub fn on_obstacle_passed(&mut self) -> Option<u32> {
        self.score = self.score.saturating_add(1);
        self.record_best()
    }

    /// Lift the high score to the current score if it is higher
    pub fn record_best(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.high_score)
        } else {
            None
        }
    }
}

/// How the run went, for picking game-over art
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Great,
    TryAgain,
}

impl Rating {
    pub fn for_score(score: u32, great_threshold: u32) -> Self {
        if score > great_threshold {
            Rating::Great
        } else {
            Rating::TryAgain
        }
    }
}

/// Final result handed to the game-over dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u32,
    pub high_score: u32,
    /// This run set a new best at some point
    pub new_best: bool,
    pub rating: Rating,
}
