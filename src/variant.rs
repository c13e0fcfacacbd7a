//! Themed game variants
//!
//! Every theme shares one simulation; what differs is captured in a
//! [`VariantConfig`] record. Built-in variants come from [`Variant::config`],
//! custom ones can be loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Cricket ball vs. bats
    #[default]
    Classic,
    Ghost,
    /// Wide icebergs, more forgiving hitbox, faster progression
    Island,
    Space,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Ghost,
        Variant::Island,
        Variant::Space,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Ghost => "Ghost",
            Variant::Island => "Island",
            Variant::Space => "Space",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "cricket" => Some(Variant::Classic),
            "ghost" => Some(Variant::Ghost),
            "island" => Some(Variant::Island),
            "space" => Some(Variant::Space),
            _ => None,
        }
    }

    /// Tuning record for this theme
    pub fn config(&self) -> VariantConfig {
        match self {
            Variant::Classic => VariantConfig::default(),
            Variant::Ghost => VariantConfig {
                storage_key: "highScoreGhost".to_string(),
                ..VariantConfig::default()
            },
            Variant::Island => VariantConfig {
                obstacle_width: 400.0,
                hitbox_offset: 100.0,
                collision_radius: 50.0,
                speed_tiers: vec![
                    SpeedTier::new(14, 30.0),
                    SpeedTier::new(10, 27.0),
                    SpeedTier::new(5, 22.0),
                ],
                storage_key: "highScoreIsland".to_string(),
                ..VariantConfig::default()
            },
            Variant::Space => VariantConfig {
                storage_key: "highScoreSpace".to_string(),
                ..VariantConfig::default()
            },
        }
    }
}

/// One step of the speed table: scores strictly above `above` scroll at `speed`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedTier {
    pub above: u32,
    pub speed: f32,
}

impl SpeedTier {
    pub const fn new(above: u32, speed: f32) -> Self {
        Self { above, speed }
    }
}

/// Per-variant tunables. Units are pixels, pixels/tick and pixels/tick².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
    // === Entity ===
    /// Fixed horizontal position of the entity center
    pub entity_x: f32,
    /// Vertical position at session start
    pub start_y: f32,
    /// Rendered sprite radius, also used for the viewport bounds check
    pub entity_radius: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Velocity set (not added) on an upward impulse; negative is up
    pub upward_impulse: f32,
    /// Velocity added by a downward nudge
    pub downward_nudge: f32,
    /// Radius used by the obstacle collision test
    pub collision_radius: f32,

    // === Obstacle ===
    pub obstacle_width: f32,
    pub gap_size: f32,
    /// Horizontal inset on both sides of the obstacle hitbox
    pub hitbox_offset: f32,
    pub min_upper_height: f32,
    pub min_lower_height: f32,
    /// Upper height used before the first respawn
    pub initial_upper_height: f32,

    // === Progression ===
    /// Scroll speed when no tier applies
    pub base_speed: f32,
    /// Ordered highest threshold first
    pub speed_tiers: Vec<SpeedTier>,
    /// Half-width of the band around the obstacle midpoint that fires the pass cue
    pub midpoint_tolerance: f32,
    /// Scores above this earn the "great" game-over rating
    pub great_score_threshold: u32,

    /// Persistence key for this variant's high score
    pub storage_key: String,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            entity_x: 200.0,
            start_y: 500.0,
            entity_radius: 25.0,
            gravity: 2.0,
            upward_impulse: -19.0,
            downward_nudge: 10.0,
            collision_radius: 30.0,

            obstacle_width: 100.0,
            gap_size: 400.0,
            hitbox_offset: 50.0,
            min_upper_height: 200.0,
            min_lower_height: 200.0,
            initial_upper_height: 250.0,

            base_speed: 17.0,
            speed_tiers: vec![
                SpeedTier::new(34, 30.0),
                SpeedTier::new(20, 27.0),
                SpeedTier::new(10, 22.0),
            ],
            midpoint_tolerance: 50.0,
            great_score_threshold: 20,

            storage_key: "highScore".to_string(),
        }
    }
}

/// Rejected variant configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed variant config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },

    #[error("speed tier thresholds must strictly descend ({previous} then {next})")]
    TierOrder { previous: u32, next: u32 },

    #[error("speed must not drop going up-tier (score > {above} scrolls at {speed})")]
    TierSpeed { above: u32, speed: f32 },

    #[error("storage key must not be empty")]
    EmptyStorageKey,
}

impl VariantConfig {
    /// Parse and validate a JSON config. Missing fields take Classic values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!("Loaded variant config '{}'", config.storage_key);
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange {
                    field,
                    expected: "a finite non-negative number",
                    value,
                })
            }
        }

        non_negative("entity_x", self.entity_x)?;
        non_negative("start_y", self.start_y)?;
        non_negative("entity_radius", self.entity_radius)?;
        non_negative("downward_nudge", self.downward_nudge)?;
        non_negative("collision_radius", self.collision_radius)?;
        non_negative("obstacle_width", self.obstacle_width)?;
        non_negative("gap_size", self.gap_size)?;
        non_negative("hitbox_offset", self.hitbox_offset)?;
        non_negative("min_upper_height", self.min_upper_height)?;
        non_negative("min_lower_height", self.min_lower_height)?;
        non_negative("initial_upper_height", self.initial_upper_height)?;
        non_negative("base_speed", self.base_speed)?;
        non_negative("midpoint_tolerance", self.midpoint_tolerance)?;

        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "gravity",
                expected: "positive",
                value: self.gravity,
            });
        }
        if !(self.upward_impulse.is_finite() && self.upward_impulse < 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "upward_impulse",
                expected: "negative",
                value: self.upward_impulse,
            });
        }

        // Walk from the lowest tier up: thresholds rise, speeds never drop
        let mut floor_speed = self.base_speed;
        for pair in self.speed_tiers.windows(2) {
            if pair[1].above >= pair[0].above {
                return Err(ConfigError::TierOrder {
                    previous: pair[0].above,
                    next: pair[1].above,
                });
            }
        }
        for tier in self.speed_tiers.iter().rev() {
            non_negative("speed_tiers.speed", tier.speed)?;
            if tier.speed < floor_speed {
                return Err(ConfigError::TierSpeed {
                    above: tier.above,
                    speed: tier.speed,
                });
            }
            floor_speed = tier.speed;
        }

        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_variants_validate() {
        for variant in Variant::ALL {
            assert!(variant.config().validate().is_ok(), "{}", variant.as_str());
        }
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let keys: std::collections::HashSet<_> =
            Variant::ALL.iter().map(|v| v.config().storage_key).collect();
        assert_eq!(keys.len(), Variant::ALL.len());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Variant::from_str("ISLAND"), Some(Variant::Island));
        assert_eq!(Variant::from_str("cricket"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("moon"), None);
        for variant in Variant::ALL {
            assert_eq!(Variant::from_str(variant.as_str()), Some(variant));
        }
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config =
            VariantConfig::from_json(r#"{ "gap_size": 350.0, "storage_key": "custom" }"#).unwrap();
        assert_eq!(config.gap_size, 350.0);
        assert_eq!(config.storage_key, "custom");
        assert_eq!(config.gravity, 2.0);
        assert_eq!(config.speed_tiers.len(), 3);
    }

    #[test]
    fn test_json_round_trip_island() {
        let island = Variant::Island.config();
        let json = island.to_json().unwrap();
        assert_eq!(VariantConfig::from_json(&json).unwrap(), island);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            VariantConfig::from_json("{ gravity: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_unordered_tiers() {
        let config = VariantConfig {
            speed_tiers: vec![SpeedTier::new(10, 22.0), SpeedTier::new(20, 27.0)],
            ..VariantConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TierOrder { previous: 10, next: 20 })
        ));
    }

    #[test]
    fn test_rejects_slower_upper_tier() {
        let config = VariantConfig {
            speed_tiers: vec![SpeedTier::new(20, 18.0), SpeedTier::new(10, 22.0)],
            ..VariantConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TierSpeed { above: 20, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_physics() {
        let upward_gravity = VariantConfig {
            gravity: -1.0,
            ..VariantConfig::default()
        };
        assert!(matches!(
            upward_gravity.validate(),
            Err(ConfigError::OutOfRange { field: "gravity", .. })
        ));

        let downward_impulse = VariantConfig {
            upward_impulse: 5.0,
            ..VariantConfig::default()
        };
        assert!(downward_impulse.validate().is_err());

        let no_key = VariantConfig {
            storage_key: String::new(),
            ..VariantConfig::default()
        };
        assert!(matches!(no_key.validate(), Err(ConfigError::EmptyStorageKey)));
    }
}
