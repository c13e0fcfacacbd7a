//! Asset load failures and their fallbacks
//!
//! Missing art, fonts or sound never stop a game. The host reports each
//! failure here, draws the returned [`Fallback`] primitive instead, and shows
//! the queued notices once.

use serde::{Deserialize, Serialize};

/// Assets a themed game screen loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    EntitySprite,
    ObstacleSprite,
    Background,
    Font,
    PassSound,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::EntitySprite => "entity sprite",
            AssetKind::ObstacleSprite => "obstacle sprite",
            AssetKind::Background => "background",
            AssetKind::Font => "font",
            AssetKind::PassSound => "pass sound",
        }
    }

    /// Degenerate stand-in drawn or played instead
    pub fn fallback(&self) -> Fallback {
        match self {
            AssetKind::EntitySprite => Fallback::Circle { rgb: 0xFFFF00 },
            AssetKind::ObstacleSprite => Fallback::Rect { rgb: 0x00FF00 },
            AssetKind::Background => Fallback::Fill { rgb: 0x00FFFF },
            AssetKind::Font => Fallback::DefaultBoldFont,
            AssetKind::PassSound => Fallback::Silent,
        }
    }
}

/// Primitive the render/audio collaborator substitutes for a missing asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fallback {
    Circle { rgb: u32 },
    Rect { rgb: u32 },
    Fill { rgb: u32 },
    DefaultBoldFont,
    Silent,
}

/// What failed to load for the current screen
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    failed: Vec<AssetKind>,
    notices: Vec<String>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed load. Only the first failure per asset queues a notice.
    pub fn report_failure(&mut self, kind: AssetKind, reason: &str) -> Fallback {
        log::warn!("Failed to load {}: {}", kind.as_str(), reason);
        if !self.failed.contains(&kind) {
            self.failed.push(kind);
            self.notices.push(format!("Error loading {}", kind.as_str()));
        }
        kind.fallback()
    }

    /// Fallback in effect for `kind`, if its load failed
    pub fn fallback_for(&self, kind: AssetKind) -> Option<Fallback> {
        self.failed.contains(&kind).then(|| kind.fallback())
    }

    pub fn is_degraded(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Transient user notices not yet shown
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}
