//! The scrolling obstacle pair
//!
//! Only one pair is ever live. It is mutated in place: scrolled left each
//! tick and moved back to the right edge with a fresh gap once it has fully
//! left the screen.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::Viewport;
use crate::variant::VariantConfig;

/// Upper and lower barrier sharing one gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub gap: f32,
    /// Bottom edge of the upper barrier
    pub upper_height: f32,
    /// Rendered height of the lower barrier
    pub lower_height: f32,
    min_upper_height: f32,
    min_lower_height: f32,
}

impl ObstaclePair {
    /// Pair parked at the right edge with the variant's initial gap,
    /// clamped into the viewport
    pub fn new(config: &VariantConfig, viewport: Viewport) -> Self {
        let mut pair = Self {
            x: viewport.width,
            width: config.obstacle_width,
            gap: config.gap_size,
            upper_height: config.initial_upper_height,
            lower_height: 0.0,
            min_upper_height: config.min_upper_height,
            min_lower_height: config.min_lower_height,
        };
        pair.fit_to(viewport.height);
        pair
    }

    /// Top edge of the lower barrier
    #[inline]
    pub fn lower_top(&self) -> f32 {
        self.upper_height + self.gap
    }

    /// Horizontal center
    #[inline]
    pub fn midpoint(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Scroll left by `speed` pixels
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// Inclusive range a respawned `upper_height` is drawn from.
    ///
    /// The top is `h/2 - gap/2`. If the viewport is too small for the
    /// minimum, the range collapses onto the top rather than leaving it.
    pub fn upper_height_range(&self, viewport_height: f32) -> (f32, f32) {
        let hi = (viewport_height / 2.0 - self.gap / 2.0).floor().max(0.0);
        let lo = self.min_upper_height.ceil();
        if lo > hi {
            log::warn!(
                "Viewport height {} too small for gap {} (min upper {}), clamping to {}",
                viewport_height,
                self.gap,
                self.min_upper_height,
                hi
            );
            return (hi, hi);
        }
        (lo, hi)
    }

    /// Wrap to the right edge with a new random gap once the trailing edge
    /// is off-screen. Returns whether a respawn happened.
    pub fn respawn_if_needed(&mut self, viewport: Viewport, rng: &mut impl Rng) -> bool {
        if self.x + self.width >= 0.0 {
            return false;
        }

        let (lo, hi) = self.upper_height_range(viewport.height);
        // Whole pixels, like the sprite placement
        self.upper_height = rng.random_range(lo as u32..=hi as u32) as f32;
        self.x = viewport.width;
        self.update_lower_height(viewport.height);
        log::debug!(
            "Obstacle respawned at x={}, upper={}, lower={}",
            self.x,
            self.upper_height,
            self.lower_height
        );
        true
    }

    /// Pull the gap back into `upper_height_range` after the viewport
    /// changed under a live pair. Returns whether the gap moved.
    pub fn fit_to(&mut self, viewport_height: f32) -> bool {
        let (lo, hi) = self.upper_height_range(viewport_height);
        let upper = self.upper_height.clamp(lo, hi);
        let moved = upper != self.upper_height;
        if moved {
            log::debug!("Gap moved {} -> {} for height {}", self.upper_height, upper, viewport_height);
            self.upper_height = upper;
        }
        self.update_lower_height(viewport_height);
        moved
    }

    fn update_lower_height(&mut self, viewport_height: f32) {
        let top = self.lower_top().max(self.min_lower_height);
        self.lower_height = (viewport_height - top).max(0.0);
    }

    /// Upper barrier hitbox, inset horizontally by `offset` on both sides
    pub fn upper_hitbox(&self, offset: f32) -> Rect {
        let (left, right) = self.inset_span(offset);
        Rect::new(left, 0.0, right, self.upper_height)
    }

    /// Lower barrier hitbox, reaching the bottom of the viewport
    pub fn lower_hitbox(&self, offset: f32, viewport_height: f32) -> Rect {
        let (left, right) = self.inset_span(offset);
        let top = self.lower_top();
        Rect::new(left, top, right, viewport_height.max(top))
    }

    /// Horizontal hitbox span; an inset wider than the sprite collapses to its center line
    fn inset_span(&self, offset: f32) -> (f32, f32) {
        let left = self.x + offset;
        let right = self.x + self.width - offset;
        if left > right {
            let mid = self.midpoint();
            (mid, mid)
        } else {
            (left, right)
        }
    }

    /// Full sprite rectangles for rendering: (upper, lower)
    pub fn sprite_rects(&self, viewport_height: f32) -> (Rect, Rect) {
        let right = self.x + self.width;
        let top = self.lower_top();
        (
            Rect::new(self.x, 0.0, right, self.upper_height),
            Rect::new(self.x, top, right, viewport_height.max(top)),
        )
    }
}
