//! Circle vs. obstacle collision
//!
//! Closest-point-on-AABB test against each barrier's hitbox. Both the
//! hitbox (inset horizontally) and the radius are forgiving: they are
//! smaller than what is drawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::obstacle::ObstaclePair;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Corners in any order
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            left: x0.min(x1),
            top: y0.min(y1),
            right: x0.max(x1),
            bottom: y0.max(y1),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right, self.bottom)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Point of the rectangle nearest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Which barrier was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Barrier {
    Upper,
    Lower,
}

/// Strict overlap: a circle just touching an edge does not collide
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.distance_squared(rect.closest_point(center)) < radius * radius
}

/// First barrier the entity overlaps, if any.
///
/// Reads the pair's current position every call; nothing is cached.
pub fn barrier_hit(
    entity: &Entity,
    collision_radius: f32,
    pair: &ObstaclePair,
    hitbox_offset: f32,
    viewport_height: f32,
) -> Option<Barrier> {
    let center = entity.center();
    if circle_rect_overlap(center, collision_radius, &pair.upper_hitbox(hitbox_offset)) {
        return Some(Barrier::Upper);
    }
    if circle_rect_overlap(
        center,
        collision_radius,
        &pair.lower_hitbox(hitbox_offset, viewport_height),
    ) {
        return Some(Barrier::Lower);
    }
    None
}

/// True if the entity overlaps either barrier
pub fn check_collision(
    entity: &Entity,
    collision_radius: f32,
    pair: &ObstaclePair,
    hitbox_offset: f32,
    viewport_height: f32,
) -> bool {
    barrier_hit(entity, collision_radius, pair, hitbox_offset, viewport_height).is_some()
}
