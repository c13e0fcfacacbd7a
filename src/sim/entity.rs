//! Controllable entity motion
//!
//! Explicit Euler, one step per tick. The entity never moves horizontally;
//! obstacles scroll past it instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::variant::VariantConfig;

/// The player-controlled ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Fixed horizontal center
    pub x: f32,
    /// Pixels from top of viewport
    pub y: f32,
    /// Pixels per tick, positive is down
    pub velocity: f32,
    pub radius: f32,
}

impl Entity {
    pub fn new(config: &VariantConfig) -> Self {
        Self {
            x: config.entity_x,
            y: config.start_y,
            velocity: 0.0,
            radius: config.entity_radius,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Advance one tick: position uses the velocity from before gravity is applied
    pub fn integrate(&mut self, gravity: f32) {
        self.y += self.velocity;
        self.velocity += gravity;
    }

    /// Replace the current velocity with the upward impulse
    pub fn apply_upward_impulse(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// Additive downward push
    pub fn apply_downward_nudge(&mut self, nudge: f32) {
        self.velocity += nudge;
    }

    /// True once any part of the sprite leaves `[0, viewport_height]`
    pub fn out_of_bounds(&self, viewport_height: f32) -> bool {
        self.y - self.radius < 0.0 || self.y + self.radius > viewport_height
    }
}
