//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity the host's
//! [`movement_system`](crate::systems::movement::movement_system) integrates
//! every tick. Game code and the behavior layer write it; direction inference
//! and the move animator read it.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity in pixels per second.
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    pub velocity: Vec2,
}

impl RigidBody {
    /// Create a RigidBody at rest.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(vx: f32, vy: f32) -> Self {
        Self {
            velocity: Vec2::new(vx, vy),
        }
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.velocity = Vec2::new(vx, vy);
    }

    /// Exactly `(0, 0)`. Tiny drift still counts as moving.
    pub fn is_still(&self) -> bool {
        self.velocity.x == 0.0 && self.velocity.y == 0.0
    }

    /// Force the body to rest.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}
