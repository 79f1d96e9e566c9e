//! Component for attaching an entity's position to another entity.
//!
//! When an entity has the [`StuckTo`] component, the
//! [`stuck_to_entity_system`](crate::systems::stuckto::stuck_to_entity_system)
//! moves it to its target's position plus an offset every tick. Status bars
//! hang over their owner this way.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

#[derive(Debug, Clone, Component)]
pub struct StuckTo {
    /// The entity to follow.
    pub target: Entity,
    /// Offset from the target's centre.
    pub offset: Vec2,
}

impl StuckTo {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            offset: Vec2::ZERO,
        }
    }

    /// Set the offset from the target's position.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}
