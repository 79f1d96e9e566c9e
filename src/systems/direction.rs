//! Direction tracking.
//!
//! [`manage_direction`] registers an entity; [`direction_system`] then infers
//! its facing from velocity every tick. An idle entity keeps facing its last
//! heading. Once the entity is destroyed its row is marked inactive and is
//! skipped from then on.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::direction::{Direction, DirectionState};
use crate::components::rigidbody::RigidBody;
use crate::resources::dispatcher::UpdateKind;
use crate::resources::registry::EntityRegistry;
use crate::systems::{is_alive, registry_mut, request_update};

/// Start tracking `entity`'s facing. Returns `false` for a dead entity.
///
/// Calling it again for a tracked entity keeps the current heading.
pub fn manage_direction(world: &mut World, entity: Entity) -> bool {
    if !is_alive(world, entity) {
        debug!("manage_direction: {:?} does not exist", entity);
        return false;
    }
    {
        let mut registry = registry_mut(world);
        registry.get_or_create(entity);
        if !registry.directions.contains(entity) {
            registry.directions.insert(entity, DirectionState::default());
        }
    }
    request_update(world, UpdateKind::Direction);
    true
}

fn tracked(world: &World, entity: Entity) -> Option<DirectionState> {
    world
        .get_resource::<EntityRegistry>()?
        .directions
        .get(entity)
        .filter(|d| d.active)
        .copied()
}

/// Last known facing of a tracked, live entity.
pub fn facing_of(world: &World, entity: Entity) -> Option<Direction> {
    tracked(world, entity).map(|d| d.facing)
}

/// Last known heading angle (radians, +y down) of a tracked, live entity.
pub fn angle_of(world: &World, entity: Entity) -> Option<f32> {
    tracked(world, entity).map(|d| d.angle_radians)
}

/// Infer facing and angle for every tracked entity.
///
/// An entity without a [`RigidBody`] counts as standing still.
pub fn direction_system(
    mut registry: ResMut<EntityRegistry>,
    bodies: Query<Option<&RigidBody>>,
) {
    for (entity, state) in registry.active_directions_mut() {
        match bodies.get(entity) {
            Ok(Some(body)) => {
                state.observe(body.velocity);
            }
            Ok(None) => {}
            Err(_) => {
                debug!("direction tracking stopped for destroyed {:?}", entity);
                state.active = false;
            }
        }
    }
}
