//! Engine and behavior systems.
//!
//! Each behavior module pairs its setup operations (plain functions over
//! `&mut World`) with the shared system that serves every registered entity.
//! Setup operations on an entity that no longer exists do nothing and answer
//! negatively; they never panic.
//!
//! Submodules overview
//! - [`attack`] – melee attack state machine and weapon sprite lifecycle
//! - [`direction`] – facing inference from velocity
//! - [`items`] – items riding above their owner
//! - [`moveanim`] – directional walk cycles
//! - [`movement`] – integrate velocity, walls, off-scene cleanup
//! - [`projectile`] – directional and radial shots, projectile frame cycling
//! - [`spawn`] – sprite creation helpers, spawning on tiles
//! - [`statusbar`] – bars over sprites and the reached-zero event
//! - [`stuckto`] – followers copy their target's position
//! - [`time`] – advance simulation time
//! - [`walls`] – wall contact rules

pub mod attack;
pub mod direction;
pub mod items;
pub mod moveanim;
pub mod movement;
pub mod projectile;
pub mod spawn;
pub mod statusbar;
pub mod stuckto;
pub mod time;
pub mod walls;

use bevy_ecs::prelude::*;

use crate::resources::dispatcher::{SharedUpdateDispatcher, UpdateKind};
use crate::resources::registry::EntityRegistry;

pub(crate) fn is_alive(world: &World, entity: Entity) -> bool {
    world.get_entity(entity).is_ok()
}

/// Registry of `world`, created on first use.
pub(crate) fn registry_mut(world: &mut World) -> Mut<'_, EntityRegistry> {
    world.init_resource::<EntityRegistry>();
    world.resource_mut::<EntityRegistry>()
}

pub(crate) fn request_update(world: &mut World, kind: UpdateKind) {
    world.init_resource::<SharedUpdateDispatcher>();
    world
        .resource_mut::<SharedUpdateDispatcher>()
        .ensure_installed(kind);
}
