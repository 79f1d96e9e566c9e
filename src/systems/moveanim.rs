//! Directional walk-cycle animation.
//!
//! - [`set_move_animation`] registers four frame sequences and an interval.
//! - [`move_animation_system`] cycles the sequence matching the dominant
//!   velocity axis and snaps back to an idle frame when the entity stops.
//!
//! # Per-tick rules
//!
//! 1. Mid-swing entities (see [`crate::systems::attack`]) are left alone.
//! 2. Zero velocity shows frame 0 of the last sequence that advanced and
//!    rewinds every direction to frame 0.
//! 3. Otherwise time accumulates and the chosen direction advances once
//!    `elapsed - last_advance` exceeds the interval.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, error};

use crate::components::direction::{DirectionMap, infer_facing};
use crate::components::moveanim::MoveAnimState;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::{ImageKey, Sprite};
use crate::resources::dispatcher::UpdateKind;
use crate::resources::registry::EntityRegistry;
use crate::resources::worldtime::WorldTime;
use crate::systems::{is_alive, registry_mut, request_update};

/// Register (or replace) the walk cycles of `entity`.
///
/// Every sequence must hold at least one frame; a registration with an empty
/// sequence is rejected and logged. Sibling facets are untouched.
pub fn set_move_animation(
    world: &mut World,
    entity: Entity,
    frames: DirectionMap<Vec<ImageKey>>,
    frame_interval_ms: f32,
) -> bool {
    if !is_alive(world, entity) {
        debug!("set_move_animation: {:?} does not exist", entity);
        return false;
    }
    let Some(state) = MoveAnimState::new(frames, frame_interval_ms) else {
        error!(
            "set_move_animation: empty frame sequence for {:?}, registration ignored",
            entity
        );
        return false;
    };
    {
        let mut registry = registry_mut(world);
        registry.get_or_create(entity);
        registry.moves.insert(entity, state);
    }
    request_update(world, UpdateKind::MoveAnimation);
    true
}

pub fn move_animation_system(
    mut registry: ResMut<EntityRegistry>,
    time: Res<WorldTime>,
    mut sprites: Query<(Option<&RigidBody>, &mut Sprite)>,
) {
    let delta_ms = time.delta_ms();
    let EntityRegistry { moves, attacks, .. } = &mut *registry;

    for (entity, anim) in moves.iter_mut() {
        if attacks.get(entity).is_some_and(|a| a.is_attacking) {
            continue;
        }
        let Ok((body, mut sprite)) = sprites.get_mut(entity) else {
            continue;
        };
        let velocity = body.map(|b| b.velocity).unwrap_or(Vec2::ZERO);

        let Some(direction) = infer_facing(velocity) else {
            if sprite.image != anim.idle_frame() {
                sprite.set_image(anim.idle_frame());
            }
            anim.reset_counters();
            continue;
        };

        anim.elapsed_ms += delta_ms;
        let now = anim.elapsed_ms;
        let interval = anim.frame_interval_ms;
        let track = anim.per_direction.get_mut(direction);
        if now - track.last_advance_ms > interval {
            let image = track.advance(now);
            if sprite.image != image {
                sprite.set_image(image);
            }
            anim.current = direction;
        }
    }
}
