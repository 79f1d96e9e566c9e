//! Melee attack: a short-lived weapon sprite swung next to its owner.
//!
//! Three systems serve every registered attacker:
//!
//! - [`attack_lock_system`] (Intent) refreshes the attack facing from the
//!   owner's velocity on every moving tick and pins the owner in place while
//!   a swing runs.
//! - [`attack_follow_system`] (Follow) re-places the weapon against the
//!   owner's edge after physics.
//! - [`attack_animation_system`] (Animation, before the move animator) steps
//!   the swing: spawn the weapon on frame 0, swap images while frames remain,
//!   despawn it and return to idle after the last one.
//!
//! A velocity set during a swing still turns it: the weapon is re-placed and
//! its frames are taken from the new facing.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, error};

use crate::components::attack::{AttackAnimation, AttackState};
use crate::components::direction::{Direction, infer_facing};
use crate::components::kind::SpriteKind;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::{Bounds, Sprite};
use crate::components::zindex::ZIndex;
use crate::resources::dispatcher::UpdateKind;
use crate::resources::imagestore::{DEFAULT_IMAGE_SIZE, ImageStore};
use crate::resources::registry::EntityRegistry;
use crate::resources::worldtime::WorldTime;
use crate::systems::{is_alive, registry_mut, request_update};

/// Register (or replace) the attack of `entity`.
///
/// A replaced attack keeps its facing; a weapon still on screen from the
/// previous configuration is despawned.
pub fn set_attack_animation(world: &mut World, entity: Entity, animation: AttackAnimation) -> bool {
    if !is_alive(world, entity) {
        debug!("set_attack_animation: {:?} does not exist", entity);
        return false;
    }
    let Some(mut state) = AttackState::new(animation) else {
        error!(
            "set_attack_animation: empty weapon sequence for {:?}, registration ignored",
            entity
        );
        return false;
    };
    let stale_weapon = {
        let mut registry = registry_mut(world);
        registry.get_or_create(entity);
        let previous = registry.attacks.get(entity).map(|old| (old.facing, old.weapon));
        if let Some((facing, _)) = previous {
            state.facing = facing;
        }
        registry.attacks.insert(entity, state);
        previous.and_then(|(_, weapon)| weapon)
    };
    if let Some(weapon) = stale_weapon
        && is_alive(world, weapon)
    {
        world.despawn(weapon);
    }
    request_update(world, UpdateKind::AttackFollow);
    request_update(world, UpdateKind::AttackAnimation);
    true
}

/// Start a swing. Returns false when `entity` has no attack or is mid-swing.
pub fn attack(world: &mut World, entity: Entity) -> bool {
    let Some(mut registry) = world.get_resource_mut::<EntityRegistry>() else {
        return false;
    };
    match registry.attacks.get_mut(entity) {
        Some(state) => state.trigger(),
        None => {
            debug!("attack: {:?} has no attack animation", entity);
            false
        }
    }
}

pub fn is_attacking(world: &World, entity: Entity) -> bool {
    world
        .get_resource::<EntityRegistry>()
        .is_some_and(|r| r.is_attacking(entity))
}

/// Centre of a weapon of `weapon_size` held against `owner` in `facing`.
pub fn weapon_position(facing: Direction, owner: &Bounds, weapon_size: Vec2, offset: f32) -> Vec2 {
    let center = owner.center();
    let half = weapon_size * 0.5;
    match facing {
        Direction::Up => Vec2::new(center.x, owner.top - offset - half.y),
        Direction::Down => Vec2::new(center.x, owner.bottom + offset + half.y),
        Direction::Left => Vec2::new(owner.left - offset - half.x, center.y),
        Direction::Right => Vec2::new(owner.right + offset + half.x, center.y),
    }
}

pub fn attack_lock_system(
    mut registry: ResMut<EntityRegistry>,
    mut bodies: Query<&mut RigidBody>,
) {
    for (entity, state) in registry.attacks.iter_mut() {
        let Ok(mut body) = bodies.get_mut(entity) else {
            continue;
        };
        if let Some(facing) = infer_facing(body.velocity) {
            state.facing = facing;
        }
        if state.is_attacking && !body.is_still() {
            body.stop();
        }
    }
}

pub fn attack_follow_system(
    mut commands: Commands,
    mut registry: ResMut<EntityRegistry>,
    mut sprites: Query<(&mut MapPosition, &Sprite)>,
) {
    for (owner, state) in registry.attacks.iter_mut() {
        if !state.is_attacking {
            continue;
        }
        let Ok((owner_pos, owner_sprite)) = sprites.get(owner) else {
            if let Some(weapon) = state.weapon {
                commands.entity(weapon).try_despawn();
            }
            debug!("attack cancelled, owner {:?} is gone", owner);
            state.finish();
            continue;
        };
        let Some(weapon) = state.weapon else {
            continue;
        };
        let bounds = owner_sprite.bounds(owner_pos.pos);
        if let Ok((mut weapon_pos, weapon_sprite)) = sprites.get_mut(weapon) {
            weapon_pos.pos = weapon_position(state.facing, &bounds, weapon_sprite.size(), state.offset_px);
        }
    }
}

pub fn attack_animation_system(
    mut commands: Commands,
    mut registry: ResMut<EntityRegistry>,
    time: Res<WorldTime>,
    images: Option<Res<ImageStore>>,
    mut sprites: Query<(&MapPosition, &mut Sprite, Option<&ZIndex>)>,
) {
    let delta_ms = time.delta_ms();
    for (owner, state) in registry.attacks.iter_mut() {
        if !state.is_attacking {
            continue;
        }
        let Ok((owner_pos, owner_sprite, owner_z)) = sprites.get(owner) else {
            if let Some(weapon) = state.weapon {
                commands.entity(weapon).try_despawn();
            }
            state.finish();
            continue;
        };
        let owner_bounds = owner_sprite.bounds(owner_pos.pos);
        let owner_depth = owner_z.map(|z| z.0).unwrap_or_default();

        if !state.tick(delta_ms) {
            continue;
        }
        let index = state.frame_index as usize;
        let frames = state.per_direction.get(state.facing);

        if index >= frames.weapon_frames.len() {
            if let Some(weapon) = state.weapon {
                commands.entity(weapon).try_despawn();
            }
            if frames.has_overlay()
                && let Ok((_, mut sprite, _)) = sprites.get_mut(owner)
            {
                sprite.set_image(&frames.owner_frames[0]);
            }
            state.finish();
            continue;
        }

        let weapon_image = &frames.weapon_frames[index];
        if index == 0 {
            if let Some(stale) = state.weapon.take() {
                commands.entity(stale).try_despawn();
            }
            let size = images
                .as_ref()
                .map(|store| store.size_of(weapon_image))
                .unwrap_or(Vec2::splat(DEFAULT_IMAGE_SIZE));
            let pos = weapon_position(state.facing, &owner_bounds, size, state.offset_px);
            let weapon = commands
                .spawn((
                    MapPosition { pos },
                    Sprite::new(weapon_image.clone(), size.x, size.y),
                    ZIndex(owner_depth - 1),
                    SpriteKind::new(state.weapon_kind.clone()),
                ))
                .id();
            debug!("{:?} swings {:?} facing {:?}", owner, weapon, state.facing);
            state.weapon = Some(weapon);
        } else if let Some(weapon) = state.weapon {
            if let Ok((_, mut sprite, _)) = sprites.get_mut(weapon) {
                sprite.set_image(weapon_image);
            }
        }

        if frames.has_overlay()
            && let Some(image) = frames.owner_frames.get(index)
            && let Ok((_, mut sprite, _)) = sprites.get_mut(owner)
        {
            sprite.set_image(image);
        }
    }
}
