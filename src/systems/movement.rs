use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::{Bounds, Sprite};
use crate::components::spriteflags::SpriteFlags;
use crate::resources::screensize::ScreenSize;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::walls::{is_off_scene, move_with_walls};

/// Integrate velocities, resolve walls and drop sprites that left the scene.
///
/// The scene rectangle is the tile map when one is loaded, else the screen.
pub fn movement_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    map: Option<Res<TileMap>>,
    screen: Option<Res<ScreenSize>>,
    mut query: Query<(
        Entity,
        &mut MapPosition,
        &mut RigidBody,
        Option<&Sprite>,
        Option<&SpriteFlags>,
    )>,
) {
    let map = map.as_deref();
    let scene_size = map
        .map(TileMap::pixel_size)
        .or_else(|| screen.map(|s| Vec2::new(s.w as f32, s.h as f32)));

    for (entity, mut position, mut body, sprite, flags) in query.iter_mut() {
        let flags = flags.copied().unwrap_or_default();
        let size = sprite.map(Sprite::size).unwrap_or(Vec2::ZERO);
        let mut velocity = body.velocity;

        let Some(next) = move_with_walls(map, position.pos, &mut velocity, size, flags, time.delta) else {
            debug!("{:?} destroyed on wall", entity);
            commands.entity(entity).try_despawn();
            continue;
        };
        if velocity != body.velocity {
            body.velocity = velocity;
        }
        position.pos = next;

        if flags.auto_destroy
            && let Some(scene_size) = scene_size
            && is_off_scene(&Bounds::from_center(next, size), scene_size)
        {
            debug!("{:?} left the scene", entity);
            commands.entity(entity).try_despawn();
        }
    }
}
