//! Sprite spawning helpers.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, warn};

use crate::components::kind::SpriteKind;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::spriteflags::SpriteFlags;
use crate::resources::imagestore::{DEFAULT_IMAGE_SIZE, ImageStore};
use crate::resources::tilemap::TileMap;

/// Spawn a still sprite of `kind` centred at `pos`, sized from the
/// [`ImageStore`].
pub fn spawn_sprite(world: &mut World, image: &str, kind: &str, pos: Vec2) -> Entity {
    let size = world
        .get_resource::<ImageStore>()
        .map(|store| store.size_of(image))
        .unwrap_or(Vec2::splat(DEFAULT_IMAGE_SIZE));
    world
        .spawn((
            MapPosition { pos },
            Sprite::new(image, size.x, size.y),
            RigidBody::new(),
            SpriteKind::new(kind),
        ))
        .id()
}

/// Replace every `tile_image` tile with a bouncing sprite.
///
/// Each sprite is centred on its tile, gets `velocity` and bounces off walls.
/// The tile image is cleared. Returns the spawned sprites in row order.
pub fn spawn_sprites_on_tile(
    world: &mut World,
    image: &str,
    kind: &str,
    tile_image: &str,
    velocity: Vec2,
) -> Vec<Entity> {
    let centres: Vec<Vec2> = {
        let Some(mut map) = world.get_resource_mut::<TileMap>() else {
            warn!("spawn_sprites_on_tile: no tile map loaded");
            return Vec::new();
        };
        let locations = map.tiles_by_type(tile_image);
        locations
            .into_iter()
            .map(|loc| {
                map.set_tile_at(loc, None);
                map.tile_to_pixel(loc)
            })
            .collect()
    };

    let spawned: Vec<Entity> = centres
        .into_iter()
        .map(|pos| {
            let sprite = spawn_sprite(world, image, kind, pos);
            world.entity_mut(sprite).insert((
                RigidBody::with_velocity(velocity.x, velocity.y),
                SpriteFlags::bouncing(),
            ));
            sprite
        })
        .collect();
    debug!(
        "spawned {} '{}' sprites on '{}' tiles",
        spawned.len(),
        kind,
        tile_image
    );
    spawned
}
