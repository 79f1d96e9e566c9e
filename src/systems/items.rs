//! Items carried by a sprite.
//!
//! An item is any sprite. Once attached it is laid out every tick in a row
//! centred above its owner, in attachment order, [`ITEM_GAP_PX`] apart and
//! [`ITEM_GAP_PX`] above the owner's top edge. Items that no longer exist are
//! dropped from the row.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::items::AttachedItems;
use crate::components::kind::SpriteKind;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::resources::dispatcher::UpdateKind;
use crate::resources::registry::EntityRegistry;
use crate::systems::{is_alive, registry_mut, request_update};

/// Horizontal spacing between items and vertical gap above the owner.
pub const ITEM_GAP_PX: f32 = 2.0;

/// Attach `item` to `owner`. Returns false when either entity is missing or
/// the item is already attached.
pub fn add_item_to_sprite(world: &mut World, owner: Entity, item: Entity) -> bool {
    if owner == item || !is_alive(world, owner) || !is_alive(world, item) {
        debug!("add_item_to_sprite: cannot attach {:?} to {:?}", item, owner);
        return false;
    }
    let added = {
        let mut registry = registry_mut(world);
        registry.get_or_create(owner);
        registry
            .items
            .get_or_insert_with(owner, AttachedItems::default)
            .push(item)
    };
    request_update(world, UpdateKind::ItemAlignment);
    added
}

pub fn has_item(world: &World, owner: Entity, item: Entity) -> bool {
    world
        .get_resource::<EntityRegistry>()
        .is_some_and(|r| r.has_item(owner, item))
}

/// Whether any live item of `owner` has the sprite kind `kind`.
pub fn has_item_of_kind(world: &World, owner: Entity, kind: &str) -> bool {
    items_of(world, owner).into_iter().any(|item| {
        world
            .get::<SpriteKind>(item)
            .is_some_and(|k| k.name() == kind)
    })
}

/// Live items of `owner` in attachment order.
pub fn items_of(world: &World, owner: Entity) -> Vec<Entity> {
    world
        .get_resource::<EntityRegistry>()
        .and_then(|r| r.items.get(owner))
        .map(|items| items.iter().filter(|&e| is_alive(world, e)).collect())
        .unwrap_or_default()
}

pub fn item_alignment_system(
    mut registry: ResMut<EntityRegistry>,
    mut sprites: Query<(&mut MapPosition, &Sprite)>,
) {
    for (owner, attached) in registry.items.iter_mut() {
        if attached.items.iter().any(|&item| !sprites.contains(item)) {
            attached.items.retain(|item| sprites.contains(*item));
        }
        let Ok((owner_pos, owner_sprite)) = sprites.get(owner) else {
            continue;
        };
        if attached.is_empty() {
            continue;
        }
        let owner_bounds = owner_sprite.bounds(owner_pos.pos);

        let sizes: Vec<_> = attached
            .iter()
            .filter_map(|item| sprites.get(item).ok().map(|(_, s)| s.size()))
            .collect();
        let total: f32 = sizes.iter().map(|s| s.x).sum::<f32>()
            + ITEM_GAP_PX * (sizes.len().saturating_sub(1)) as f32;
        let mut cursor = owner_bounds.center().x - total * 0.5;

        for (item, size) in attached.iter().zip(sizes) {
            if let Ok((mut pos, _)) = sprites.get_mut(item) {
                pos.pos.x = cursor + size.x * 0.5;
                pos.pos.y = owner_bounds.top - ITEM_GAP_PX - size.y * 0.5;
            }
            cursor += size.x + ITEM_GAP_PX;
        }
    }
}
