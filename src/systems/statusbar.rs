//! Status bars over sprites.
//!
//! A bar is its own entity carrying [`StatusBar`], stuck above the owner with
//! [`StuckTo`]. The owner's registry record points at its current bar.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::kind::SpriteKind;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::statusbar::StatusBar;
use crate::components::stuckto::StuckTo;
use crate::events::statusbar::StatusBarEmptied;
use crate::resources::dispatcher::UpdateKind;
use crate::resources::registry::EntityRegistry;
use crate::systems::{is_alive, registry_mut, request_update};

pub const STATUS_BAR_KIND: &str = "status_bar";
const BAR_HEIGHT_PX: f32 = 2.0;
const BAR_GAP_PX: f32 = 2.0;

/// Spawn a bar above `owner`, replacing any bar attached before.
pub fn attach_status_bar(world: &mut World, owner: Entity, max: f32, value: f32) -> Option<Entity> {
    let Some((pos, size)) = world
        .get_entity(owner)
        .ok()
        .and_then(|e| Some((e.get::<MapPosition>()?.pos, e.get::<Sprite>().map(Sprite::size))))
    else {
        debug!("attach_status_bar: {:?} has no position", owner);
        return None;
    };
    let size = size.unwrap_or(Vec2::ZERO);
    let offset = Vec2::new(0.0, -(size.y * 0.5 + BAR_GAP_PX + BAR_HEIGHT_PX * 0.5));

    let bar = world
        .spawn((
            MapPosition { pos: pos + offset },
            StatusBar::new(owner, max, value),
            StuckTo::new(owner).with_offset(offset),
            SpriteKind::new(STATUS_BAR_KIND),
        ))
        .id();
    let previous = {
        let mut registry = registry_mut(world);
        registry.get_or_create(owner);
        registry.status_bars.insert(owner, bar)
    };
    if let Some(old) = previous
        && is_alive(world, old)
    {
        world.despawn(old);
    }
    request_update(world, UpdateKind::StatusBars);
    Some(bar)
}

/// The bar currently attached to `owner`.
pub fn status_bar_of(world: &World, owner: Entity) -> Option<Entity> {
    let bar = *world.get_resource::<EntityRegistry>()?.status_bars.get(owner)?;
    world.get::<StatusBar>(bar).map(|_| bar)
}

pub fn status_bar_value(world: &World, bar: Entity) -> Option<f32> {
    world.get::<StatusBar>(bar).map(|b| b.value)
}

/// Set the value of `bar`, clamped to `0..=max`. Returns the stored value.
pub fn set_status_bar_value(world: &mut World, bar: Entity, value: f32) -> Option<f32> {
    let mut status = world.get_mut::<StatusBar>(bar)?;
    status.set_value(value);
    Some(status.value)
}

pub fn change_status_bar_value(world: &mut World, bar: Entity, delta: f32) -> Option<f32> {
    let mut status = world.get_mut::<StatusBar>(bar)?;
    status.change_value(delta);
    Some(status.value)
}

pub fn status_bar_system(
    mut commands: Commands,
    owners: Query<(), With<MapPosition>>,
    mut bars: Query<(Entity, &mut StatusBar)>,
) {
    for (entity, mut bar) in bars.iter_mut() {
        if !owners.contains(bar.owner) {
            debug!("status bar {:?} lost its owner", entity);
            commands.entity(entity).try_despawn();
            continue;
        }
        if bar.value <= 0.0 {
            if !bar.emptied {
                bar.emptied = true;
                commands.trigger(StatusBarEmptied {
                    bar: entity,
                    owner: bar.owner,
                });
            }
        } else if bar.emptied {
            bar.emptied = false;
        }
    }
}
