//! Status bar notifications.
//!
//! The [`status_bar_system`](crate::systems::statusbar::status_bar_system)
//! triggers [`StatusBarEmptied`] once each time a bar's value drops to zero.
//! It fires again only after the value has gone back above zero and then
//! returned to zero.
//!
//! [`observe_despawn_owner_on_empty`] is a ready-made observer for the common
//! "health ran out" rule.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

#[derive(Event, Debug, Clone, Copy)]
pub struct StatusBarEmptied {
    pub bar: Entity,
    pub owner: Entity,
}

/// Despawns the owner of a bar that reached zero. The bar follows on the
/// next tick.
pub fn observe_despawn_owner_on_empty(trigger: On<StatusBarEmptied>, mut commands: Commands) {
    let event = trigger.event();
    info!("{:?} ran out, despawning", event.owner);
    commands.entity(event.owner).try_despawn();
}
