//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive
//! [`Scene::change_scene`](crate::scene::Scene::change_scene). Observers
//! registered for the whole session are the usual candidates.

use bevy_ecs::prelude::Component;

/// Tag component for entities that outlive a scene.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
