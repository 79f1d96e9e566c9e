//! dungeonpack library.
//!
//! Sprite behaviors for grid-based 2D games on top of `bevy_ecs`: facing
//! inference, directional walk cycles, melee attacks with a weapon sprite,
//! projectiles, carried items and status bars.
//!
//! Behaviors are registered per entity with plain functions taking a
//! `&mut World` (see [`systems`]). Per-entity state lives in the
//! [`EntityRegistry`](resources::registry::EntityRegistry) and is served by
//! shared systems that a [`Scene`](scene::Scene) installs on demand.

pub mod components;
pub mod events;
pub mod resources;
pub mod scene;
pub mod systems;
