//! ECS components and per-entity behavior data.
//!
//! Host-facing components describe what the engine knows about a sprite:
//! position, velocity, image, depth, flags. Behavior facets (direction, move
//! animation, attack, items) are plain data stored in the
//! [`EntityRegistry`](crate::resources::registry::EntityRegistry) tables.
//!
//! Submodules overview:
//! - [`attack`] – attack facet and its frame configuration
//! - [`direction`] – 4-way facing, dominant-axis inference, per-direction maps
//! - [`framecycle`] – looping image animation used by projectiles
//! - [`items`] – ordered list of items attached to an owner
//! - [`kind`] – sprite kind tag
//! - [`mapposition`] – world-space centre position
//! - [`moveanim`] – directional walk-cycle facet
//! - [`persistent`] – marker for entities that survive scene changes
//! - [`rigidbody`] – velocity
//! - [`rotation`] – rotation angle in degrees
//! - [`sprite`] – displayed image and bounding box
//! - [`spriteflags`] – wall and off-scene behavior flags
//! - [`statusbar`] – bar value attached over an owner
//! - [`stuckto`] – follow another entity's position
//! - [`zindex`] – depth order

pub mod attack;
pub mod direction;
pub mod framecycle;
pub mod items;
pub mod kind;
pub mod mapposition;
pub mod moveanim;
pub mod persistent;
pub mod rigidbody;
pub mod rotation;
pub mod sprite;
pub mod spriteflags;
pub mod statusbar;
pub mod stuckto;
pub mod zindex;
