//! Host behavior flags for a sprite.
//!
//! [`SpriteFlags`] tells the host what to do when a sprite touches a wall or
//! leaves the scene. Projectiles are the main users: a directional shot is
//! destroyed on walls, a through-walls radial shot ghosts through them.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpriteFlags {
    /// Destroy the sprite when it runs into a wall tile.
    pub destroy_on_wall: bool,
    /// Destroy the sprite once it is fully outside the scene.
    pub auto_destroy: bool,
    /// Ignore wall tiles entirely.
    pub ghost_through_walls: bool,
    /// Reflect velocity instead of stopping when hitting a wall.
    pub bounce_on_wall: bool,
}

impl SpriteFlags {
    /// Flags for a projectile: destroyed on walls or off-scene.
    pub fn projectile() -> Self {
        Self {
            destroy_on_wall: true,
            auto_destroy: true,
            ..Default::default()
        }
    }

    /// Flags for a projectile flying through walls.
    pub fn ghost_projectile() -> Self {
        Self {
            destroy_on_wall: false,
            auto_destroy: true,
            ghost_through_walls: true,
            bounce_on_wall: false,
        }
    }

    pub fn bouncing() -> Self {
        Self {
            bounce_on_wall: true,
            ..Default::default()
        }
    }
}
