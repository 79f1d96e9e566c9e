//! Sprite kind tag.
//!
//! Every sprite spawned by the behavior layer carries a [`SpriteKind`] so game
//! code can tell players, enemies, weapons, projectiles and items apart.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpriteKind(pub String);

impl SpriteKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}
