//! World-space position of an entity.
//!
//! The position is the sprite's centre. Bounding edges are derived from it
//! together with the [`Sprite`](super::sprite::Sprite) size.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World position (centre pivot) in pixels. +y points down.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
