//! Image size registry.
//!
//! The behavior layer only handles image keys. When it spawns a sprite (a
//! weapon, a projectile, a tile spawn) it looks the key up here to size the
//! sprite. Unknown keys fall back to [`DEFAULT_IMAGE_SIZE`].

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use rustc_hash::FxHashMap;

pub const DEFAULT_IMAGE_SIZE: f32 = 16.0;

#[derive(Resource, Debug, Default)]
pub struct ImageStore {
    pub map: FxHashMap<String, Vec2>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, width: f32, height: f32) {
        self.map.insert(key.into(), Vec2::new(width, height));
    }

    /// Size of `key`, or the default square.
    pub fn size_of(&self, key: impl AsRef<str>) -> Vec2 {
        self.map
            .get(key.as_ref())
            .copied()
            .unwrap_or(Vec2::splat(DEFAULT_IMAGE_SIZE))
    }
}
