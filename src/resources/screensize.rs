//! Scene size resource.
//!
//! Stores the visible scene size in pixels. Auto-destroy falls back to these
//! bounds when no [`TileMap`](super::tilemap::TileMap) is loaded.

use bevy_ecs::prelude::Resource;

/// Scene size in pixels.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
