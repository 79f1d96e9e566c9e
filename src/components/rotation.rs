use bevy_ecs::prelude::Component;

/// Sprite rotation in degrees, clockwise in screen space.
#[derive(Component, Clone, Debug, Copy, Default)]
pub struct Rotation {
    pub degrees: f32,
}
