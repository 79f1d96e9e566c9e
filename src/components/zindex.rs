//! Z-index component for depth ordering.
//!
//! The [`ZIndex`] component controls which sprite is drawn over which. Weapon
//! sprites spawned by an attack take their owner's depth minus one so they
//! are drawn behind it.

use bevy_ecs::prelude::Component;

/// Depth hint for 2D drawing.
///
/// Higher values are drawn later (on top).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
