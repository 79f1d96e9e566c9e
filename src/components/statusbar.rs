//! Status bar component.
//!
//! A [`StatusBar`] lives on its own entity stuck above an owner sprite. The
//! [`status_bar_system`](crate::systems::statusbar::status_bar_system) watches
//! for the value reaching zero and triggers
//! [`StatusBarEmptied`](crate::events::statusbar::StatusBarEmptied).

use bevy_ecs::prelude::{Component, Entity};

#[derive(Debug, Clone, Component)]
pub struct StatusBar {
    pub owner: Entity,
    pub value: f32,
    pub max: f32,
    /// Set once the zero event fired; cleared when the value rises again.
    pub emptied: bool,
}

impl StatusBar {
    pub fn new(owner: Entity, max: f32, value: f32) -> Self {
        let max = max.max(0.0);
        Self {
            owner,
            value: value.clamp(0.0, max),
            max,
            emptied: false,
        }
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max);
    }

    pub fn change_value(&mut self, delta: f32) {
        self.set_value(self.value + delta);
    }

    /// Fill ratio in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.value / self.max
        }
    }
}
