//! Repeating image animation.
//!
//! A [`FrameCycle`] loops over a list of images at a fixed interval. The
//! projectile launcher attaches one to every projectile; the
//! [`frame_cycle_system`](crate::systems::projectile::frame_cycle_system)
//! advances it.

use bevy_ecs::prelude::Component;

use crate::components::sprite::ImageKey;

#[derive(Debug, Clone, Component)]
pub struct FrameCycle {
    pub frames: Vec<ImageKey>,
    pub frame_interval_ms: f32,
    pub frame_index: usize,
    pub elapsed_ms: f32,
}

impl FrameCycle {
    pub fn new(frames: Vec<ImageKey>, frame_interval_ms: f32) -> Self {
        Self {
            frames,
            frame_interval_ms,
            frame_index: 0,
            elapsed_ms: 0.0,
        }
    }

    /// Accumulate time; returns the new image when the frame changes.
    pub fn tick(&mut self, delta_ms: f32) -> Option<&str> {
        if self.frames.len() < 2 || self.frame_interval_ms <= 0.0 {
            return None;
        }
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms < self.frame_interval_ms {
            return None;
        }
        self.elapsed_ms -= self.frame_interval_ms;
        self.frame_index = (self.frame_index + 1) % self.frames.len();
        Some(&self.frames[self.frame_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loops_over_frames() {
        let mut cycle = FrameCycle::new(vec!["a".into(), "b".into()], 50.0);
        assert_eq!(cycle.tick(30.0), None);
        assert_eq!(cycle.tick(30.0), Some("b"));
        assert_eq!(cycle.tick(50.0), Some("a"));
    }

    #[test]
    fn single_frame_never_changes() {
        let mut cycle = FrameCycle::new(vec!["a".into()], 10.0);
        assert_eq!(cycle.tick(100.0), None);
    }
}
