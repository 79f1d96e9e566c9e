//! Move animation facet.
//!
//! Per-entity playback state for directional walk cycles, driven by
//! [`move_animation_system`](crate::systems::moveanim::move_animation_system).

use crate::components::direction::{Direction, DirectionMap};
use crate::components::sprite::ImageKey;

/// One directional walk cycle and its playback cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTrack {
    pub frames: Vec<ImageKey>,
    pub frame_index: usize,
    pub last_advance_ms: f32,
}

impl MoveTrack {
    fn new(frames: Vec<ImageKey>) -> Self {
        Self {
            frames,
            frame_index: 0,
            last_advance_ms: 0.0,
        }
    }

    /// Step to the next frame (wrapping) and return its image.
    pub fn advance(&mut self, now_ms: f32) -> &str {
        self.last_advance_ms = now_ms;
        self.frame_index = (self.frame_index + 1) % self.frames.len();
        &self.frames[self.frame_index]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveAnimState {
    /// Time spent moving since registration, in milliseconds.
    pub elapsed_ms: f32,
    pub frame_interval_ms: f32,
    /// Sequence whose first frame is shown while idle. Tracks the last
    /// sequence that advanced, not a global idle pose.
    pub current: Direction,
    pub per_direction: DirectionMap<MoveTrack>,
}

impl MoveAnimState {
    /// Build the facet. Returns `None` if any direction has no frames.
    pub fn new(frames: DirectionMap<Vec<ImageKey>>, frame_interval_ms: f32) -> Option<Self> {
        if frames.iter().any(|(_, f)| f.is_empty()) {
            return None;
        }
        Some(Self {
            elapsed_ms: 0.0,
            frame_interval_ms,
            current: Direction::Down,
            per_direction: frames.map(MoveTrack::new),
        })
    }

    /// First frame of the current sequence.
    pub fn idle_frame(&self) -> &str {
        &self.per_direction.get(self.current).frames[0]
    }

    pub fn reset_counters(&mut self) {
        for track in self.per_direction.values_mut() {
            track.frame_index = 0;
        }
    }

    pub fn frame_index(&self, direction: Direction) -> usize {
        self.per_direction.get(direction).frame_index
    }
}
