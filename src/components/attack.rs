//! Attack facet.
//!
//! Holds the melee attack sub-state machine driven by the systems in
//! [`crate::systems::attack`]:
//!
//! ```text
//! Idle (frame_index = -1) --attack()--> [next tick] Starting (0)
//!     --> Playing (1..N-1) --> frame_index >= N --> Idle
//! ```

use bevy_ecs::prelude::Entity;

use crate::components::direction::{Direction, DirectionMap};
use crate::components::sprite::ImageKey;

/// Frame sequences for one facing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackFrames {
    /// Optional overlay shown on the owner while swinging. Only used when it
    /// has more than one frame; frame 0 is the resting pose.
    pub owner_frames: Vec<ImageKey>,
    /// Weapon sprite frames. Must not be empty.
    pub weapon_frames: Vec<ImageKey>,
}

impl AttackFrames {
    pub fn new(owner_frames: Vec<ImageKey>, weapon_frames: Vec<ImageKey>) -> Self {
        Self {
            owner_frames,
            weapon_frames,
        }
    }

    pub fn weapon_only(weapon_frames: Vec<ImageKey>) -> Self {
        Self {
            owner_frames: Vec::new(),
            weapon_frames,
        }
    }

    pub fn has_overlay(&self) -> bool {
        self.owner_frames.len() > 1
    }
}

/// Configuration passed to
/// [`set_attack_animation`](crate::systems::attack::set_attack_animation).
#[derive(Debug, Clone, PartialEq)]
pub struct AttackAnimation {
    pub weapon_kind: String,
    pub frame_interval_ms: f32,
    /// Gap between the owner's edge and the weapon, in pixels.
    pub offset_px: f32,
    pub frames: DirectionMap<AttackFrames>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackState {
    pub weapon: Option<Entity>,
    pub weapon_kind: String,
    pub elapsed_ms: f32,
    pub frame_interval_ms: f32,
    pub offset_px: f32,
    pub is_attacking: bool,
    pub facing: Direction,
    /// -1 until the first tick of a swing.
    pub frame_index: i32,
    pub last_advance_ms: f32,
    pub per_direction: DirectionMap<AttackFrames>,
}

impl AttackState {
    /// Build the facet. Returns `None` if any weapon sequence is empty.
    pub fn new(config: AttackAnimation) -> Option<Self> {
        if config.frames.iter().any(|(_, f)| f.weapon_frames.is_empty()) {
            return None;
        }
        Some(Self {
            weapon: None,
            weapon_kind: config.weapon_kind,
            elapsed_ms: 0.0,
            frame_interval_ms: config.frame_interval_ms,
            offset_px: config.offset_px,
            is_attacking: false,
            facing: Direction::Down,
            frame_index: -1,
            last_advance_ms: 0.0,
            per_direction: config.frames,
        })
    }

    /// Arm a swing. Returns `false` (and changes nothing) mid-swing.
    pub fn trigger(&mut self) -> bool {
        if self.is_attacking {
            return false;
        }
        self.is_attacking = true;
        self.frame_index = -1;
        self.last_advance_ms = 0.0;
        true
    }

    /// Accumulate time and report whether the swing moves to its next frame.
    /// The first tick after [`trigger`](Self::trigger) always advances.
    pub fn tick(&mut self, delta_ms: f32) -> bool {
        self.elapsed_ms += delta_ms;
        let due = self.frame_index < 0
            || self.elapsed_ms - self.last_advance_ms > self.frame_interval_ms;
        if due {
            self.last_advance_ms = self.elapsed_ms;
            self.frame_index += 1;
        }
        due
    }

    pub fn finish(&mut self) {
        self.is_attacking = false;
        self.frame_index = -1;
        self.weapon = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AttackAnimation {
        AttackAnimation {
            weapon_kind: "weapon".into(),
            frame_interval_ms: 100.0,
            offset_px: 2.0,
            frames: DirectionMap::splat(AttackFrames::weapon_only(vec![
                "w0".into(),
                "w1".into(),
            ])),
        }
    }

    #[test]
    fn rejects_empty_weapon_frames() {
        let mut cfg = config();
        cfg.frames.left.weapon_frames.clear();
        assert!(AttackState::new(cfg).is_none());
    }

    #[test]
    fn trigger_is_noop_mid_swing() {
        let mut state = AttackState::new(config()).unwrap();
        assert!(state.trigger());
        assert!(state.tick(40.0));
        assert_eq!(state.frame_index, 0);
        let before = (state.frame_index, state.last_advance_ms);
        assert!(!state.trigger());
        assert_eq!((state.frame_index, state.last_advance_ms), before);
    }

    #[test]
    fn first_tick_starts_then_waits_for_interval() {
        let mut state = AttackState::new(config()).unwrap();
        state.trigger();
        assert_eq!(state.frame_index, -1);
        assert!(state.tick(40.0));
        assert!(!state.tick(40.0));
        assert!(!state.tick(40.0));
        assert!(state.tick(40.0));
        assert_eq!(state.frame_index, 1);
    }

    #[test]
    fn overlay_needs_more_than_one_frame() {
        assert!(!AttackFrames::new(vec!["o0".into()], vec!["w".into()]).has_overlay());
        assert!(AttackFrames::new(vec!["o0".into(), "o1".into()], vec!["w".into()]).has_overlay());
    }
}
