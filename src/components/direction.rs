//! Facing direction data.
//!
//! [`Direction`] is the coarse 4-way facing shared by every behavior facet.
//! [`infer_facing`] is the single dominant-axis rule used by the direction
//! tracker, the move animator and the attack controller, each of which keeps
//! its own copy of the result.
//!
//! # Tie-break
//!
//! When `|vx| == |vy|` the vertical branch wins: diagonal movement faces UP or
//! DOWN. Content authored against this rule depends on it, so it is kept.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Angle of the unit vector for this facing, in screen space (+y down).
    pub fn angle_radians(self) -> f32 {
        match self {
            Direction::Up => -FRAC_PI_2,
            Direction::Right => 0.0,
            Direction::Down => FRAC_PI_2,
            Direction::Left => std::f32::consts::PI,
        }
    }
}

/// Facing for a velocity, or `None` when the velocity is exactly zero.
pub fn infer_facing(velocity: Vec2) -> Option<Direction> {
    let (vx, vy) = (velocity.x, velocity.y);
    if vx == 0.0 && vy == 0.0 {
        return None;
    }
    if vx.abs() > vy.abs() {
        Some(if vx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if vy > 0.0 {
        Some(Direction::Down)
    } else {
        Some(Direction::Up)
    }
}

/// One value per facing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectionMap<T> {
    pub up: T,
    pub right: T,
    pub down: T,
    pub left: T,
}

impl<T> DirectionMap<T> {
    pub fn new(up: T, right: T, down: T, left: T) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Up => &self.up,
            Direction::Right => &self.right,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> DirectionMap<U> {
        DirectionMap {
            up: f(self.up),
            right: f(self.right),
            down: f(self.down),
            left: f(self.left),
        }
    }

    /// Values in `Direction::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        [
            &mut self.up,
            &mut self.right,
            &mut self.down,
            &mut self.left,
        ]
        .into_iter()
    }
}

impl<T: Clone> DirectionMap<T> {
    /// Same value for every facing.
    pub fn splat(value: T) -> Self {
        Self {
            up: value.clone(),
            right: value.clone(),
            down: value.clone(),
            left: value,
        }
    }
}

/// Direction facet of a behavior record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionState {
    pub facing: Direction,
    /// `atan2(vy, vx)` of the last nonzero velocity.
    pub angle_radians: f32,
    /// Cleared for good once the owner is destroyed.
    pub active: bool,
}

impl Default for DirectionState {
    fn default() -> Self {
        Self {
            facing: Direction::Down,
            angle_radians: Direction::Down.angle_radians(),
            active: true,
        }
    }
}

impl DirectionState {
    /// Fold one tick's velocity into the state. Zero velocity keeps the last heading.
    pub fn observe(&mut self, velocity: Vec2) -> bool {
        let Some(facing) = infer_facing(velocity) else {
            return false;
        };
        self.facing = facing;
        self.angle_radians = velocity.y.atan2(velocity.x);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_dominant_axis() {
        assert_eq!(infer_facing(Vec2::new(5.0, 0.0)), Some(Direction::Right));
        assert_eq!(infer_facing(Vec2::new(-5.0, 2.0)), Some(Direction::Left));
    }

    #[test]
    fn vertical_dominant_axis() {
        assert_eq!(infer_facing(Vec2::new(0.0, -5.0)), Some(Direction::Up));
        assert_eq!(infer_facing(Vec2::new(1.0, 3.0)), Some(Direction::Down));
    }

    #[test]
    fn ties_resolve_vertically() {
        assert_eq!(infer_facing(Vec2::new(4.0, 4.0)), Some(Direction::Down));
        assert_eq!(infer_facing(Vec2::new(4.0, -4.0)), Some(Direction::Up));
        assert_eq!(infer_facing(Vec2::new(-4.0, 4.0)), Some(Direction::Down));
        assert_eq!(infer_facing(Vec2::new(-4.0, -4.0)), Some(Direction::Up));
    }

    #[test]
    fn zero_velocity_has_no_facing() {
        assert_eq!(infer_facing(Vec2::ZERO), None);
    }

    #[test]
    fn observe_keeps_heading_when_idle() {
        let mut state = DirectionState::default();
        assert!(state.observe(Vec2::new(-3.0, 0.0)));
        assert_eq!(state.facing, Direction::Left);
        assert!((state.angle_radians - std::f32::consts::PI).abs() < 1e-6);

        assert!(!state.observe(Vec2::ZERO));
        assert_eq!(state.facing, Direction::Left);
        assert!((state.angle_radians - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn every_nonzero_velocity_has_a_facing() {
        for vx in -3i32..=3 {
            for vy in -3i32..=3 {
                let v = Vec2::new(vx as f32, vy as f32);
                let facing = infer_facing(v);
                assert_eq!(facing.is_none(), vx == 0 && vy == 0);
                if vx != 0 && vx.abs() == vy.abs() {
                    assert!(matches!(facing, Some(Direction::Up | Direction::Down)));
                }
            }
        }
    }

    #[test]
    fn direction_map_lookup_and_splat() {
        let mut map = DirectionMap::new(1, 2, 3, 4);
        assert_eq!(*map.get(Direction::Left), 4);
        *map.get_mut(Direction::Up) = 10;
        assert_eq!(map.up, 10);
        let order: Vec<Direction> = map.iter().map(|(d, _)| d).collect();
        assert_eq!(order, Direction::ALL.to_vec());
        assert_eq!(DirectionMap::splat(7).right, 7);
    }
}
