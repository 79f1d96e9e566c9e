//! Wall resolution for moving sprites.
//!
//! Movement is integrated one axis at a time so a sprite sliding along a wall
//! keeps its free axis. What happens on contact depends on [`SpriteFlags`]:
//! destroy, bounce (that axis is negated) or stop (that axis is zeroed).
//! Ghost sprites ignore walls.

use glam::Vec2;

use crate::components::sprite::Bounds;
use crate::components::spriteflags::SpriteFlags;
use crate::resources::tilemap::TileMap;

/// Next centre for a sprite of `size` at `pos` moving by `velocity * dt`.
///
/// `velocity` is updated in place on bounce or stop. `None` means the sprite
/// hit a wall and must be destroyed. A non-destroying sprite that already
/// overlaps a wall moves freely until it is out.
pub fn move_with_walls(
    map: Option<&TileMap>,
    pos: Vec2,
    velocity: &mut Vec2,
    size: Vec2,
    flags: SpriteFlags,
    dt: f32,
) -> Option<Vec2> {
    let step = *velocity * dt;
    let Some(map) = map else {
        return Some(pos + step);
    };
    if flags.ghost_through_walls {
        return Some(pos + step);
    }
    if !flags.destroy_on_wall && map.overlaps_wall(&Bounds::from_center(pos, size)) {
        return Some(pos + step);
    }

    let mut next = pos;
    if step.x != 0.0 {
        let candidate = Vec2::new(next.x + step.x, next.y);
        if map.overlaps_wall(&Bounds::from_center(candidate, size)) {
            if flags.destroy_on_wall {
                return None;
            }
            velocity.x = if flags.bounce_on_wall { -velocity.x } else { 0.0 };
        } else {
            next = candidate;
        }
    }
    if step.y != 0.0 {
        let candidate = Vec2::new(next.x, next.y + step.y);
        if map.overlaps_wall(&Bounds::from_center(candidate, size)) {
            if flags.destroy_on_wall {
                return None;
            }
            velocity.y = if flags.bounce_on_wall { -velocity.y } else { 0.0 };
        } else {
            next = candidate;
        }
    }
    Some(next)
}

/// Whether `bounds` lies entirely outside a scene of `scene_size` pixels.
pub fn is_off_scene(bounds: &Bounds, scene_size: Vec2) -> bool {
    bounds.right < 0.0 || bounds.bottom < 0.0 || bounds.left > scene_size.x || bounds.top > scene_size.y
}
