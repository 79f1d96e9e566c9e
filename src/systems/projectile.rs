//! Projectile launcher.
//!
//! Projectiles are plain sprites with a velocity, [`SpriteFlags`] for wall and
//! off-scene handling and a [`FrameCycle`] that loops their images. Once
//! spawned they are not tracked by the registry.

use std::f32::consts::FRAC_PI_2;

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, error};

use crate::components::direction::{Direction, DirectionMap};
use crate::components::framecycle::FrameCycle;
use crate::components::kind::SpriteKind;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::sprite::{ImageKey, Sprite};
use crate::components::spriteflags::SpriteFlags;
use crate::components::zindex::ZIndex;
use crate::resources::dispatcher::UpdateKind;
use crate::resources::imagestore::{DEFAULT_IMAGE_SIZE, ImageStore};
use crate::resources::worldtime::WorldTime;
use crate::systems::direction::{angle_of, facing_of};
use crate::systems::request_update;

/// A single shot along the owner's facing.
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub frames: DirectionMap<Vec<ImageKey>>,
    pub kind: String,
    /// Distance from the owner's centre to the spawn point.
    pub offset_px: f32,
    /// Pixels per second.
    pub speed: f32,
    pub interval_ms: f32,
}

/// `count` shots spread evenly around the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialShot {
    pub frames: Vec<ImageKey>,
    pub kind: String,
    pub count: u32,
    pub offset_px: f32,
    pub speed: f32,
    pub interval_ms: f32,
    /// Rotate each sprite to its travel angle.
    pub rotate: bool,
    pub through_walls: bool,
}

/// Travel angles in degrees for a radial burst, each in `0..360`.
///
/// Odd counts start at 0°, even counts at -90° so the burst is symmetric
/// about the vertical axis.
pub fn radial_angles(count: u32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;
    let start = if count % 2 == 0 { -90.0 } else { 0.0 };
    (0..count)
        .map(|i| (start + i as f32 * step).rem_euclid(360.0))
        .collect()
}

fn image_size(world: &World, image: &str) -> Vec2 {
    world
        .get_resource::<ImageStore>()
        .map(|store| store.size_of(image))
        .unwrap_or(Vec2::splat(DEFAULT_IMAGE_SIZE))
}

/// Launch parameters shared by every projectile of one call.
struct Launch<'a> {
    origin: Vec2,
    depth: i32,
    kind: &'a str,
    offset_px: f32,
    speed: f32,
    interval_ms: f32,
}

impl Launch<'_> {
    fn spawn(&self, world: &mut World, angle_radians: f32, frames: Vec<ImageKey>) -> Entity {
        let heading = Vec2::from_angle(angle_radians);
        let size = image_size(world, &frames[0]);
        let velocity = heading * self.speed;
        world
            .spawn((
                MapPosition {
                    pos: self.origin + heading * self.offset_px,
                },
                Sprite::new(frames[0].clone(), size.x, size.y),
                RigidBody::with_velocity(velocity.x, velocity.y),
                SpriteFlags::projectile(),
                SpriteKind::new(self.kind),
                ZIndex(self.depth),
                FrameCycle::new(frames, self.interval_ms),
            ))
            .id()
    }
}

fn owner_origin(world: &World, owner: Entity) -> Option<(Vec2, i32)> {
    let entity = world.get_entity(owner).ok()?;
    let pos = entity.get::<MapPosition>()?.pos;
    let depth = entity.get::<ZIndex>().map(|z| z.0).unwrap_or_default();
    Some((pos, depth))
}

/// Fire one projectile along `owner`'s tracked facing.
///
/// Untracked owners shoot downwards.
pub fn shoot(world: &mut World, owner: Entity, shot: Shot) -> Option<Entity> {
    let Some((origin, depth)) = owner_origin(world, owner) else {
        debug!("shoot: {:?} has no position", owner);
        return None;
    };
    let facing = facing_of(world, owner).unwrap_or(Direction::Down);
    let angle = angle_of(world, owner).unwrap_or(FRAC_PI_2);
    let frames = shot.frames.get(facing).clone();
    if frames.is_empty() {
        error!("shoot: no {:?} frames for {:?}", facing, owner);
        return None;
    }
    let launch = Launch {
        origin,
        depth,
        kind: &shot.kind,
        offset_px: shot.offset_px,
        speed: shot.speed,
        interval_ms: shot.interval_ms,
    };
    let projectile = launch.spawn(world, angle, frames);
    request_update(world, UpdateKind::ProjectileAnimation);
    Some(projectile)
}

/// Fire `count` projectiles at [`radial_angles`].
pub fn shoot_radial(world: &mut World, owner: Entity, shot: RadialShot) -> Vec<Entity> {
    let Some((origin, depth)) = owner_origin(world, owner) else {
        debug!("shoot_radial: {:?} has no position", owner);
        return Vec::new();
    };
    if shot.frames.is_empty() {
        error!("shoot_radial: empty frame sequence for {:?}", owner);
        return Vec::new();
    }
    let launch = Launch {
        origin,
        depth,
        kind: &shot.kind,
        offset_px: shot.offset_px,
        speed: shot.speed,
        interval_ms: shot.interval_ms,
    };
    let mut spawned = Vec::with_capacity(shot.count as usize);
    for degrees in radial_angles(shot.count) {
        let projectile = launch.spawn(world, degrees.to_radians(), shot.frames.clone());
        let mut entity = world.entity_mut(projectile);
        if shot.rotate {
            entity.insert(Rotation { degrees });
        }
        if shot.through_walls {
            entity.insert(SpriteFlags::ghost_projectile());
        }
        spawned.push(projectile);
    }
    if !spawned.is_empty() {
        request_update(world, UpdateKind::ProjectileAnimation);
    }
    spawned
}

pub fn frame_cycle_system(time: Res<WorldTime>, mut query: Query<(&mut FrameCycle, &mut Sprite)>) {
    let delta_ms = time.delta_ms();
    for (mut cycle, mut sprite) in query.iter_mut() {
        if let Some(image) = cycle.tick(delta_ms) {
            sprite.set_image(image);
        }
    }
}
