//! dungeonpack headless demo.
//!
//! Builds a small dungeon (from a JSON tile map or a walled arena), puts a
//! scripted hero in it with walk cycles, a sword, arrows and a carried key,
//! scatters wandering slimes with health bars and runs a fixed number of
//! ticks, logging what happens.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --ticks 600 --map assets/dungeon.json
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use log::{info, warn};

use dungeonpack::components::attack::{AttackAnimation, AttackFrames};
use dungeonpack::components::direction::{Direction, DirectionMap};
use dungeonpack::components::kind::SpriteKind;
use dungeonpack::components::mapposition::MapPosition;
use dungeonpack::components::rigidbody::RigidBody;
use dungeonpack::components::sprite::{ImageKey, Sprite};
use dungeonpack::components::zindex::ZIndex;
use dungeonpack::events::statusbar::observe_despawn_owner_on_empty;
use dungeonpack::resources::dispatcher::TickPhase;
use dungeonpack::resources::gameconfig::GameConfig;
use dungeonpack::resources::imagestore::ImageStore;
use dungeonpack::resources::tilemap::{TileLocation, TileMap};
use dungeonpack::resources::worldtime::WorldTime;
use dungeonpack::scene::Scene;
use dungeonpack::systems::attack::{attack, set_attack_animation};
use dungeonpack::systems::direction::{facing_of, manage_direction};
use dungeonpack::systems::items::{add_item_to_sprite, has_item_of_kind};
use dungeonpack::systems::moveanim::set_move_animation;
use dungeonpack::systems::projectile::{RadialShot, Shot, shoot, shoot_radial};
use dungeonpack::systems::spawn::{spawn_sprite, spawn_sprites_on_tile};
use dungeonpack::systems::statusbar::{attach_status_bar, change_status_bar_value, status_bar_of};

const TILE_PX: f32 = 16.0;
const HERO_SPEED: f32 = 40.0;
const SLIME_SPEED: f32 = 20.0;
const SLIME_COUNT: usize = 5;
const SLIME_HEALTH: f32 = 3.0;

/// dungeonpack headless demo
#[derive(Parser)]
#[command(version, about = "Runs the dungeonpack sprite behaviors headless and logs the result.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON tile map. Slimes spawn on its "slime_spawn" tiles.
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 300)]
    ticks: u32,
}

#[derive(Resource, Clone, Copy)]
struct Hero(Entity);

fn frames(prefix: &str, direction: Direction, n: usize) -> Vec<ImageKey> {
    let dir = format!("{:?}", direction).to_lowercase();
    (0..n).map(|i| format!("{prefix}_{dir}_{i}")).collect()
}

fn directional(prefix: &str, n: usize) -> DirectionMap<Vec<ImageKey>> {
    DirectionMap::new(
        frames(prefix, Direction::Up, n),
        frames(prefix, Direction::Right, n),
        frames(prefix, Direction::Down, n),
        frames(prefix, Direction::Left, n),
    )
}

fn register_images(store: &mut ImageStore) {
    for direction in Direction::ALL {
        for image in frames("hero", direction, 3) {
            store.insert(image, 16.0, 16.0);
        }
        for image in frames("sword", direction, 3) {
            match direction {
                Direction::Up | Direction::Down => store.insert(image, 6.0, 12.0),
                Direction::Left | Direction::Right => store.insert(image, 12.0, 6.0),
            }
        }
        for image in frames("arrow", direction, 2) {
            store.insert(image, 6.0, 6.0);
        }
    }
    store.insert("slime", 14.0, 12.0);
    store.insert("spark_0", 4.0, 4.0);
    store.insert("spark_1", 4.0, 4.0);
    store.insert("key", 8.0, 8.0);
}

/// Walled arena the size of the scene.
fn arena(config: &GameConfig) -> TileMap {
    let cols = (config.scene_width as f32 / TILE_PX).ceil().max(3.0) as u32;
    let rows = (config.scene_height as f32 / TILE_PX).ceil().max(3.0) as u32;
    let mut map = TileMap::new(cols, rows, TILE_PX);
    for row in 0..rows as i32 {
        for col in 0..cols as i32 {
            let loc = TileLocation::new(col, row);
            let edge = row == 0 || col == 0 || row == rows as i32 - 1 || col == cols as i32 - 1;
            map.set_tile_at(loc, Some(if edge { "wall" } else { "floor" }));
            map.set_wall_at(loc, edge);
        }
    }
    map
}

fn random_velocity(speed: f32) -> Vec2 {
    let angle = fastrand::f32() * std::f32::consts::TAU;
    Vec2::from_angle(angle) * speed
}

fn spawn_slimes(world: &mut World, map_loaded: bool) -> Vec<Entity> {
    let mut slimes = if map_loaded {
        spawn_sprites_on_tile(world, "slime", "slime", "slime_spawn", random_velocity(SLIME_SPEED))
    } else {
        Vec::new()
    };
    if slimes.is_empty() {
        let size = world.resource::<TileMap>().pixel_size();
        for _ in 0..SLIME_COUNT {
            let pos = Vec2::new(
                TILE_PX * 1.5 + fastrand::f32() * (size.x - TILE_PX * 3.0),
                TILE_PX * 1.5 + fastrand::f32() * (size.y - TILE_PX * 3.0),
            );
            let slime = spawn_sprite(world, "slime", "slime", pos);
            let v = random_velocity(SLIME_SPEED);
            world.entity_mut(slime).insert(RigidBody::with_velocity(v.x, v.y));
            slimes.push(slime);
        }
    }
    for &slime in &slimes {
        attach_status_bar(world, slime, SLIME_HEALTH, SLIME_HEALTH);
    }
    slimes
}

fn spawn_hero(world: &mut World, config: &GameConfig) -> Entity {
    let center = world.resource::<TileMap>().pixel_size() * 0.5;
    let hero = spawn_sprite(world, "hero_down_0", "hero", center);
    world.entity_mut(hero).insert(ZIndex(10));

    manage_direction(world, hero);
    set_move_animation(world, hero, directional("hero", 3), config.move_interval_ms);
    let sword = directional("sword", 3);
    set_attack_animation(
        world,
        hero,
        AttackAnimation {
            weapon_kind: "sword".into(),
            frame_interval_ms: config.attack_interval_ms,
            offset_px: config.attack_offset_px,
            frames: sword.map(AttackFrames::weapon_only),
        },
    );
    let key = spawn_sprite(world, "key", "key", center);
    add_item_to_sprite(world, hero, key);
    hero
}

/// Hero script: turn every second, swing, fire arrows and the odd burst.
fn hero_script(world: &mut World) {
    let Some(Hero(hero)) = world.get_resource::<Hero>().copied() else {
        return;
    };
    if world.get_entity(hero).is_err() {
        return;
    }
    let (frame, fps) = (
        world.resource::<WorldTime>().frame_count,
        world.resource::<GameConfig>().target_fps as u64,
    );

    if frame % fps == 1 {
        let heading = [
            Vec2::new(HERO_SPEED, 0.0),
            Vec2::new(0.0, HERO_SPEED),
            Vec2::new(-HERO_SPEED, 0.0),
            Vec2::new(0.0, -HERO_SPEED),
            Vec2::ZERO,
        ][((frame / fps) % 5) as usize];
        if let Some(mut body) = world.get_mut::<RigidBody>(hero) {
            body.set_velocity(heading.x, heading.y);
        }
    }
    if frame % (fps * 3 / 2).max(1) == 0 {
        attack(world, hero);
    }
    if frame % (fps * 2).max(1) == 0 {
        shoot(
            world,
            hero,
            Shot {
                frames: directional("arrow", 2),
                kind: "arrow".into(),
                offset_px: 10.0,
                speed: 120.0,
                interval_ms: 80.0,
            },
        );
    }
    if frame % (fps * 5).max(1) == 0 {
        let sparks = shoot_radial(
            world,
            hero,
            RadialShot {
                frames: vec!["spark_0".into(), "spark_1".into()],
                kind: "spark".into(),
                count: 8,
                offset_px: 12.0,
                speed: 90.0,
                interval_ms: 60.0,
                rotate: true,
                through_walls: fastrand::bool(),
            },
        );
        info!("hero fires a burst of {} sparks", sparks.len());
    }
}

/// Slimes occasionally pick a new heading.
fn wander_system(mut slimes: Query<(&SpriteKind, &mut RigidBody)>) {
    for (kind, mut body) in slimes.iter_mut() {
        if kind.name() == "slime" && fastrand::u8(..) < 4 {
            let v = random_velocity(SLIME_SPEED);
            body.set_velocity(v.x, v.y);
        }
    }
}

/// Swords, arrows and sparks take one point off every slime they touch.
fn damage_system(world: &mut World) {
    let mut sprites = world.query::<(Entity, &MapPosition, &Sprite, &SpriteKind)>();
    let mut hits = Vec::new();
    let mut spent = Vec::new();
    let all: Vec<_> = sprites
        .iter(world)
        .map(|(e, pos, sprite, kind)| (e, sprite.bounds(pos.pos), kind.name().to_string()))
        .collect();
    for (attacker, bounds, kind) in &all {
        if !matches!(kind.as_str(), "sword" | "arrow" | "spark") {
            continue;
        }
        for (target, target_bounds, target_kind) in &all {
            if target_kind == "slime" && bounds.overlaps(target_bounds) {
                hits.push(*target);
                if kind != "sword" {
                    spent.push(*attacker);
                }
            }
        }
    }
    for slime in hits {
        if let Some(bar) = status_bar_of(world, slime) {
            change_status_bar_value(world, bar, -1.0);
        }
    }
    for projectile in spent {
        if world.get_entity(projectile).is_ok() {
            world.despawn(projectile);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }

    let mut scene = Scene::new(&config);
    register_images(&mut scene.world_mut().resource_mut::<ImageStore>());

    let map = cli.map.as_ref().and_then(|path| match TileMap::load(path) {
        Ok(map) => Some(map),
        Err(e) => {
            warn!("{}, using an empty arena", e);
            None
        }
    });
    let map_loaded = map.is_some();
    scene.set_tilemap(map.unwrap_or_else(|| arena(&config)));

    let world = scene.world_mut();
    world.add_observer(observe_despawn_owner_on_empty);
    let slimes = spawn_slimes(world, map_loaded);
    let hero = spawn_hero(world, &config);
    world.insert_resource(Hero(hero));
    info!("hero {:?} enters with {} slimes", hero, slimes.len());

    scene.add_systems((hero_script, wander_system, damage_system).chain().in_set(TickPhase::Input));

    let dt = config.tick_seconds();
    for tick in 1..=cli.ticks {
        scene.tick(dt);
        if tick % config.target_fps == 0 {
            let world = scene.world();
            let alive = slimes.iter().filter(|&&s| world.get_entity(s).is_ok()).count();
            let pos = world.get::<MapPosition>(hero).map(|p| p.pos);
            info!(
                "t={:.1}s hero at {:?} facing {:?}, key carried: {}, slimes left: {}",
                world.resource::<WorldTime>().elapsed,
                pos,
                facing_of(world, hero),
                has_item_of_kind(world, hero, "key"),
                alive
            );
        }
    }

    scene.change_scene();
    info!("done after {} ticks", cli.ticks);
}
