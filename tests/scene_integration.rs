//! Scene lifecycle, shared update installation, items, status bars and the
//! host physics.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;

use dungeonpack::components::direction::DirectionMap;
use dungeonpack::components::kind::SpriteKind;
use dungeonpack::components::mapposition::MapPosition;
use dungeonpack::components::persistent::Persistent;
use dungeonpack::components::rigidbody::RigidBody;
use dungeonpack::components::sprite::{ImageKey, Sprite};
use dungeonpack::components::spriteflags::SpriteFlags;
use dungeonpack::events::statusbar::StatusBarEmptied;
use dungeonpack::resources::dispatcher::{SharedUpdateDispatcher, TickPhase, UpdateKind};
use dungeonpack::resources::gameconfig::GameConfig;
use dungeonpack::resources::registry::EntityRegistry;
use dungeonpack::resources::tilemap::{TileLocation, TileMap};
use dungeonpack::scene::Scene;
use dungeonpack::systems::direction::manage_direction;
use dungeonpack::systems::items::{add_item_to_sprite, has_item, has_item_of_kind, items_of};
use dungeonpack::systems::moveanim::set_move_animation;
use dungeonpack::systems::spawn::{spawn_sprite, spawn_sprites_on_tile};
use dungeonpack::systems::statusbar::{
    attach_status_bar, change_status_bar_value, set_status_bar_value, status_bar_of,
    status_bar_value,
};

const DT: f32 = 0.04;
const EPSILON: f32 = 1e-4;

fn approx_vec(a: Vec2, b: Vec2) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn seq(prefix: &str, n: usize) -> Vec<ImageKey> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

fn walk() -> DirectionMap<Vec<ImageKey>> {
    DirectionMap::new(seq("u", 2), seq("r", 2), seq("d", 2), seq("l", 2))
}

fn sprite_at(scene: &mut Scene, x: f32, y: f32, w: f32, h: f32) -> Entity {
    scene
        .world_mut()
        .spawn((MapPosition::new(x, y), Sprite::new("thing", w, h), RigidBody::new()))
        .id()
}

fn pos(scene: &Scene, e: Entity) -> Vec2 {
    scene.world().get::<MapPosition>(e).unwrap().pos
}

fn dispatcher(scene: &Scene) -> &SharedUpdateDispatcher {
    scene.world().resource::<SharedUpdateDispatcher>()
}

#[derive(Resource, Default)]
struct Emptied(Vec<(Entity, Entity)>);

#[derive(Resource, Default)]
struct GameTicks(u32);

fn count_game_ticks(mut ticks: ResMut<GameTicks>) {
    ticks.0 += 1;
}

// --- shared updates ---

#[test]
fn shared_update_installed_once_for_many_entities() {
    let mut scene = Scene::new(&GameConfig::new());
    for i in 0..5 {
        let e = sprite_at(&mut scene, 10.0 * i as f32, 10.0, 8.0, 8.0);
        manage_direction(scene.world_mut(), e);
        set_move_animation(scene.world_mut(), e, walk(), 100.0);
        scene.tick(DT);
    }
    assert_eq!(dispatcher(&scene).install_count(UpdateKind::Direction), 1);
    assert_eq!(dispatcher(&scene).install_count(UpdateKind::MoveAnimation), 1);
    assert!(!dispatcher(&scene).is_installed(UpdateKind::AttackAnimation));
    assert_eq!(scene.world().resource::<EntityRegistry>().len(), 5);
}

#[test]
fn install_waits_for_next_tick() {
    let mut scene = Scene::new(&GameConfig::new());
    let e = sprite_at(&mut scene, 10.0, 10.0, 8.0, 8.0);
    manage_direction(scene.world_mut(), e);
    assert!(dispatcher(&scene).is_requested(UpdateKind::Direction));
    assert!(!dispatcher(&scene).is_installed(UpdateKind::Direction));
    scene.tick(DT);
    assert!(dispatcher(&scene).is_installed(UpdateKind::Direction));
}

#[test]
fn change_scene_resets_everything_scene_scoped() {
    let mut scene = Scene::new(&GameConfig::new());
    scene.world_mut().init_resource::<GameTicks>();
    scene.add_systems(count_game_ticks.in_set(TickPhase::Input));
    scene.set_tilemap(TileMap::new(4, 4, 16.0));

    let doomed = sprite_at(&mut scene, 10.0, 10.0, 8.0, 8.0);
    let keeper = sprite_at(&mut scene, 20.0, 10.0, 8.0, 8.0);
    scene.world_mut().entity_mut(keeper).insert(Persistent);
    manage_direction(scene.world_mut(), doomed);
    scene.tick(DT);
    assert_eq!(scene.world().resource::<GameTicks>().0, 1);

    scene.change_scene();
    assert!(scene.world().get_entity(doomed).is_err());
    assert!(scene.world().get_entity(keeper).is_ok());
    assert!(scene.world().resource::<EntityRegistry>().is_empty());
    assert!(!dispatcher(&scene).is_requested(UpdateKind::Direction));
    assert!(scene.world().get_resource::<TileMap>().is_none());

    scene.tick(DT);
    assert_eq!(scene.world().resource::<GameTicks>().0, 1);

    manage_direction(scene.world_mut(), keeper);
    scene.tick(DT);
    assert_eq!(dispatcher(&scene).install_count(UpdateKind::Direction), 1);
}

// --- items ---

#[test]
fn items_line_up_above_owner() {
    let mut scene = Scene::new(&GameConfig::new());
    let owner = sprite_at(&mut scene, 80.0, 60.0, 16.0, 16.0);
    let a = sprite_at(&mut scene, 0.0, 0.0, 8.0, 8.0);
    let b = sprite_at(&mut scene, 0.0, 0.0, 4.0, 6.0);
    assert!(add_item_to_sprite(scene.world_mut(), owner, a));
    assert!(add_item_to_sprite(scene.world_mut(), owner, b));
    assert!(!add_item_to_sprite(scene.world_mut(), owner, a));
    scene.tick(DT);

    // row width 8 + 2 + 4, owner top at 52
    assert!(approx_vec(pos(&scene, a), Vec2::new(77.0, 46.0)));
    assert!(approx_vec(pos(&scene, b), Vec2::new(85.0, 47.0)));
    assert_eq!(items_of(scene.world(), owner), vec![a, b]);
    assert!(has_item(scene.world(), owner, b));
}

#[test]
fn destroyed_items_drop_out_of_the_row() {
    let mut scene = Scene::new(&GameConfig::new());
    let owner = sprite_at(&mut scene, 80.0, 60.0, 16.0, 16.0);
    let a = sprite_at(&mut scene, 0.0, 0.0, 8.0, 8.0);
    let b = sprite_at(&mut scene, 0.0, 0.0, 4.0, 6.0);
    add_item_to_sprite(scene.world_mut(), owner, a);
    add_item_to_sprite(scene.world_mut(), owner, b);
    scene.tick(DT);
    scene.world_mut().despawn(a);
    scene.tick(DT);

    assert!(approx_vec(pos(&scene, b), Vec2::new(80.0, 47.0)));
    assert_eq!(items_of(scene.world(), owner), vec![b]);
    assert!(!has_item(scene.world(), owner, a));
}

#[test]
fn item_kinds_are_queryable() {
    let mut scene = Scene::new(&GameConfig::new());
    let owner = sprite_at(&mut scene, 80.0, 60.0, 16.0, 16.0);
    let key = spawn_sprite(scene.world_mut(), "key", "key", Vec2::ZERO);
    add_item_to_sprite(scene.world_mut(), owner, key);
    assert!(has_item_of_kind(scene.world(), owner, "key"));
    assert!(!has_item_of_kind(scene.world(), owner, "potion"));
    assert!(!add_item_to_sprite(scene.world_mut(), owner, owner));
}

// --- status bars ---

#[test]
fn status_bar_hangs_over_owner_and_follows() {
    let mut scene = Scene::new(&GameConfig::new());
    let owner = sprite_at(&mut scene, 80.0, 60.0, 16.0, 16.0);
    let bar = attach_status_bar(scene.world_mut(), owner, 10.0, 7.0).unwrap();
    assert_eq!(status_bar_of(scene.world(), owner), Some(bar));
    assert_eq!(status_bar_value(scene.world(), bar), Some(7.0));
    assert_eq!(
        scene.world().get::<SpriteKind>(bar).unwrap().name(),
        "status_bar"
    );

    scene
        .world_mut()
        .get_mut::<RigidBody>(owner)
        .unwrap()
        .set_velocity(25.0, 0.0);
    scene.tick(DT);
    let offset = pos(&scene, bar) - pos(&scene, owner);
    assert!(approx_vec(offset, Vec2::new(0.0, -11.0)));
}

#[test]
fn status_bar_values_are_clamped() {
    let mut scene = Scene::new(&GameConfig::new());
    let owner = sprite_at(&mut scene, 80.0, 60.0, 16.0, 16.0);
    let bar = attach_status_bar(scene.world_mut(), owner, 10.0, 5.0).unwrap();
    assert_eq!(change_status_bar_value(scene.world_mut(), bar, 20.0), Some(10.0));
    assert_eq!(set_status_bar_value(scene.world_mut(), bar, -3.0), Some(0.0));
    assert_eq!(change_status_bar_value(scene.world_mut(), owner, 1.0), None);
}

#[test]
fn emptied_fires_once_per_transition() {
    let mut scene = Scene::new(&GameConfig::new());
    scene.world_mut().init_resource::<Emptied>();
    scene
        .world_mut()
        .add_observer(|trigger: On<StatusBarEmptied>, mut seen: ResMut<Emptied>| {
            let event = trigger.event();
            seen.0.push((event.bar, event.owner));
        });
    let owner = sprite_at(&mut scene, 80.0, 60.0, 16.0, 16.0);
    let bar = attach_status_bar(scene.world_mut(), owner, 3.0, 3.0).unwrap();

    scene.tick(DT);
    change_status_bar_value(scene.world_mut(), bar, -3.0);
    scene.tick(DT);
    scene.tick(DT);
    assert_eq!(scene.world().resource::<Emptied>().0, vec![(bar, owner)]);

    set_status_bar_value(scene.world_mut(), bar, 1.0);
    scene.tick(DT);
    set_status_bar_value(scene.world_mut(), bar, 0.0);
    scene.tick(DT);
    assert_eq!(scene.world().resource::<Emptied>().0.len(), 2);
}

#[test]
fn bar_dies_with_its_owner_and_is_replaced_on_reattach() {
    let mut scene = Scene::new(&GameConfig::new());
    let owner = sprite_at(&mut scene, 80.0, 60.0, 16.0, 16.0);
    let first = attach_status_bar(scene.world_mut(), owner, 3.0, 3.0).unwrap();
    let second = attach_status_bar(scene.world_mut(), owner, 5.0, 5.0).unwrap();
    assert!(scene.world().get_entity(first).is_err());
    assert_eq!(status_bar_of(scene.world(), owner), Some(second));

    scene.tick(DT);
    scene.world_mut().despawn(owner);
    scene.tick(DT);
    assert!(scene.world().get_entity(second).is_err());
}

// --- tiles and walls ---

#[test]
fn sprites_spawn_on_marked_tiles() {
    let mut scene = Scene::new(&GameConfig::new());
    let mut map = TileMap::new(6, 5, 16.0);
    map.set_tile_at(TileLocation::new(2, 2), Some("spawn"));
    map.set_tile_at(TileLocation::new(4, 1), Some("spawn"));
    map.set_tile_at(TileLocation::new(1, 1), Some("floor"));
    scene.set_tilemap(map);

    let spawned = spawn_sprites_on_tile(scene.world_mut(), "slime", "slime", "spawn", Vec2::new(3.0, 0.0));
    assert_eq!(spawned.len(), 2);
    assert!(approx_vec(pos(&scene, spawned[0]), Vec2::new(72.0, 24.0)));
    assert!(approx_vec(pos(&scene, spawned[1]), Vec2::new(40.0, 40.0)));
    for &e in &spawned {
        let world = scene.world();
        assert_eq!(world.get::<SpriteKind>(e).unwrap().name(), "slime");
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity, Vec2::new(3.0, 0.0));
        assert!(world.get::<SpriteFlags>(e).unwrap().bounce_on_wall);
    }
    let map = scene.world().resource::<TileMap>();
    assert!(map.tiles_by_type("spawn").is_empty());
    assert_eq!(map.tiles_by_type("floor").len(), 1);
}

#[test]
fn bouncing_sprite_reverses_at_a_wall() {
    let mut scene = Scene::new(&GameConfig::new());
    let mut map = TileMap::new(8, 5, 16.0);
    map.set_tile_at(TileLocation::new(2, 2), Some("spawn"));
    map.set_wall_at(TileLocation::new(4, 2), true);
    scene.set_tilemap(map);
    let e = spawn_sprites_on_tile(scene.world_mut(), "slime", "slime", "spawn", Vec2::new(400.0, 0.0))[0];

    scene.tick(DT);
    assert!(approx_vec(pos(&scene, e), Vec2::new(56.0, 40.0)));
    scene.tick(DT);
    assert!(approx_vec(pos(&scene, e), Vec2::new(56.0, 40.0)));
    assert_eq!(scene.world().get::<RigidBody>(e).unwrap().velocity.x, -400.0);
    scene.tick(DT);
    assert!(approx_vec(pos(&scene, e), Vec2::new(40.0, 40.0)));
}

#[test]
fn plain_sprite_stops_at_a_wall() {
    let mut scene = Scene::new(&GameConfig::new());
    let mut map = TileMap::new(8, 5, 16.0);
    map.set_wall_at(TileLocation::new(4, 2), true);
    scene.set_tilemap(map);
    let e = sprite_at(&mut scene, 56.0, 40.0, 16.0, 16.0);
    scene
        .world_mut()
        .get_mut::<RigidBody>(e)
        .unwrap()
        .set_velocity(400.0, 0.0);
    scene.tick(DT);
    assert!(approx_vec(pos(&scene, e), Vec2::new(56.0, 40.0)));
    assert!(scene.world().get::<RigidBody>(e).unwrap().is_still());
}
