//! Scene ownership and the per-tick loop.
//!
//! A [`Scene`] owns the ECS [`World`] and the [`Schedule`] run once per tick.
//! Host systems (movement, followers) are added when the schedule is built;
//! behavior systems are installed lazily by the
//! [`SharedUpdateDispatcher`] the first time a behavior is registered.
//!
//! Changing scene throws away everything scene scoped: non-[`Persistent`]
//! entities, the registry, the dispatcher's install records, the tile map and
//! any game systems added with [`Scene::add_systems`].

use bevy_ecs::prelude::*;
use bevy_ecs::system::ScheduleSystem;
use log::info;

use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::sprite::Sprite;
use crate::resources::dispatcher::{FollowOrder, SharedUpdateDispatcher, TickPhase, configure_phases};
use crate::resources::gameconfig::GameConfig;
use crate::resources::imagestore::ImageStore;
use crate::resources::registry::EntityRegistry;
use crate::resources::screensize::ScreenSize;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::movement::movement_system;
use crate::systems::stuckto::stuck_to_entity_system;
use crate::systems::time::update_world_time;

pub struct Scene {
    world: World,
    schedule: Schedule,
}

impl Scene {
    pub fn new(config: &GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(ScreenSize {
            w: config.scene_width as i32,
            h: config.scene_height as i32,
        });
        world.insert_resource(EntityRegistry::new());
        world.insert_resource(SharedUpdateDispatcher::new());
        world.insert_resource(ImageStore::new());
        world.insert_resource(config.clone());
        Self {
            world,
            schedule: Self::build_schedule(),
        }
    }

    fn build_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        configure_phases(&mut schedule);
        schedule.add_systems(movement_system.in_set(TickPhase::Physics));
        schedule.add_systems(stuck_to_entity_system.in_set(FollowOrder::Stick));
        schedule
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Add game systems. They live until the next [`Scene::change_scene`].
    pub fn add_systems<M>(&mut self, systems: impl IntoScheduleConfigs<ScheduleSystem, M>) -> &mut Self {
        self.schedule.add_systems(systems);
        self
    }

    /// Load `map` as the scene's tile map; it also becomes the scene bounds.
    pub fn set_tilemap(&mut self, map: TileMap) {
        self.world.insert_resource(map);
    }

    /// Advance time by `dt` seconds and run one tick.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        {
            let mut dispatcher = self.world.resource_mut::<SharedUpdateDispatcher>();
            if dispatcher.has_pending() {
                dispatcher.flush_into(&mut self.schedule);
            }
        }
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Tear down the current scene and start an empty one.
    pub fn change_scene(&mut self) {
        let doomed: Vec<Entity> = self
            .world
            .query_filtered::<Entity, (Or<(With<MapPosition>, With<Sprite>)>, Without<Persistent>)>()
            .iter(&self.world)
            .collect();
        let count = doomed.len();
        for entity in doomed {
            self.world.despawn(entity);
        }
        self.world.resource_mut::<EntityRegistry>().clear();
        self.world.resource_mut::<SharedUpdateDispatcher>().clear();
        self.world.remove_resource::<TileMap>();
        self.schedule = Self::build_schedule();
        info!("scene changed, {} entities removed", count);
    }
}
