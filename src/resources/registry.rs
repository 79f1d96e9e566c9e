//! Scene-scoped behavior registry.
//!
//! The [`EntityRegistry`] maps an entity to its behavior facets. Each facet
//! kind lives in its own [`ComponentTable`] keyed by entity, so an entity can
//! carry any subset of direction, move, attack, item and status-bar state.
//!
//! # Ordering
//!
//! Tables keep insertion order and never drop rows while a scene is alive.
//! Shared update systems visit entities in that order. A destroyed owner is
//! observed by the systems (its direction row goes inactive, attacks are
//! cleaned up) but its rows stay in place so iteration stays stable.
//!
//! # Lifetime
//!
//! The registry is cleared by [`Scene::change_scene`](crate::scene::Scene::change_scene).

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

use crate::components::attack::AttackState;
use crate::components::direction::DirectionState;
use crate::components::items::AttachedItems;
use crate::components::moveanim::MoveAnimState;

/// Insertion-ordered table of rows keyed by entity.
#[derive(Debug, Clone)]
pub struct ComponentTable<T> {
    index: FxHashMap<Entity, usize>,
    rows: Vec<(Entity, T)>,
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            rows: Vec::new(),
        }
    }
}

impl<T> ComponentTable<T> {
    /// Insert or replace the row for `entity`. A replaced row keeps its
    /// original position. Returns the previous value.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if let Some(&i) = self.index.get(&entity) {
            return Some(std::mem::replace(&mut self.rows[i].1, value));
        }
        self.index.insert(entity, self.rows.len());
        self.rows.push((entity, value));
        None
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.index.get(&entity).map(|&i| &self.rows[i].1)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.index.get(&entity).map(|&i| &mut self.rows[i].1)
    }

    /// Row for `entity`, inserting `f()` first if missing.
    pub fn get_or_insert_with(&mut self, entity: Entity, f: impl FnOnce() -> T) -> &mut T {
        let i = match self.index.get(&entity) {
            Some(&i) => i,
            None => {
                self.index.insert(entity, self.rows.len());
                self.rows.push((entity, f()));
                self.rows.len() - 1
            }
        };
        &mut self.rows[i].1
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.rows.iter().map(|(e, _)| *e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.rows.iter().map(|(e, v)| (*e, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.rows.iter_mut().map(|(e, v)| (*e, v))
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.rows.clear();
    }
}

/// Read-only view over one entity's facets.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorRecord<'a> {
    pub entity: Entity,
    pub direction: Option<&'a DirectionState>,
    pub movement: Option<&'a MoveAnimState>,
    pub attack: Option<&'a AttackState>,
    pub items: Option<&'a AttachedItems>,
    pub status_bar: Option<Entity>,
}

impl BehaviorRecord<'_> {
    pub fn is_empty(&self) -> bool {
        self.direction.is_none()
            && self.movement.is_none()
            && self.attack.is_none()
            && self.items.is_none()
            && self.status_bar.is_none()
    }
}

#[derive(Resource, Debug, Default)]
pub struct EntityRegistry {
    members: ComponentTable<()>,
    pub directions: ComponentTable<DirectionState>,
    pub moves: ComponentTable<MoveAnimState>,
    pub attacks: ComponentTable<AttackState>,
    pub items: ComponentTable<AttachedItems>,
    pub status_bars: ComponentTable<Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` (idempotent) and return its record.
    pub fn get_or_create(&mut self, entity: Entity) -> BehaviorRecord<'_> {
        self.members.get_or_insert_with(entity, || ());
        self.view(entity)
    }

    /// Record for `entity` without creating one.
    pub fn get(&self, entity: Entity) -> Option<BehaviorRecord<'_>> {
        self.members.contains(entity).then(|| self.view(entity))
    }

    fn view(&self, entity: Entity) -> BehaviorRecord<'_> {
        BehaviorRecord {
            entity,
            direction: self.directions.get(entity),
            movement: self.moves.get(entity),
            attack: self.attacks.get(entity),
            items: self.items.get(entity),
            status_bar: self.status_bars.get(entity).copied(),
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(entity)
    }

    /// Registered entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.members.entities()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Direction rows still being tracked, in insertion order.
    pub fn active_directions_mut(&mut self) -> impl Iterator<Item = (Entity, &mut DirectionState)> {
        self.directions.iter_mut().filter(|(_, d)| d.active)
    }

    pub fn is_attacking(&self, entity: Entity) -> bool {
        self.attacks
            .get(entity)
            .map(|a| a.is_attacking)
            .unwrap_or(false)
    }

    pub fn has_item(&self, owner: Entity, item: Entity) -> bool {
        self.items
            .get(owner)
            .map(|items| items.contains(item))
            .unwrap_or(false)
    }

    /// Drop every record. Called on scene change.
    pub fn clear(&mut self) {
        self.members.clear();
        self.directions.clear();
        self.moves.clear();
        self.attacks.clear();
        self.items.clear();
        self.status_bars.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn table_keeps_insertion_order_on_replace() {
        let e = entities(3);
        let mut table = ComponentTable::default();
        table.insert(e[2], "c");
        table.insert(e[0], "a");
        table.insert(e[1], "b");
        assert_eq!(table.insert(e[0], "a2"), Some("a"));
        let order: Vec<_> = table.iter().map(|(e, v)| (e, *v)).collect();
        assert_eq!(order, vec![(e[2], "c"), (e[0], "a2"), (e[1], "b")]);
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let e = entities(2);
        let mut registry = EntityRegistry::new();
        assert!(registry.get(e[0]).is_none());
        assert!(registry.get_or_create(e[0]).is_empty());
        registry.get_or_create(e[1]);
        registry.get_or_create(e[0]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entities().collect::<Vec<_>>(), e);
    }

    #[test]
    fn facets_are_independent() {
        let e = entities(1)[0];
        let mut registry = EntityRegistry::new();
        registry.get_or_create(e);
        registry.directions.insert(e, DirectionState::default());
        let record = registry.get(e).unwrap();
        assert!(record.direction.is_some());
        assert!(record.movement.is_none());
        assert!(record.attack.is_none());
        assert!(!registry.is_attacking(e));
    }

    #[test]
    fn inactive_directions_are_skipped_not_removed() {
        let e = entities(3);
        let mut registry = EntityRegistry::new();
        for &entity in &e {
            registry.directions.insert(entity, DirectionState::default());
        }
        registry.directions.get_mut(e[1]).unwrap().active = false;
        let visited: Vec<_> = registry.active_directions_mut().map(|(e, _)| e).collect();
        assert_eq!(visited, vec![e[0], e[2]]);
        assert_eq!(registry.directions.len(), 3);
    }

    #[test]
    fn unknown_entities_answer_negatively() {
        let e = entities(2);
        let registry = EntityRegistry::new();
        assert!(!registry.is_attacking(e[0]));
        assert!(!registry.has_item(e[0], e[1]));
    }
}
