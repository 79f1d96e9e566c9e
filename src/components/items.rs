//! Attached items facet.
//!
//! Items are ordinary sprites that ride along above their owner. Insertion
//! order is display order, left to right.

use bevy_ecs::prelude::Entity;
use smallvec::SmallVec;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachedItems {
    pub items: SmallVec<[Entity; 4]>,
}

impl AttachedItems {
    /// Append `item` unless already attached.
    pub fn push(&mut self, item: Entity) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn contains(&self, item: Entity) -> bool {
        self.items.contains(&item)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
