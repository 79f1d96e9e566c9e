//! Lazy installation of shared per-tick updates.
//!
//! Every behavior concern (direction inference, move animation, attack
//! follow, attack animation, item alignment, projectile frames, status bars)
//! is served by one system that walks the
//! [`EntityRegistry`](super::registry::EntityRegistry). The first setup call
//! for a concern asks the [`SharedUpdateDispatcher`] to install it; later
//! calls only add rows to the registry.
//!
//! Setup calls usually run while the schedule is not borrowed, so installs
//! are queued here and flushed into the scene schedule by
//! [`Scene::tick`](crate::scene::Scene::tick) before the next run.
//!
//! # Phases
//!
//! ```text
//! Input -> Intent(Facing -> Pin) -> Physics
//!       -> Follow(Stick -> Attack -> Items -> StatusBars)
//!       -> Animation(Attack -> Move -> Projectile)
//! ```
//!
//! Every system outside Input has its own slot, so two systems never write
//! the same data in an unspecified order. Attack systems pin the owner in
//! Intent, re-place the weapon in Follow and advance frames in Animation
//! before the move animator, which stands down for entities that are
//! mid-swing.

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::systems::attack::{attack_animation_system, attack_follow_system, attack_lock_system};
use crate::systems::direction::direction_system;
use crate::systems::items::item_alignment_system;
use crate::systems::moveanim::move_animation_system;
use crate::systems::projectile::frame_cycle_system;
use crate::systems::statusbar::status_bar_system;

/// Ordered phases of one tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickPhase {
    /// Game code: controllers, AI, attack triggers.
    Input,
    /// Facing inference and attack pinning, before anything moves.
    Intent,
    /// Host movement and wall handling.
    Physics,
    /// Attached sprites follow their owners.
    Follow,
    /// Image swaps.
    Animation,
}

/// Order inside [`TickPhase::Intent`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentOrder {
    Facing,
    Pin,
}

/// Order inside [`TickPhase::Follow`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FollowOrder {
    /// `StuckTo` followers.
    Stick,
    Attack,
    Items,
    StatusBars,
}

/// Order inside [`TickPhase::Animation`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationOrder {
    Attack,
    Move,
    Projectile,
}

/// One shared update concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    Direction,
    MoveAnimation,
    AttackFollow,
    AttackAnimation,
    ItemAlignment,
    ProjectileAnimation,
    StatusBars,
}

impl UpdateKind {
    pub const ALL: [UpdateKind; 7] = [
        UpdateKind::Direction,
        UpdateKind::MoveAnimation,
        UpdateKind::AttackFollow,
        UpdateKind::AttackAnimation,
        UpdateKind::ItemAlignment,
        UpdateKind::ProjectileAnimation,
        UpdateKind::StatusBars,
    ];

    /// Add this concern's systems to `schedule`.
    fn add_to(self, schedule: &mut Schedule) {
        match self {
            UpdateKind::Direction => {
                schedule.add_systems(direction_system.in_set(IntentOrder::Facing));
            }
            UpdateKind::AttackFollow => {
                schedule.add_systems((
                    attack_lock_system.in_set(IntentOrder::Pin),
                    attack_follow_system.in_set(FollowOrder::Attack),
                ));
            }
            UpdateKind::AttackAnimation => {
                schedule.add_systems(attack_animation_system.in_set(AnimationOrder::Attack));
            }
            UpdateKind::MoveAnimation => {
                schedule.add_systems(move_animation_system.in_set(AnimationOrder::Move));
            }
            UpdateKind::ItemAlignment => {
                schedule.add_systems(item_alignment_system.in_set(FollowOrder::Items));
            }
            UpdateKind::ProjectileAnimation => {
                schedule.add_systems(frame_cycle_system.in_set(AnimationOrder::Projectile));
            }
            UpdateKind::StatusBars => {
                schedule.add_systems(status_bar_system.in_set(FollowOrder::StatusBars));
            }
        }
    }
}

/// Chain the tick phases on a fresh schedule.
pub fn configure_phases(schedule: &mut Schedule) {
    schedule.configure_sets(
        (
            TickPhase::Input,
            TickPhase::Intent,
            TickPhase::Physics,
            TickPhase::Follow,
            TickPhase::Animation,
        )
            .chain(),
    );
    schedule.configure_sets(
        (IntentOrder::Facing, IntentOrder::Pin)
            .chain()
            .in_set(TickPhase::Intent),
    );
    schedule.configure_sets(
        (
            FollowOrder::Stick,
            FollowOrder::Attack,
            FollowOrder::Items,
            FollowOrder::StatusBars,
        )
            .chain()
            .in_set(TickPhase::Follow),
    );
    schedule.configure_sets(
        (
            AnimationOrder::Attack,
            AnimationOrder::Move,
            AnimationOrder::Projectile,
        )
            .chain()
            .in_set(TickPhase::Animation),
    );
}

/// Tracks which shared updates the current scene has asked for.
#[derive(Resource, Debug, Default)]
pub struct SharedUpdateDispatcher {
    requested: FxHashSet<UpdateKind>,
    pending: Vec<UpdateKind>,
    install_counts: FxHashMap<UpdateKind, u32>,
}

impl SharedUpdateDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `kind`. Only the first request per scene queues an install;
    /// returns whether this call did.
    pub fn ensure_installed(&mut self, kind: UpdateKind) -> bool {
        if !self.requested.insert(kind) {
            return false;
        }
        debug!("queueing shared update {:?}", kind);
        self.pending.push(kind);
        true
    }

    pub fn is_requested(&self, kind: UpdateKind) -> bool {
        self.requested.contains(&kind)
    }

    /// Whether `kind` is running in the schedule.
    pub fn is_installed(&self, kind: UpdateKind) -> bool {
        self.install_count(kind) > 0
    }

    /// How many times `kind` was added to the schedule this scene.
    pub fn install_count(&self, kind: UpdateKind) -> u32 {
        self.install_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Add every queued concern to `schedule`, in request order.
    pub fn flush_into(&mut self, schedule: &mut Schedule) {
        for kind in self.pending.drain(..) {
            kind.add_to(schedule);
            *self.install_counts.entry(kind).or_insert(0) += 1;
            debug!("installed shared update {:?}", kind);
        }
    }

    /// Forget everything. The schedule must be rebuilt alongside.
    pub fn clear(&mut self) {
        self.requested.clear();
        self.pending.clear();
        self.install_counts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_installed_queues_once() {
        let mut dispatcher = SharedUpdateDispatcher::new();
        assert!(dispatcher.ensure_installed(UpdateKind::MoveAnimation));
        assert!(!dispatcher.ensure_installed(UpdateKind::MoveAnimation));
        assert!(dispatcher.ensure_installed(UpdateKind::Direction));
        assert!(dispatcher.is_requested(UpdateKind::MoveAnimation));
        assert!(!dispatcher.is_installed(UpdateKind::MoveAnimation));
        assert!(dispatcher.has_pending());
    }

    #[test]
    fn flush_installs_each_kind_once() {
        let mut dispatcher = SharedUpdateDispatcher::new();
        let mut schedule = Schedule::default();
        configure_phases(&mut schedule);
        for _ in 0..5 {
            dispatcher.ensure_installed(UpdateKind::Direction);
            dispatcher.ensure_installed(UpdateKind::AttackAnimation);
            dispatcher.flush_into(&mut schedule);
        }
        assert_eq!(dispatcher.install_count(UpdateKind::Direction), 1);
        assert_eq!(dispatcher.install_count(UpdateKind::AttackAnimation), 1);
        assert_eq!(dispatcher.install_count(UpdateKind::MoveAnimation), 0);
        assert!(!dispatcher.has_pending());
    }

    #[test]
    fn clear_allows_reinstall() {
        let mut dispatcher = SharedUpdateDispatcher::new();
        dispatcher.ensure_installed(UpdateKind::ItemAlignment);
        dispatcher.clear();
        assert!(!dispatcher.is_requested(UpdateKind::ItemAlignment));
        assert!(dispatcher.ensure_installed(UpdateKind::ItemAlignment));
    }
}
