//! Keeps attached entities on their targets.
//!
//! Status bars hang above their owner through [`StuckTo`]. A follower whose
//! target has no position (destroyed, or itself a follower) stays where it is.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::stuckto::StuckTo;

pub fn stuck_to_entity_system(
    mut followers: Query<(&StuckTo, &mut MapPosition)>,
    targets: Query<&MapPosition, Without<StuckTo>>,
) {
    for (stuck_to, mut follower_pos) in followers.iter_mut() {
        if let Ok(target_pos) = targets.get(stuck_to.target) {
            follower_pos.pos = target_pos.pos + stuck_to.offset;
        }
    }
}
