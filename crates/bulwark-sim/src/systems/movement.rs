//! Path-following movement: slow expiry, progress advance, position
//! refresh.

use hecs::{Entity, World};

use bulwark_core::components::{Enemy, PathOffset, PathProgress, SlowEffect};
use bulwark_core::constants::{BASE_ENEMY_SPEED, DT};
use bulwark_core::enums::SlowExpiry;
use bulwark_core::types::Position;

use crate::path::Path;

/// Advance every enemy along the path and refresh its world position.
///
/// Returns the entities whose progress passed the escape point, in
/// registry iteration order; the resolver handles them this same tick.
pub fn run(world: &mut World, path: &Path, now: f64) -> Vec<Entity> {
    let mut escaped = Vec::new();

    for (entity, (_enemy, progress, offset, slow, position)) in world.query_mut::<(
        &Enemy,
        &mut PathProgress,
        &PathOffset,
        &mut SlowEffect,
        &mut Position,
    )>() {
        // Timed slows lapse before movement applies; permanent slows are
        // managed by the slow-field system, never by the clock.
        if let SlowExpiry::At(expires) = slow.expires {
            if now > expires {
                slow.multiplier = 1.0;
                slow.expires = SlowExpiry::None;
            }
        }

        progress.t += BASE_ENEMY_SPEED * DT * slow.multiplier;

        let base = path.position_at(progress.t);
        position.x = base.x + offset.dx;
        position.y = base.y + offset.dy;

        if progress.t > 1.0 {
            escaped.push(entity);
        }
    }

    escaped
}
