//! Cleanup system: removes expired pulse markers.

use hecs::{Entity, World};

use bulwark_core::components::Pulse;

/// Despawn pulses whose lifetime has elapsed. Uses the shared buffer to
/// avoid per-tick allocation.
pub fn run(world: &mut World, now: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, pulse) in world.query_mut::<&Pulse>() {
        if now - pulse.started_at > pulse.duration_secs {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
