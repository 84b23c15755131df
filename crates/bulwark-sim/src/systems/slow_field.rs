//! Slow-tower behavior: periodic pulses at levels 0–2, a continuous
//! field at the permanent level.
//!
//! Slow application is last-writer-wins: a later tower overwrites an
//! earlier one's multiplier outright, no stacking.

use hecs::{Entity, World};

use bulwark_core::components::{Cooldown, Enemy, Pulse, SlowEffect, Tower};
use bulwark_core::constants::{PULSE_DURATION_SECS, SLOW_LEVELS, TOWER_RANGE};
use bulwark_core::enums::{SlowExpiry, TowerKind};
use bulwark_core::types::Position;

/// Apply every slow tower's effect for this tick.
pub fn run(world: &mut World, now: f64) {
    let mut towers: Vec<(Entity, Position, u8)> = Vec::new();
    {
        let mut query = world.query::<(&Tower, &Position)>();
        for (entity, (tower, pos)) in query.iter() {
            if tower.kind == TowerKind::Slow {
                towers.push((entity, *pos, tower.level));
            }
        }
    }

    for (tower_entity, tower_pos, level) in towers {
        let spec = &SLOW_LEVELS[level as usize];

        match spec.duration_secs {
            // Permanent level: a standing field re-evaluated every tick.
            // Enemies in range are held at the permanent slow; enemies
            // that have left range are released.
            None => {
                for (_entity, (_enemy, pos, slow)) in
                    world.query_mut::<(&Enemy, &Position, &mut SlowEffect)>()
                {
                    if tower_pos.distance_to(pos) <= TOWER_RANGE {
                        slow.multiplier = 1.0 - spec.slow_pct;
                        slow.expires = SlowExpiry::Permanent;
                    } else if slow.expires == SlowExpiry::Permanent {
                        slow.multiplier = 1.0;
                        slow.expires = SlowExpiry::None;
                    }
                }
            }
            Some(duration) => {
                let ready = match world.get::<&Cooldown>(tower_entity) {
                    Ok(cooldown) => match cooldown.last_fired_at {
                        Some(last) => now - last >= spec.cooldown_secs,
                        None => true,
                    },
                    Err(_) => false,
                };
                if !ready {
                    continue;
                }

                // The pulse fires on cooldown whether or not anything is
                // in range; the slow lands synchronously here, the Pulse
                // entity is only the visual record.
                for (_entity, (_enemy, pos, slow)) in
                    world.query_mut::<(&Enemy, &Position, &mut SlowEffect)>()
                {
                    if tower_pos.distance_to(pos) <= TOWER_RANGE {
                        slow.multiplier = 1.0 - spec.slow_pct;
                        slow.expires = SlowExpiry::At(now + duration);
                    }
                }

                if let Ok(mut cooldown) = world.get::<&mut Cooldown>(tower_entity) {
                    cooldown.last_fired_at = Some(now);
                }
                world.spawn((
                    Pulse {
                        started_at: now,
                        duration_secs: PULSE_DURATION_SECS,
                        max_radius: TOWER_RANGE,
                    },
                    tower_pos,
                ));
            }
        }
    }
}
