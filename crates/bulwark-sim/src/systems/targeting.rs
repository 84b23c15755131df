//! Shooter targeting and firing.

use hecs::{Entity, World};

use bulwark_core::components::{Cooldown, Enemy, Tower};
use bulwark_core::constants::{PROJECTILE_SPEED, SHOOTER_LEVELS, TOWER_RANGE};
use bulwark_core::enums::TowerKind;
use bulwark_core::types::Position;

use crate::projectile::{Projectile, ProjectileTarget};

/// Fire every shooter tower that is off cooldown and has a target in
/// range.
///
/// Target selection takes the first live enemy within range in registry
/// iteration order — there is no distance sort. The cooldown only resets
/// on a successful shot, so a tower with nothing in range tries again
/// next tick.
pub fn run(world: &mut World, now: f64) {
    let mut ready: Vec<(Entity, Position)> = Vec::new();
    {
        let mut query = world.query::<(&Tower, &Position, &Cooldown)>();
        for (entity, (tower, pos, cooldown)) in query.iter() {
            if tower.kind != TowerKind::Shooter {
                continue;
            }
            let interval = SHOOTER_LEVELS[tower.level as usize].fire_interval_secs;
            let off_cooldown = match cooldown.last_fired_at {
                Some(last) => now - last >= interval,
                None => true,
            };
            if off_cooldown {
                ready.push((entity, *pos));
            }
        }
    }

    for (tower_entity, tower_pos) in ready {
        let target = {
            let mut enemies = world.query::<(&Enemy, &Position)>();
            enemies
                .iter()
                .find(|(_, (_, pos))| tower_pos.distance_to(pos) <= TOWER_RANGE)
                .map(|(entity, _)| entity)
        };
        let Some(target) = target else { continue };

        world.spawn((
            Projectile {
                speed: PROJECTILE_SPEED,
                target: ProjectileTarget::Tracking(target),
            },
            tower_pos,
        ));
        if let Ok(mut cooldown) = world.get::<&mut Cooldown>(tower_entity) {
            cooldown.last_fired_at = Some(now);
        }
    }
}
