//! Projectile flight and impact resolution.

use hecs::{Entity, World};

use bulwark_core::components::Enemy;
use bulwark_core::constants::DT;
use bulwark_core::types::Position;

use crate::projectile::{Projectile, ProjectileTarget};

/// What happens to one projectile this tick.
enum Step {
    /// Tracked enemy vanished and no fixed point was ever assigned:
    /// recovery drop.
    Discard,
    Advance(Position),
    /// Within one step of the aim point. Carries the enemy to damage when
    /// still tracking; a fixed-point impact is a cosmetic miss.
    Hit(Option<Entity>),
}

/// Advance every projectile toward its aim point and resolve impacts.
/// Uses the shared buffer to batch despawns.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    // Decide first, apply second: aim points read enemy positions while
    // projectile positions are still borrowed by the query.
    let mut steps: Vec<(Entity, Step)> = Vec::new();
    {
        let mut query = world.query::<(&Projectile, &Position)>();
        for (entity, (projectile, pos)) in query.iter() {
            let aim = match projectile.target {
                ProjectileTarget::Tracking(enemy) => match world.get::<&Position>(enemy) {
                    Ok(enemy_pos) => Some((*enemy_pos, Some(enemy))),
                    Err(_) => None,
                },
                ProjectileTarget::Fixed(point) => Some((point, None)),
            };

            let Some((aim, enemy)) = aim else {
                steps.push((entity, Step::Discard));
                continue;
            };

            let step_len = projectile.speed * DT;
            if pos.distance_to(&aim) < step_len {
                steps.push((entity, Step::Hit(enemy)));
            } else {
                let direction = (aim.as_dvec2() - pos.as_dvec2()).normalize();
                let next = pos.as_dvec2() + direction * step_len;
                steps.push((entity, Step::Advance(next.into())));
            }
        }
    }

    for (entity, step) in steps {
        match step {
            Step::Discard => despawn_buffer.push(entity),
            Step::Advance(next) => {
                if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                    *pos = next;
                }
            }
            Step::Hit(enemy) => {
                if let Some(enemy) = enemy {
                    // One point of damage; the death resolver picks up any
                    // resulting kill at the start of the next tick.
                    if let Ok(mut target) = world.get::<&mut Enemy>(enemy) {
                        target.hp -= 1;
                    }
                }
                despawn_buffer.push(entity);
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
