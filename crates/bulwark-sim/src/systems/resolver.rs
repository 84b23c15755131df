//! Death & escape resolution — the one place enemies leave the world.
//!
//! Every enemy that dies is counted, rewarded, and possibly split, and
//! every projectile still tracking it is frozen onto a fixed impact point,
//! before the tick completes.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bulwark_core::components::{Enemy, PathProgress};
use bulwark_core::constants::{
    BOSS_CHILD_HP, BOSS_CHILD_JITTER, BOSS_CHILD_SPACING, BOSS_SPLIT_COUNT, RETARGET_JITTER,
    SPLIT_CHILD_COUNT, SPLIT_CHILD_JITTER, SPLIT_CHILD_OFFSET, SPLIT_HP_DIVISOR,
    TOUGH_ENEMY_MIN_MAX_HP,
};
use bulwark_core::events::GameEvent;
use bulwark_core::types::Position;

use crate::economy::EconomyState;
use crate::path::Path;
use crate::projectile::{Projectile, ProjectileTarget};
use crate::spawn;

/// Resolve the enemies whose progress passed the escape point this tick.
///
/// An escape counts as a kill for both counters but yields no currency
/// and no split. The escapee's remaining hp sets both the player damage
/// and the uniform splash dealt to every other live enemy; splash
/// casualties then go through normal death resolution within the same
/// tick, so escape-triggered kills are rewarded even though the escape
/// itself is not.
pub fn resolve_escapes(
    world: &mut World,
    escaped: &[Entity],
    path: &Path,
    economy: &mut EconomyState,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    for &entity in escaped {
        // An earlier escape's splash may already have killed (and
        // resolved) this one.
        let (hp, position) = match world.query_one_mut::<(&Enemy, &Position)>(entity) {
            Ok((enemy, pos)) => (enemy.hp, *pos),
            Err(_) => continue,
        };

        let damage = escape_damage(hp);
        economy.player_health -= damage;
        economy.record_escape();
        events.push(GameEvent::EnemyEscaped { damage });

        // Uniform splash: every other live enemy takes the same hit,
        // wherever it is on the path.
        for (other, enemy) in world.query_mut::<&mut Enemy>() {
            if other != entity {
                enemy.hp -= damage;
            }
        }

        retarget_projectiles(world, entity, position, rng);
        let _ = world.despawn(entity);

        resolve_deaths(world, path, economy, rng, events);
    }
}

/// Resolve every enemy at or below zero hp: retarget its projectiles,
/// despawn it, pay out the kill, and spawn its split children.
pub fn resolve_deaths(
    world: &mut World,
    path: &Path,
    economy: &mut EconomyState,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    // Split children always start above zero hp, so one collection pass
    // covers everything that can die this call.
    let dead: Vec<(Entity, Enemy, f64, Position)> = {
        let mut query = world.query::<(&Enemy, &PathProgress, &Position)>();
        query
            .iter()
            .filter(|(_, (enemy, _, _))| enemy.hp <= 0)
            .map(|(entity, (enemy, progress, pos))| (entity, *enemy, progress.t, *pos))
            .collect()
    };

    for (entity, enemy, t, position) in dead {
        retarget_projectiles(world, entity, position, rng);
        let _ = world.despawn(entity);

        let reward = economy.record_kill(enemy.is_boss, enemy.max_hp);
        events.push(GameEvent::EnemyKilled {
            boss: enemy.is_boss,
            currency_award: reward,
        });

        // Children's stats come from the parent's max hp and boss flag
        // alone, never from the hp it had left when it died.
        if enemy.is_boss {
            for j in 0..BOSS_SPLIT_COUNT {
                let dx = (j as f64 - 1.0) * BOSS_CHILD_SPACING;
                spawn::spawn_split_child(world, path, rng, t, dx, BOSS_CHILD_JITTER, BOSS_CHILD_HP);
            }
            events.push(GameEvent::EnemySplit {
                children: BOSS_SPLIT_COUNT,
                child_hp: BOSS_CHILD_HP,
            });
        } else if enemy.max_hp >= TOUGH_ENEMY_MIN_MAX_HP {
            let child_hp = div_ceil(enemy.max_hp, SPLIT_HP_DIVISOR);
            for j in 0..SPLIT_CHILD_COUNT {
                let dx = if j == 0 {
                    -SPLIT_CHILD_OFFSET
                } else {
                    SPLIT_CHILD_OFFSET
                };
                spawn::spawn_split_child(world, path, rng, t, dx, SPLIT_CHILD_JITTER, child_hp);
            }
            events.push(GameEvent::EnemySplit {
                children: SPLIT_CHILD_COUNT,
                child_hp,
            });
        }
    }
}

/// Freeze every projectile tracking `target` onto a jittered point near
/// `position`; the shot flies on and lands as a cosmetic miss.
fn retarget_projectiles(world: &mut World, target: Entity, position: Position, rng: &mut ChaCha8Rng) {
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        if projectile.target == ProjectileTarget::Tracking(target) {
            let jx = (rng.gen::<f64>() - 0.5) * RETARGET_JITTER;
            let jy = (rng.gen::<f64>() - 0.5) * RETARGET_JITTER;
            projectile.target =
                ProjectileTarget::Fixed(Position::new(position.x + jx, position.y + jy));
        }
    }
}

/// Player/splash damage dealt by an escaping enemy: ceil(hp / 2).
pub(crate) fn escape_damage(hp: i32) -> i32 {
    (hp + 1).div_euclid(2)
}

/// ceil(n / d) for positive d.
pub(crate) fn div_ceil(n: i32, d: i32) -> i32 {
    (n + d - 1).div_euclid(d)
}
