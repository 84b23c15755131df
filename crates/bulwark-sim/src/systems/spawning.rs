//! Spawn scheduling — one enemy per fixed interval, a boss on cadence.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bulwark_core::components::Enemy;
use bulwark_core::constants::{
    BASIC_SPAWN_HP_MAX, BASIC_SPAWN_HP_MIN, BOSS_CADENCE, BOSS_HP, SPAWN_INTERVAL_TICKS,
    TOUGH_SPAWN_AFTER_DEFEATS, TOUGH_SPAWN_HP_MAX, TOUGH_SPAWN_HP_MIN,
};
use bulwark_core::events::GameEvent;

use crate::path::Path;
use crate::spawn;

/// Frame counter driving the spawn cadence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTimer {
    ticks: u64,
}

impl SpawnTimer {
    /// Advance one tick; true when a spawn is due (the counter resets).
    fn fire(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks < SPAWN_INTERVAL_TICKS {
            return false;
        }
        self.ticks = 0;
        true
    }

    /// A timer one tick short of firing, so the next tick spawns.
    #[cfg(test)]
    pub fn at_threshold() -> Self {
        Self {
            ticks: SPAWN_INTERVAL_TICKS - 1,
        }
    }
}

/// Run the spawner for one tick.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    timer: &mut SpawnTimer,
    defeated_count: u32,
    path: &Path,
    events: &mut Vec<GameEvent>,
) {
    if !timer.fire() {
        return;
    }

    // One boss per BOSS_CADENCE defeats, never two alive at once. A due
    // boss replaces the normal spawn for this cycle.
    if defeated_count > 0 && defeated_count % BOSS_CADENCE == 0 && !boss_alive(world) {
        spawn::spawn_boss(world, path);
        events.push(GameEvent::EnemySpawned {
            hp: BOSS_HP,
            boss: true,
        });
        return;
    }

    let hp = if defeated_count >= TOUGH_SPAWN_AFTER_DEFEATS {
        rng.gen_range(TOUGH_SPAWN_HP_MIN..=TOUGH_SPAWN_HP_MAX)
    } else {
        rng.gen_range(BASIC_SPAWN_HP_MIN..=BASIC_SPAWN_HP_MAX)
    };
    spawn::spawn_enemy(world, path, hp);
    events.push(GameEvent::EnemySpawned { hp, boss: false });
}

fn boss_alive(world: &World) -> bool {
    let mut query = world.query::<&Enemy>();
    query.iter().any(|(_, enemy)| enemy.is_boss)
}
