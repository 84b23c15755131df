//! Entity spawn factories for enemies, split children, and towers.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bulwark_core::components::{Cooldown, Enemy, PathOffset, PathProgress, SlowEffect, Tower};
use bulwark_core::constants::BOSS_HP;
use bulwark_core::enums::TowerKind;
use bulwark_core::types::Position;

use crate::path::Path;

/// Spawn a normal enemy at the path start with the given hit points.
pub fn spawn_enemy(world: &mut World, path: &Path, hp: i32) -> Entity {
    spawn_at(world, path, 0.0, 0.0, 0.0, hp, false)
}

/// Spawn the boss at the path start.
pub fn spawn_boss(world: &mut World, path: &Path) -> Entity {
    spawn_at(world, path, 0.0, 0.0, 0.0, BOSS_HP, true)
}

/// Spawn a split child at the parent's death progress, laterally offset
/// by `dx` with a vertical jitter drawn from `±jitter_span / 2`.
pub fn spawn_split_child(
    world: &mut World,
    path: &Path,
    rng: &mut ChaCha8Rng,
    t: f64,
    dx: f64,
    jitter_span: f64,
    hp: i32,
) -> Entity {
    let dy = (rng.gen::<f64>() - 0.5) * jitter_span;
    spawn_at(world, path, t, dx, dy, hp, false)
}

fn spawn_at(
    world: &mut World,
    path: &Path,
    t: f64,
    dx: f64,
    dy: f64,
    hp: i32,
    is_boss: bool,
) -> Entity {
    let base = path.position_at(t);
    world.spawn((
        Enemy {
            hp,
            max_hp: hp,
            is_boss,
        },
        PathProgress { t },
        PathOffset { dx, dy },
        SlowEffect::default(),
        Position::new(base.x + dx, base.y + dy),
    ))
}

/// Spawn a tower of `kind` at `(x, y)`: level 0, nothing invested, ready
/// to fire.
pub fn spawn_tower(world: &mut World, tower_id: u32, kind: TowerKind, x: f64, y: f64) -> Entity {
    world.spawn((
        Tower {
            tower_id,
            kind,
            level: 0,
            upgrade_spent: 0,
        },
        Position::new(x, y),
        Cooldown::default(),
    ))
}
