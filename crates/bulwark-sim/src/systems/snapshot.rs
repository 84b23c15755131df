//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use bulwark_core::components::{Enemy, PathProgress, Pulse, SlowEffect, Tower};
use bulwark_core::constants::{upgrade_cost, MAX_PLAYER_HEALTH};
use bulwark_core::enums::{GamePhase, TowerKind};
use bulwark_core::events::GameEvent;
use bulwark_core::state::{
    EconomyView, EnemyView, GameStateSnapshot, ProjectileView, PulseView, TowerView,
};
use bulwark_core::types::{Position, SimTime};

use crate::economy::EconomyState;
use crate::projectile::Projectile;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    economy: &EconomyState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        pulses: build_pulses(world, time.elapsed_secs),
        economy: build_economy(economy),
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&Enemy, &Position, &PathProgress, &SlowEffect)>()
        .iter()
        .map(|(_, (enemy, pos, progress, slow))| EnemyView {
            position: *pos,
            hp: enemy.hp,
            max_hp: enemy.max_hp,
            is_boss: enemy.is_boss,
            progress: progress.t,
            slow_multiplier: slow.multiplier,
        })
        .collect()
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position)>()
        .iter()
        .map(|(_, (tower, pos))| TowerView {
            tower_id: tower.tower_id,
            position: *pos,
            kind: tower.kind,
            level: tower.level,
            upgrade_spent: tower.upgrade_spent,
            next_upgrade_cost: upgrade_cost(tower.kind, tower.level + 1),
            sell_refund: EconomyState::sell_refund(tower.upgrade_spent),
        })
        .collect();

    towers.sort_by_key(|t| t.tower_id);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (_, pos))| ProjectileView { position: *pos })
        .collect()
}

fn build_pulses(world: &World, now: f64) -> Vec<PulseView> {
    world
        .query::<(&Pulse, &Position)>()
        .iter()
        .map(|(_, (pulse, pos))| PulseView {
            origin: *pos,
            age_secs: now - pulse.started_at,
            duration_secs: pulse.duration_secs,
            max_radius: pulse.max_radius,
        })
        .collect()
}

fn build_economy(economy: &EconomyState) -> EconomyView {
    EconomyView {
        kill_points: economy.kill_points,
        currency: economy.currency,
        player_health: economy.player_health,
        max_health: MAX_PLAYER_HEALTH,
        defeated_count: economy.defeated_count,
        shooter_cost: economy.placement_cost(TowerKind::Shooter),
        slow_cost: economy.placement_cost(TowerKind::Slow),
    }
}
