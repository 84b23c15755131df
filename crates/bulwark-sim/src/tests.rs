//! Tests for the simulation engine: determinism, spawning, escapes,
//! splitting, the economy, tower behavior, and projectile resolution.

use bulwark_core::commands::{PlaceOutcome, SellOutcome, UpgradeOutcome};
use bulwark_core::enums::{GamePhase, TowerKind};
use bulwark_core::types::Position;
use hecs::World;

use crate::engine::{GameEngine, SimConfig};
use crate::projectile::{Projectile, ProjectileTarget};
use crate::systems;

// Probed spots near the path midpoint (~(400, 249) at t = 0.5): close
// enough to fire on passing enemies, far enough to be buildable.
const SPOT_A: (f64, f64) = (400.0, 330.0);
const SPOT_B: (f64, f64) = (360.0, 320.0);
// Buildable spots far from the route.
const SPOT_C: (f64, f64) = (700.0, 480.0);
const SPOT_D: (f64, f64) = (100.0, 400.0);
// A point on the route itself.
const ON_PATH: (f64, f64) = (400.0, 249.0);

fn engine() -> GameEngine {
    GameEngine::new(SimConfig::default())
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = GameEngine::new(SimConfig { seed: 12345 });
    let mut engine_b = GameEngine::new(SimConfig { seed: 12345 });

    assert!(matches!(
        engine_a.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1),
        PlaceOutcome::Placed { .. }
    ));
    assert!(matches!(
        engine_b.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1),
        PlaceOutcome::Placed { .. }
    ));

    for _ in 0..600 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = GameEngine::new(SimConfig { seed: 111 });
    let mut engine_b = GameEngine::new(SimConfig { seed: 222 });

    // Spawn hp rolls differ between seeds; once enemies start escaping,
    // the splash cascade amplifies any difference.
    let mut diverged = false;
    for _ in 0..2000 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Spawning ----

#[test]
fn test_spawn_cadence() {
    let mut engine = engine();

    for _ in 0..199 {
        let snap = engine.tick();
        assert!(snap.enemies.is_empty(), "No spawn before the interval");
    }

    let snap = engine.tick();
    assert_eq!(snap.enemies.len(), 1, "One enemy on the 200th tick");
    let enemy = &snap.enemies[0];
    assert!(!enemy.is_boss);
    assert!((3..=7).contains(&enemy.max_hp), "early hp band is 3..=7");
    assert_eq!(enemy.hp, enemy.max_hp);
}

#[test]
fn test_boss_cadence_spawns_boss() {
    let mut engine = engine();
    engine.economy_mut().defeated_count = 25;
    engine.prime_spawn();

    let snap = engine.tick();
    assert_eq!(snap.enemies.len(), 1);
    assert!(snap.enemies[0].is_boss);
    assert_eq!(snap.enemies[0].hp, 50);
    assert_eq!(snap.enemies[0].max_hp, 50);
}

#[test]
fn test_no_second_boss_while_one_alive() {
    let mut engine = engine();
    engine.economy_mut().defeated_count = 25;
    engine.spawn_enemy_at(0.5, 50, 50, true);
    engine.prime_spawn();

    let snap = engine.tick();
    assert_eq!(snap.enemies.len(), 2);
    let bosses = snap.enemies.iter().filter(|e| e.is_boss).count();
    assert_eq!(bosses, 1, "a due boss must not double up");
}

// ---- Escapes ----

#[test]
fn test_escape_rewards() {
    let mut engine = engine();
    engine.spawn_enemy_at(0.9999, 9, 9, false);

    let snap = engine.tick();
    assert!(snap.enemies.is_empty(), "escapee leaves the world");

    let economy = engine.economy();
    assert_eq!(economy.defeated_count, 1);
    assert_eq!(economy.kill_points, 1);
    assert_eq!(economy.currency, 0, "escapes pay no currency");
    assert_eq!(economy.player_health, 30 - 5, "damage = ceil(9/2)");
}

#[test]
fn test_escape_splash_is_uniform() {
    let mut engine = engine();
    engine.spawn_enemy_at(0.9999, 9, 9, false);
    engine.spawn_enemy_at(0.5, 20, 20, false);
    engine.spawn_enemy_at(0.3, 3, 7, false);

    let snap = engine.tick();

    // ceil(9/2) = 5 splashed onto both bystanders: the tough one survives
    // at 15, the small one dies and pays out.
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.enemies[0].hp, 15);

    let economy = engine.economy();
    assert_eq!(economy.player_health, 25);
    assert_eq!(economy.defeated_count, 2, "escape + splash casualty");
    assert_eq!(economy.kill_points, 2);
    assert_eq!(economy.currency, 2, "splash kill is rewarded by tier");
}

#[test]
fn test_splash_kill_splits_by_max_hp() {
    let mut engine = engine();
    engine.spawn_enemy_at(0.9999, 9, 9, false);
    // Nearly dead, but its max hp qualifies it to split; children derive
    // from max hp, not from the hp it died with.
    engine.spawn_enemy_at(0.5, 2, 20, false);

    let snap = engine.tick();

    assert_eq!(snap.enemies.len(), 2, "the casualty split into two");
    for child in &snap.enemies {
        assert_eq!(child.hp, 5, "child hp = ceil(20/4)");
        assert_eq!(child.max_hp, 5);
        assert!(!child.is_boss);
    }
    assert_eq!(engine.economy().currency, 3);
}

// ---- Deaths & splitting ----

#[test]
fn test_boss_split() {
    let mut engine = engine();
    engine.spawn_enemy_at(0.5, 0, 50, true);

    let snap = engine.tick();

    assert_eq!(snap.enemies.len(), 3, "a dead boss spawns three children");
    for child in &snap.enemies {
        assert_eq!(child.hp, 5);
        assert_eq!(child.max_hp, 5);
        assert!(!child.is_boss);
    }

    let economy = engine.economy();
    assert_eq!(economy.defeated_count, 1);
    assert_eq!(economy.kill_points, 1);
    assert_eq!(economy.currency, 7);
}

#[test]
fn test_tough_enemy_split() {
    let mut engine = engine();
    engine.spawn_enemy_at(0.5, 0, 20, false);

    let snap = engine.tick();

    assert_eq!(snap.enemies.len(), 2);
    for child in &snap.enemies {
        assert_eq!(child.hp, 5);
        assert_eq!(child.max_hp, 5);
    }
    assert_eq!(engine.economy().currency, 3);
}

#[test]
fn test_low_tier_never_splits() {
    let mut engine = engine();
    engine.spawn_enemy_at(0.5, 0, 7, false);

    let snap = engine.tick();

    assert!(snap.enemies.is_empty());
    assert_eq!(engine.economy().currency, 2);
}

#[test]
fn test_dead_enemy_removed_within_a_tick() {
    let mut engine = engine();
    let enemy = engine.spawn_enemy_at(0.5, 5, 5, false);

    let snap = engine.tick();
    assert_eq!(snap.enemies.len(), 1);

    engine.damage_enemy(enemy, 10);
    let snap = engine.tick();
    assert!(
        snap.enemies.is_empty(),
        "hp <= 0 never survives the next resolved tick"
    );
    assert_eq!(engine.economy().defeated_count, 1);
}

// ---- Placement ----

#[test]
fn test_shooter_placement_cost_schedule() {
    let mut engine = engine();

    // First shooter is free.
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1),
        PlaceOutcome::Placed { tower_id: 0 }
    );
    // Second costs 2 kill points.
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, SPOT_C.0, SPOT_C.1),
        PlaceOutcome::InsufficientKillPoints { required: 2 }
    );

    engine.economy_mut().kill_points = 5;
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, SPOT_C.0, SPOT_C.1),
        PlaceOutcome::Placed { tower_id: 1 }
    );
    assert_eq!(engine.economy().kill_points, 3);
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, SPOT_D.0, SPOT_D.1),
        PlaceOutcome::Placed { tower_id: 2 }
    );
    assert_eq!(engine.economy().kill_points, 0);
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, SPOT_B.0, SPOT_B.1),
        PlaceOutcome::InsufficientKillPoints { required: 4 }
    );
}

#[test]
fn test_slow_placement_cost_schedule() {
    let mut engine = engine();
    engine.economy_mut().kill_points = 11;

    assert_eq!(
        engine.place_tower(TowerKind::Slow, SPOT_A.0, SPOT_A.1),
        PlaceOutcome::Placed { tower_id: 0 }
    );
    assert_eq!(engine.economy().kill_points, 6);
    assert_eq!(
        engine.place_tower(TowerKind::Slow, SPOT_C.0, SPOT_C.1),
        PlaceOutcome::Placed { tower_id: 1 }
    );
    assert_eq!(engine.economy().kill_points, 0);
    assert_eq!(
        engine.place_tower(TowerKind::Slow, SPOT_D.0, SPOT_D.1),
        PlaceOutcome::InsufficientKillPoints { required: 7 }
    );
}

#[test]
fn test_placement_blocking() {
    let mut engine = engine();

    // Blocking is checked before cost: no kill points, still Blocked.
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, ON_PATH.0, ON_PATH.1),
        PlaceOutcome::Blocked
    );

    assert!(matches!(
        engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1),
        PlaceOutcome::Placed { .. }
    ));
    // Overlapping the placed tower's footprint.
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, SPOT_A.0 + 10.0, SPOT_A.1),
        PlaceOutcome::Blocked
    );

    // Outside the play area.
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, -10.0, 100.0),
        PlaceOutcome::Blocked
    );
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, 850.0, 100.0),
        PlaceOutcome::Blocked
    );
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, 400.0, 550.0),
        PlaceOutcome::Blocked
    );
}

#[test]
fn test_point_queries() {
    let mut engine = engine();

    assert!(engine.is_point_on_path(ON_PATH.0, ON_PATH.1));
    assert!(!engine.is_point_on_path(SPOT_A.0, SPOT_A.1));
    assert!(!engine.is_point_on_path(SPOT_C.0, SPOT_C.1));

    assert!(!engine.is_point_on_tower(SPOT_A.0, SPOT_A.1));
    engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1);
    assert!(engine.is_point_on_tower(SPOT_A.0 + 5.0, SPOT_A.1 + 5.0));
    assert!(!engine.is_point_on_tower(SPOT_A.0 + 50.0, SPOT_A.1));
}

// ---- Shooter towers ----

#[test]
fn test_shooter_fires_with_cooldown() {
    let mut engine = engine();
    engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1);
    engine.spawn_enemy_at(0.5, 10, 10, false);

    let snap = engine.tick();
    assert_eq!(snap.projectiles.len(), 1, "fires on the first tick");

    let snap = engine.tick();
    assert_eq!(snap.projectiles.len(), 1, "cooldown holds the second shot");

    // The enemy stays in range long enough for exactly one follow-up shot
    // (~0.5s later) before walking out of the tower's reach. Both shots
    // land; no third is fired.
    for _ in 0..200 {
        engine.tick();
    }
    let snap = engine.tick();
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.enemies[0].hp, 8, "two hits of one point each");
    assert!(snap.projectiles.is_empty());
}

#[test]
fn test_no_target_no_cooldown() {
    let mut engine = engine();
    engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1);

    for _ in 0..10 {
        let snap = engine.tick();
        assert!(snap.projectiles.is_empty(), "nothing in range, no shot");
    }

    // A failed attempt did not start the cooldown: the tower fires the
    // very tick a target appears.
    engine.spawn_enemy_at(0.5, 10, 10, false);
    let snap = engine.tick();
    assert_eq!(snap.projectiles.len(), 1);
}

#[test]
fn test_projectile_retargets_when_enemy_dies() {
    let mut engine = engine();
    engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1);
    let enemy = engine.spawn_enemy_at(0.5, 7, 7, false);

    let snap = engine.tick();
    assert_eq!(snap.projectiles.len(), 1);

    engine.damage_enemy(enemy, 20);
    let snap = engine.tick();
    assert!(snap.enemies.is_empty());
    assert_eq!(
        snap.projectiles.len(),
        1,
        "the in-flight shot now flies to a fixed impact point"
    );

    for _ in 0..40 {
        engine.tick();
    }
    let snap = engine.tick();
    assert!(
        snap.projectiles.is_empty(),
        "the cosmetic miss lands and is removed"
    );
    assert_eq!(engine.economy().defeated_count, 1);
}

#[test]
fn test_orphaned_projectile_is_dropped() {
    let mut world = World::new();
    let ghost = world.spawn((Position::new(0.0, 0.0),));
    world.despawn(ghost).unwrap();

    // Tracking a despawned entity with no fixed point ever assigned.
    world.spawn((
        Projectile {
            speed: 180.0,
            target: ProjectileTarget::Tracking(ghost),
        },
        Position::new(10.0, 10.0),
    ));

    let mut buffer = Vec::new();
    systems::projectiles::run(&mut world, &mut buffer);

    let remaining = {
        let mut query = world.query::<&Projectile>();
        query.iter().count()
    };
    assert_eq!(remaining, 0, "orphan dropped as a recovery no-op");
}

// ---- Slow towers ----

#[test]
fn test_slow_pulse_applies_and_lapses() {
    let mut engine = engine();
    engine.economy_mut().kill_points = 5;
    engine.place_tower(TowerKind::Slow, SPOT_A.0, SPOT_A.1);
    engine.spawn_enemy_at(0.5, 10, 10, false);

    let snap = engine.tick();
    assert_eq!(snap.pulses.len(), 1, "pulse record created");
    assert!((snap.enemies[0].slow_multiplier - 0.70).abs() < 1e-9);

    for _ in 0..48 {
        engine.tick();
    }
    let snap = engine.tick();
    assert!(snap.pulses.is_empty(), "pulse ring expires after 0.8s");
    // The enemy has walked out of range by now, but the 2-second slow is
    // duration-gated, not range-gated.
    assert!((snap.enemies[0].slow_multiplier - 0.70).abs() < 1e-9);

    for _ in 0..79 {
        engine.tick();
    }
    let snap = engine.tick();
    assert!(
        (snap.enemies[0].slow_multiplier - 1.0).abs() < 1e-9,
        "timed slow lapsed"
    );
}

#[test]
fn test_permanent_slow_holds_and_releases() {
    let mut engine = engine();
    engine.economy_mut().kill_points = 5;
    engine.place_tower(TowerKind::Slow, SPOT_A.0, SPOT_A.1);
    engine.economy_mut().currency = 90;
    assert_eq!(engine.upgrade_tower(0), UpgradeOutcome::Upgraded { level: 1 });
    assert_eq!(engine.upgrade_tower(0), UpgradeOutcome::Upgraded { level: 2 });
    assert_eq!(engine.upgrade_tower(0), UpgradeOutcome::Upgraded { level: 3 });

    let enemy = engine.spawn_enemy_at(0.5, 10, 10, false);
    let snap = engine.tick();
    assert!((snap.enemies[0].slow_multiplier - 0.675).abs() < 1e-9);

    // Teleport out of range: the permanent slow is released.
    engine.set_enemy_progress(enemy, 0.9);
    let snap = engine.tick();
    assert!((snap.enemies[0].slow_multiplier - 1.0).abs() < 1e-9);

    // Back in range: held again.
    engine.set_enemy_progress(enemy, 0.5);
    let snap = engine.tick();
    assert!((snap.enemies[0].slow_multiplier - 0.675).abs() < 1e-9);
}

#[test]
fn test_slow_application_is_last_writer_wins() {
    let mut engine = engine();
    engine.economy_mut().kill_points = 11;
    engine.place_tower(TowerKind::Slow, SPOT_A.0, SPOT_A.1);
    engine.place_tower(TowerKind::Slow, SPOT_B.0, SPOT_B.1);
    engine.economy_mut().currency = 10;
    assert_eq!(engine.upgrade_tower(1), UpgradeOutcome::Upgraded { level: 1 });

    // Both towers cover the enemy and pulse on the same tick; the later
    // tower's 35% slow overwrites the earlier 30% one.
    engine.spawn_enemy_at(0.5, 10, 10, false);
    let snap = engine.tick();
    assert!((snap.enemies[0].slow_multiplier - 0.65).abs() < 1e-9);
}

// ---- Upgrades & selling ----

#[test]
fn test_upgrade_and_sell_economy() {
    let mut engine = engine();
    engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1);

    assert_eq!(
        engine.upgrade_tower(0),
        UpgradeOutcome::InsufficientCurrency { required: 20 }
    );

    engine.economy_mut().currency = 220;
    assert_eq!(engine.upgrade_tower(0), UpgradeOutcome::Upgraded { level: 1 });
    assert_eq!(engine.upgrade_tower(0), UpgradeOutcome::Upgraded { level: 2 });
    assert_eq!(engine.upgrade_tower(0), UpgradeOutcome::Upgraded { level: 3 });
    assert_eq!(engine.economy().currency, 0);
    assert_eq!(engine.upgrade_tower(0), UpgradeOutcome::MaxLevel);

    // floor(0.3 * 220) = 66.
    assert_eq!(engine.sell_tower(0), SellOutcome::Sold { refund: 66 });
    assert_eq!(engine.economy().currency, 66);

    assert_eq!(engine.sell_tower(0), SellOutcome::NoSuchTower);
    assert_eq!(engine.upgrade_tower(0), UpgradeOutcome::NoSuchTower);
}

#[test]
fn test_sell_unupgraded_refunds_zero() {
    let mut engine = engine();
    engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1);

    assert_eq!(engine.sell_tower(0), SellOutcome::Sold { refund: 0 });
    assert_eq!(engine.economy().currency, 0);
}

#[test]
fn test_tower_views_carry_shop_info() {
    let mut engine = engine();
    engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1);
    engine.economy_mut().currency = 20;
    engine.upgrade_tower(0);

    let snap = engine.tick();
    let tower = &snap.towers[0];
    assert_eq!(tower.level, 1);
    assert_eq!(tower.upgrade_spent, 20);
    assert_eq!(tower.next_upgrade_cost, Some(50));
    assert_eq!(tower.sell_refund, 6);

    assert_eq!(snap.economy.shooter_cost, 2, "second shooter costs 2");
    assert_eq!(snap.economy.slow_cost, 5);
}

// ---- Game over & reset ----

#[test]
fn test_game_over_halts_simulation() {
    let mut engine = engine();
    engine.economy_mut().player_health = 3;
    engine.spawn_enemy_at(0.9999, 9, 9, false);

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(engine.economy().player_health, -2);
    assert_eq!(engine.time().tick, 1);

    // Frozen: no further ticks simulate, no commands are accepted.
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 1);
    assert_eq!(
        engine.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1),
        PlaceOutcome::GameOver
    );
    assert_eq!(engine.upgrade_tower(0), UpgradeOutcome::GameOver);
    assert_eq!(engine.sell_tower(0), SellOutcome::GameOver);

    engine.reset();
    assert_eq!(engine.phase(), GamePhase::Running);
    assert_eq!(engine.economy().player_health, 30);
    assert_eq!(engine.time().tick, 0);
}

#[test]
fn test_reset_round_trip() {
    let mut engine_a = GameEngine::new(SimConfig { seed: 7 });
    engine_a.place_tower(TowerKind::Shooter, SPOT_A.0, SPOT_A.1);
    for _ in 0..400 {
        engine_a.tick();
    }
    engine_a.reset();

    assert_eq!(engine_a.economy().defeated_count, 0);
    assert_eq!(engine_a.economy().kill_points, 0);
    assert_eq!(engine_a.economy().currency, 0);

    // A reset engine replays exactly like a fresh one with the same seed.
    let mut engine_b = GameEngine::new(SimConfig { seed: 7 });
    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b);
    }
}

// ---- Movement & path ----

#[test]
fn test_movement_progress_rate() {
    let mut engine = engine();
    engine.spawn_enemy_at(0.0, 5, 5, false);

    for _ in 0..99 {
        engine.tick();
    }
    let snap = engine.tick();
    assert_eq!(snap.enemies.len(), 1);
    assert!(
        (snap.enemies[0].progress - 0.2).abs() < 1e-9,
        "100 ticks at 0.002/tick"
    );
}

#[test]
fn test_path_endpoints() {
    let path = crate::path::Path::new();

    let start = path.position_at(0.0);
    assert!((start.x - -100.0).abs() < 1e-12);
    assert!((start.y - 200.0).abs() < 1e-12);

    let end = path.position_at(1.0);
    assert!((end.x - 900.0).abs() < 1e-12);
    assert!((end.y - 200.0).abs() < 1e-12);

    let mid = path.position_at(0.5);
    assert!((mid.x - 400.0).abs() < 1e-9);
    assert!((mid.y - 248.75).abs() < 1e-9);
}

// ---- Resolver arithmetic ----

#[test]
fn test_escape_damage_rounding() {
    use crate::systems::resolver::escape_damage;

    assert_eq!(escape_damage(9), 5);
    assert_eq!(escape_damage(8), 4);
    assert_eq!(escape_damage(1), 1);
    assert_eq!(escape_damage(0), 0);
}

#[test]
fn test_split_child_hp_rounding() {
    use crate::systems::resolver::div_ceil;

    assert_eq!(div_ceil(20, 4), 5);
    assert_eq!(div_ceil(10, 4), 3);
    assert_eq!(div_ceil(13, 4), 4);
    assert_eq!(div_ceil(16, 4), 4);
}
