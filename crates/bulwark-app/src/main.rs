//! Headless demo runner: builds a small defense along the route, lets the
//! simulation run, and reports how it holds up.
//!
//! ```text
//! bulwark [--ticks N] [--seed S]
//! ```

use bulwark_core::commands::{PlaceOutcome, UpgradeOutcome};
use bulwark_core::constants::TOWER_RANGE;
use bulwark_core::enums::{GamePhase, TowerKind};
use bulwark_core::events::GameEvent;
use bulwark_core::types::Position;
use bulwark_sim::engine::{GameEngine, SimConfig};
use tracing::{info, warn};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut ticks: u64 = 7200;
    let mut seed: u64 = 42;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ticks" => {
                if let Some(value) = iter.next() {
                    ticks = value.parse().unwrap_or(ticks);
                }
            }
            "--seed" => {
                if let Some(value) = iter.next() {
                    seed = value.parse().unwrap_or(seed);
                }
            }
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }

    let mut engine = GameEngine::new(SimConfig { seed });
    let spots = buildable_spots(&engine);
    info!(seed, ticks, candidate_spots = spots.len(), "starting run");

    let mut next_spot = 0;
    let mut placed = 0u32;

    for _ in 0..ticks {
        let snapshot = engine.tick();

        for event in &snapshot.events {
            match event {
                GameEvent::EnemySpawned { hp, boss: true } => info!(hp, "boss inbound"),
                GameEvent::EnemyEscaped { damage } => warn!(damage, "enemy escaped"),
                GameEvent::GameOver { defeated_count } => {
                    warn!(defeated_count, "player health exhausted");
                }
                _ => {}
            }
        }

        // Spend kill points greedily; every third tower is a slow tower.
        while next_spot < spots.len() {
            let kind = if placed % 3 == 2 {
                TowerKind::Slow
            } else {
                TowerKind::Shooter
            };
            let (x, y) = spots[next_spot];
            match engine.place_tower(kind, x, y) {
                PlaceOutcome::Placed { tower_id } => {
                    info!(tower_id, ?kind, x, y, "tower placed");
                    next_spot += 1;
                    placed += 1;
                }
                PlaceOutcome::Blocked => next_spot += 1,
                _ => break,
            }
        }

        // Upgrade whatever currency allows, oldest tower first.
        let mut currency = snapshot.economy.currency;
        for tower in &snapshot.towers {
            if let Some(cost) = tower.next_upgrade_cost {
                if cost <= currency {
                    if let UpgradeOutcome::Upgraded { level } = engine.upgrade_tower(tower.tower_id)
                    {
                        info!(tower_id = tower.tower_id, level, "tower upgraded");
                        currency -= cost;
                    }
                }
            }
        }

        if snapshot.phase == GamePhase::GameOver {
            break;
        }
    }

    let last = engine.tick();
    info!(
        tick = last.time.tick,
        defeated = last.economy.defeated_count,
        health = last.economy.player_health,
        towers = last.towers.len(),
        phase = ?last.phase,
        "run complete"
    );
}

/// Probe a coarse grid for spots that are buildable and within firing
/// range of the route.
fn buildable_spots(engine: &GameEngine) -> Vec<(f64, f64)> {
    let mut spots = Vec::new();
    let mut y = 50.0;
    while y < 500.0 {
        let mut x = 50.0;
        while x < 800.0 {
            if !engine.is_point_on_path(x, y) && covers_path(engine, x, y) {
                spots.push((x, y));
            }
            x += 60.0;
        }
        y += 60.0;
    }
    spots
}

/// True when `(x, y)` is within tower range of some sample of the route.
fn covers_path(engine: &GameEngine, x: f64, y: f64) -> bool {
    let point = Position::new(x, y);
    let mut t = 0.0;
    while t <= 1.0 {
        if engine.path().position_at(t).distance_to(&point) <= TOWER_RANGE {
            return true;
        }
        t += 0.05;
    }
    false
}
