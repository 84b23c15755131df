//! Game state snapshot — the complete visible state produced each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, TowerKind};
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete read-only state handed to the presentation layer after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub pulses: Vec<PulseView>,
    pub economy: EconomyView,
    /// Events that occurred since the previous snapshot.
    pub events: Vec<GameEvent>,
}

/// A live enemy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub is_boss: bool,
    /// Path parameter, 0 = spawn, 1 = escape point.
    pub progress: f64,
    /// Current speed factor; below 1 while slowed.
    pub slow_multiplier: f64,
}

/// A placed tower, including the hover info the input layer displays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TowerView {
    pub tower_id: u32,
    pub position: Position,
    pub kind: TowerKind,
    pub level: u8,
    pub upgrade_spent: u32,
    /// Currency price of the next level; `None` at max level.
    pub next_upgrade_cost: Option<u32>,
    /// Currency returned if sold right now.
    pub sell_refund: u32,
}

/// An in-flight projectile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
}

/// A cosmetic slow-pulse ring.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PulseView {
    pub origin: Position,
    /// Seconds since the pulse fired.
    pub age_secs: f64,
    pub duration_secs: f64,
    pub max_radius: f64,
}

/// Resource counters and the prices the shop displays.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub kill_points: u32,
    pub currency: u32,
    pub player_health: i32,
    pub max_health: i32,
    pub defeated_count: u32,
    /// Kill-point price of the next shooter tower.
    pub shooter_cost: u32,
    /// Kill-point price of the next slow tower.
    pub slow_cost: u32,
}
