//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{SlowExpiry, TowerKind};

/// Core enemy stats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// Remaining hit points. May dip to zero or below mid-tick; the death
    /// resolver removes such enemies before the next tick's movement.
    pub hp: i32,
    pub max_hp: i32,
    pub is_boss: bool,
}

/// Normalized position along the path curve (0 = spawn, 1 = escape point).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PathProgress {
    pub t: f64,
}

/// Lateral offset from the curve position; separates split children visually.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PathOffset {
    pub dx: f64,
    pub dy: f64,
}

/// Movement slow state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlowEffect {
    /// Speed factor in (0, 1]; 1 = unslowed.
    pub multiplier: f64,
    pub expires: SlowExpiry,
}

impl Default for SlowEffect {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            expires: SlowExpiry::None,
        }
    }
}

/// A player-placed tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower {
    /// Stable id assigned at placement; commands address towers by it.
    pub tower_id: u32,
    pub kind: TowerKind,
    /// Index into the kind's level table.
    pub level: u8,
    /// Total currency spent on upgrades; determines the sale refund.
    pub upgrade_spent: u32,
}

/// Firing/pulsing cooldown. `None` means never fired: ready immediately.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cooldown {
    /// Captured tick time of the last successful shot or pulse (seconds).
    pub last_fired_at: Option<f64>,
}

/// Cosmetic expanding-ring marker for a slow-tower pulse. Carries no
/// gameplay effect; the slow itself lands synchronously when the pulse
/// fires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pulse {
    /// Captured tick time at creation (seconds).
    pub started_at: f64,
    pub duration_secs: f64,
    pub max_radius: f64,
}
