//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Tower category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Fires homing projectiles at single targets.
    Shooter,
    /// Slows every enemy in range, by pulse or (at max level) continuously.
    Slow,
}

/// Top-level game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    /// Player health exhausted. Only `reset` leaves this state.
    GameOver,
}

/// When a slow effect lapses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum SlowExpiry {
    /// No slow active.
    #[default]
    None,
    /// Lapses once the captured tick time passes this value (seconds).
    At(f64),
    /// Never lapses on its own; held and released by a max-level slow tower.
    Permanent,
}
