//! Events emitted by the simulation for UI and log feedback.

use serde::{Deserialize, Serialize};

use crate::enums::TowerKind;

/// One tick's notable happenings, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemySpawned {
        hp: i32,
        boss: bool,
    },
    /// An enemy was defeated (not escaped) and its currency paid out.
    EnemyKilled {
        boss: bool,
        currency_award: u32,
    },
    /// A defeated enemy split into children.
    EnemySplit {
        children: u32,
        child_hp: i32,
    },
    /// An enemy reached the end of the path; `damage` hit the player and
    /// splashed every other live enemy.
    EnemyEscaped {
        damage: i32,
    },
    TowerPlaced {
        tower_id: u32,
        kind: TowerKind,
    },
    TowerUpgraded {
        tower_id: u32,
        level: u8,
    },
    TowerSold {
        tower_id: u32,
        refund: u32,
    },
    GameOver {
        defeated_count: u32,
    },
}
