//! Typed results of player commands.
//!
//! Commands are applied immediately on receipt, between ticks. A rejected
//! command is a no-op: the outcome says why, and state is unchanged.

use serde::{Deserialize, Serialize};

/// Result of placing a tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlaceOutcome {
    Placed { tower_id: u32 },
    /// Not enough kill points for this kind's current price.
    InsufficientKillPoints { required: u32 },
    /// On the path, overlapping another tower, or outside the play area.
    Blocked,
    /// The game has ended; only `reset` is accepted.
    GameOver,
}

/// Result of upgrading a tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UpgradeOutcome {
    Upgraded { level: u8 },
    InsufficientCurrency { required: u32 },
    /// Already at the top of its level table.
    MaxLevel,
    NoSuchTower,
    GameOver,
}

/// Result of selling a tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SellOutcome {
    /// Tower removed; `refund` currency returned (30% of upgrade spend).
    Sold { refund: u32 },
    NoSuchTower,
    GameOver,
}
