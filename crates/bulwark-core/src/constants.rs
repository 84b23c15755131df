//! Simulation constants and tuning tables.

use crate::enums::TowerKind;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Play field ---

/// Buildable field width in pixels.
pub const PLAY_AREA_WIDTH: f64 = 800.0;

/// Buildable field height in pixels.
pub const PLAY_AREA_HEIGHT: f64 = 500.0;

// --- Path ---

/// Control points of the fixed cubic Bézier route, spawn to escape.
/// The endpoints sit outside the visible field so enemies enter and
/// leave off-screen.
pub const PATH_CONTROL_POINTS: [(f64, f64); 4] = [
    (-100.0, 200.0),
    (200.0, 100.0),
    (600.0, 430.0),
    (900.0, 200.0),
];

/// Distance within which a point counts as "on the path" (pixels).
pub const PATH_PROXIMITY: f64 = 30.0;

/// Parameter step used when sampling the curve for proximity checks.
pub const PATH_SAMPLE_STEP: f64 = 0.01;

// --- Enemies ---

/// Base speed along the path, in curve fraction per second (0.002/tick).
pub const BASE_ENEMY_SPEED: f64 = 0.12;

/// Ticks between scheduled spawns.
pub const SPAWN_INTERVAL_TICKS: u64 = 200;

/// One boss per this many defeated enemies, never two at once.
pub const BOSS_CADENCE: u32 = 25;

/// Boss hit points.
pub const BOSS_HP: i32 = 50;

/// Defeats after which normal spawns switch to the tougher hp band.
pub const TOUGH_SPAWN_AFTER_DEFEATS: u32 = 10;

/// Normal spawn hp band before the switch (inclusive).
pub const BASIC_SPAWN_HP_MIN: i32 = 3;
pub const BASIC_SPAWN_HP_MAX: i32 = 7;

/// Normal spawn hp band after the switch (inclusive).
pub const TOUGH_SPAWN_HP_MIN: i32 = 10;
pub const TOUGH_SPAWN_HP_MAX: i32 = 20;

/// Max hp at or above which an enemy is tough-tier: worth more currency
/// and splits into children when it dies.
pub const TOUGH_ENEMY_MIN_MAX_HP: i32 = 10;

// --- Splitting ---

/// Children spawned by a dying boss.
pub const BOSS_SPLIT_COUNT: u32 = 3;

/// Hit points of each boss child.
pub const BOSS_CHILD_HP: i32 = 5;

/// Lateral spacing between boss children (pixels).
pub const BOSS_CHILD_SPACING: f64 = 40.0;

/// Vertical jitter span for boss children (pixels, centered on the path).
pub const BOSS_CHILD_JITTER: f64 = 30.0;

/// Children spawned by a dying tough-tier enemy.
pub const SPLIT_CHILD_COUNT: u32 = 2;

/// Lateral offset of each tough-tier child (pixels, mirrored).
pub const SPLIT_CHILD_OFFSET: f64 = 20.0;

/// Vertical jitter span for tough-tier children (pixels).
pub const SPLIT_CHILD_JITTER: f64 = 20.0;

/// Tough-tier children get ceil(parent max hp / this).
pub const SPLIT_HP_DIVISOR: i32 = 4;

// --- Currency rewards ---

pub const CURRENCY_BOSS: u32 = 7;
pub const CURRENCY_TOUGH: u32 = 3;
pub const CURRENCY_BASIC: u32 = 2;

// --- Towers ---

/// Targeting / slow-field radius (pixels), shared by both tower kinds.
pub const TOWER_RANGE: f64 = 100.0;

/// Tower footprint radius (pixels); placements closer than twice this
/// to an existing tower are blocked.
pub const TOWER_RADIUS: f64 = 15.0;

/// Projectile flight speed (px/s, 3 px per tick).
pub const PROJECTILE_SPEED: f64 = 180.0;

/// Kill-point base price of a slow tower; climbs by one per purchase.
pub const SLOW_BASE_COST: u32 = 5;

/// Sell refund fraction of cumulative upgrade spend (numerator/denominator).
pub const SELL_REFUND_NUM: u32 = 3;
pub const SELL_REFUND_DEN: u32 = 10;

/// Jitter span applied to a retargeted projectile's impact point (pixels).
pub const RETARGET_JITTER: f64 = 10.0;

// --- Pulses ---

/// Lifetime of the cosmetic pulse ring spawned by a slow-tower pulse.
pub const PULSE_DURATION_SECS: f64 = 0.8;

// --- Player ---

pub const MAX_PLAYER_HEALTH: i32 = 30;

// --- Level tables ---

/// Per-level tuning for shooter towers.
#[derive(Debug, Clone, Copy)]
pub struct ShooterLevelSpec {
    /// Minimum seconds between shots.
    pub fire_interval_secs: f64,
    /// Currency cost to reach this level (level 0 is the placement level).
    pub upgrade_cost: u32,
}

pub const SHOOTER_LEVELS: [ShooterLevelSpec; 4] = [
    ShooterLevelSpec {
        fire_interval_secs: 0.5,
        upgrade_cost: 0,
    },
    ShooterLevelSpec {
        fire_interval_secs: 0.4,
        upgrade_cost: 20,
    },
    ShooterLevelSpec {
        fire_interval_secs: 0.2,
        upgrade_cost: 50,
    },
    ShooterLevelSpec {
        fire_interval_secs: 0.075,
        upgrade_cost: 150,
    },
];

/// Per-level tuning for slow towers.
#[derive(Debug, Clone, Copy)]
pub struct SlowLevelSpec {
    /// Seconds between pulses. Unused at the permanent level.
    pub cooldown_secs: f64,
    /// Fraction of speed removed; enemies move at `1 - slow_pct`.
    pub slow_pct: f64,
    /// Pulse effect duration in seconds; `None` marks the permanent level,
    /// which holds enemies continuously instead of pulsing.
    pub duration_secs: Option<f64>,
    /// Currency cost to reach this level.
    pub upgrade_cost: u32,
}

pub const SLOW_LEVELS: [SlowLevelSpec; 4] = [
    SlowLevelSpec {
        cooldown_secs: 5.0,
        slow_pct: 0.30,
        duration_secs: Some(2.0),
        upgrade_cost: 0,
    },
    SlowLevelSpec {
        cooldown_secs: 2.5,
        slow_pct: 0.35,
        duration_secs: Some(2.0),
        upgrade_cost: 10,
    },
    SlowLevelSpec {
        cooldown_secs: 1.5,
        slow_pct: 0.37,
        duration_secs: Some(2.0),
        upgrade_cost: 30,
    },
    SlowLevelSpec {
        cooldown_secs: 0.0,
        slow_pct: 0.325,
        duration_secs: None,
        upgrade_cost: 50,
    },
];

/// Currency cost to reach `level` for a tower of `kind`; `None` past max.
pub fn upgrade_cost(kind: TowerKind, level: u8) -> Option<u32> {
    match kind {
        TowerKind::Shooter => SHOOTER_LEVELS.get(level as usize).map(|s| s.upgrade_cost),
        TowerKind::Slow => SLOW_LEVELS.get(level as usize).map(|s| s.upgrade_cost),
    }
}
