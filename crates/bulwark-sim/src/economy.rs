//! The two-currency economy: kill points buy towers, currency buys
//! upgrades.

use bulwark_core::constants::{
    CURRENCY_BASIC, CURRENCY_BOSS, CURRENCY_TOUGH, MAX_PLAYER_HEALTH, SELL_REFUND_DEN,
    SELL_REFUND_NUM, SLOW_BASE_COST, TOUGH_ENEMY_MIN_MAX_HP,
};
use bulwark_core::enums::TowerKind;

/// Resource counters owned by the engine.
#[derive(Debug, Clone)]
pub struct EconomyState {
    /// Earned 1 per defeated or escaped enemy; spent on tower placement.
    pub kill_points: u32,
    /// Earned per kill by enemy tier; spent on upgrades, partially
    /// refunded on sale. Escapes pay nothing.
    pub currency: u32,
    /// May go negative on the tick the game ends.
    pub player_health: i32,
    /// Total defeated + escaped enemies; drives boss cadence and the
    /// spawn hp tiers.
    pub defeated_count: u32,
    /// Purchase counters per tower kind; drive the escalating price.
    pub shooter_bought: u32,
    pub slow_bought: u32,
}

impl Default for EconomyState {
    fn default() -> Self {
        Self::new()
    }
}

impl EconomyState {
    pub fn new() -> Self {
        Self {
            kill_points: 0,
            currency: 0,
            player_health: MAX_PLAYER_HEALTH,
            defeated_count: 0,
            shooter_bought: 0,
            slow_bought: 0,
        }
    }

    /// Kill-point price of the next tower of `kind`. The first shooter is
    /// free; afterwards each purchase raises the price by one.
    pub fn placement_cost(&self, kind: TowerKind) -> u32 {
        match kind {
            TowerKind::Shooter => {
                if self.shooter_bought == 0 {
                    0
                } else {
                    self.shooter_bought + 1
                }
            }
            TowerKind::Slow => SLOW_BASE_COST + self.slow_bought,
        }
    }

    /// Deduct `cost` kill points and bump the purchase counter for `kind`.
    pub fn record_purchase(&mut self, kind: TowerKind, cost: u32) {
        self.kill_points -= cost;
        match kind {
            TowerKind::Shooter => self.shooter_bought += 1,
            TowerKind::Slow => self.slow_bought += 1,
        }
    }

    /// Currency paid for defeating an enemy of the given tier.
    pub fn kill_reward(is_boss: bool, max_hp: i32) -> u32 {
        if is_boss {
            CURRENCY_BOSS
        } else if max_hp >= TOUGH_ENEMY_MIN_MAX_HP {
            CURRENCY_TOUGH
        } else {
            CURRENCY_BASIC
        }
    }

    /// Record a defeated enemy: counters plus tiered currency.
    /// Returns the currency awarded.
    pub fn record_kill(&mut self, is_boss: bool, max_hp: i32) -> u32 {
        self.defeated_count += 1;
        self.kill_points += 1;
        let reward = Self::kill_reward(is_boss, max_hp);
        self.currency += reward;
        reward
    }

    /// Record an escaped enemy: counts as a kill for both counters but
    /// grants no currency.
    pub fn record_escape(&mut self) {
        self.defeated_count += 1;
        self.kill_points += 1;
    }

    /// Currency returned for selling a tower with `upgrade_spent` invested:
    /// floor(30% of the spend).
    pub fn sell_refund(upgrade_spent: u32) -> u32 {
        upgrade_spent * SELL_REFUND_NUM / SELL_REFUND_DEN
    }
}
