//! Simulation engine — the core of the game.
//!
//! `GameEngine` owns the hecs ECS world, applies player commands, runs
//! all systems once per tick, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bulwark_core::commands::{PlaceOutcome, SellOutcome, UpgradeOutcome};
use bulwark_core::components::Tower;
use bulwark_core::constants::{
    upgrade_cost, PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH, TOWER_RADIUS,
};
use bulwark_core::enums::{GamePhase, TowerKind};
use bulwark_core::events::GameEvent;
use bulwark_core::state::GameStateSnapshot;
use bulwark_core::types::{Position, SimTime};

use crate::economy::EconomyState;
use crate::path::Path;
use crate::spawn;
use crate::systems;
use crate::systems::spawning::SpawnTimer;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all game state.
pub struct GameEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    path: Path,
    rng: ChaCha8Rng,
    seed: u64,
    spawn_timer: SpawnTimer,
    economy: EconomyState,
    next_tower_id: u32,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            path: Path::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            spawn_timer: SpawnTimer::default(),
            economy: EconomyState::new(),
            next_tower_id: 0,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot. After game over nothing simulates until `reset`.
    pub fn tick(&mut self) -> GameStateSnapshot {
        if self.phase == GamePhase::Running {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, &self.economy, events)
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // One captured "now" for every gating decision made this tick.
        let now = self.time.elapsed_secs;

        // 1. Scheduled spawning (boss cadence, hp tiers).
        systems::spawning::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawn_timer,
            self.economy.defeated_count,
            &self.path,
            &mut self.events,
        );
        // 2. Movement along the path; collects escapes.
        let escaped = systems::movement::run(&mut self.world, &self.path, now);
        // 3. Escape resolution: player damage, splash, nested deaths.
        systems::resolver::resolve_escapes(
            &mut self.world,
            &escaped,
            &self.path,
            &mut self.economy,
            &mut self.rng,
            &mut self.events,
        );
        // 4. Deaths left over from last tick's projectile damage.
        systems::resolver::resolve_deaths(
            &mut self.world,
            &self.path,
            &mut self.economy,
            &mut self.rng,
            &mut self.events,
        );
        // 5. Shooter towers pick targets and fire.
        systems::targeting::run(&mut self.world, now);
        // 6. Slow towers pulse / hold their permanent fields.
        systems::slow_field::run(&mut self.world, now);
        // 7. Projectile flight and impacts.
        systems::projectiles::run(&mut self.world, &mut self.despawn_buffer);
        // 8. Expired pulse markers.
        systems::cleanup::run(&mut self.world, now, &mut self.despawn_buffer);

        if self.economy.player_health <= 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                defeated_count: self.economy.defeated_count,
            });
        }
    }

    // --- Commands ---

    /// Place a tower of `kind` at `(x, y)`, paying kill points. Blocked
    /// on the path, on another tower, or outside the play area; blocking
    /// is checked before cost.
    pub fn place_tower(&mut self, kind: TowerKind, x: f64, y: f64) -> PlaceOutcome {
        if self.phase == GamePhase::GameOver {
            return PlaceOutcome::GameOver;
        }
        if !(0.0..=PLAY_AREA_WIDTH).contains(&x) || !(0.0..=PLAY_AREA_HEIGHT).contains(&y) {
            return PlaceOutcome::Blocked;
        }
        if self.is_point_on_path(x, y) || self.is_point_on_tower(x, y) {
            return PlaceOutcome::Blocked;
        }

        let cost = self.economy.placement_cost(kind);
        if self.economy.kill_points < cost {
            return PlaceOutcome::InsufficientKillPoints { required: cost };
        }

        let tower_id = self.next_tower_id;
        self.next_tower_id += 1;
        self.economy.record_purchase(kind, cost);
        spawn::spawn_tower(&mut self.world, tower_id, kind, x, y);
        self.events.push(GameEvent::TowerPlaced { tower_id, kind });
        PlaceOutcome::Placed { tower_id }
    }

    /// Upgrade a tower to its next level, paying currency. Never
    /// downgrades; a failed attempt changes nothing.
    pub fn upgrade_tower(&mut self, tower_id: u32) -> UpgradeOutcome {
        if self.phase == GamePhase::GameOver {
            return UpgradeOutcome::GameOver;
        }
        let Some(entity) = self.find_tower(tower_id) else {
            return UpgradeOutcome::NoSuchTower;
        };

        let (kind, level) = match self.world.get::<&Tower>(entity) {
            Ok(tower) => (tower.kind, tower.level),
            Err(_) => return UpgradeOutcome::NoSuchTower,
        };
        let next = level + 1;
        let Some(cost) = upgrade_cost(kind, next) else {
            return UpgradeOutcome::MaxLevel;
        };
        if self.economy.currency < cost {
            return UpgradeOutcome::InsufficientCurrency { required: cost };
        }

        self.economy.currency -= cost;
        if let Ok(mut tower) = self.world.get::<&mut Tower>(entity) {
            tower.level = next;
            tower.upgrade_spent += cost;
        }
        self.events.push(GameEvent::TowerUpgraded {
            tower_id,
            level: next,
        });
        UpgradeOutcome::Upgraded { level: next }
    }

    /// Sell a tower, refunding 30% of its cumulative upgrade spend.
    pub fn sell_tower(&mut self, tower_id: u32) -> SellOutcome {
        if self.phase == GamePhase::GameOver {
            return SellOutcome::GameOver;
        }
        let Some(entity) = self.find_tower(tower_id) else {
            return SellOutcome::NoSuchTower;
        };

        let spent = match self.world.get::<&Tower>(entity) {
            Ok(tower) => tower.upgrade_spent,
            Err(_) => return SellOutcome::NoSuchTower,
        };
        let refund = EconomyState::sell_refund(spent);
        self.economy.currency += refund;
        let _ = self.world.despawn(entity);
        self.events.push(GameEvent::TowerSold { tower_id, refund });
        SellOutcome::Sold { refund }
    }

    /// Reinitialize all state. The RNG is re-seeded, so a reset engine
    /// replays identically to a freshly constructed one.
    pub fn reset(&mut self) {
        *self = Self::new(SimConfig { seed: self.seed });
    }

    // --- Queries ---

    /// True if `(x, y)` is within the proximity threshold of the path.
    pub fn is_point_on_path(&self, x: f64, y: f64) -> bool {
        self.path.is_near(x, y)
    }

    /// True if `(x, y)` overlaps an existing tower's footprint.
    pub fn is_point_on_tower(&self, x: f64, y: f64) -> bool {
        let point = Position::new(x, y);
        let mut query = self.world.query::<(&Tower, &Position)>();
        query
            .iter()
            .any(|(_, (_, pos))| pos.distance_to(&point) < 2.0 * TOWER_RADIUS)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the economy counters.
    pub fn economy(&self) -> &EconomyState {
        &self.economy
    }

    /// Get a read-only reference to the shared path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn find_tower(&self, tower_id: u32) -> Option<hecs::Entity> {
        let mut query = self.world.query::<&Tower>();
        query
            .iter()
            .find(|(_, tower)| tower.tower_id == tower_id)
            .map(|(entity, _)| entity)
    }

    // --- Test hooks ---

    /// Spawn an enemy directly at path progress `t` (for tests).
    #[cfg(test)]
    pub fn spawn_enemy_at(&mut self, t: f64, hp: i32, max_hp: i32, is_boss: bool) -> hecs::Entity {
        use bulwark_core::components::{Enemy, PathOffset, PathProgress, SlowEffect};

        let position = self.path.position_at(t);
        self.world.spawn((
            Enemy { hp, max_hp, is_boss },
            PathProgress { t },
            PathOffset { dx: 0.0, dy: 0.0 },
            SlowEffect::default(),
            position,
        ))
    }

    /// Overwrite an enemy's path progress (for tests).
    #[cfg(test)]
    pub fn set_enemy_progress(&mut self, entity: hecs::Entity, t: f64) {
        use bulwark_core::components::PathProgress;

        if let Ok(mut progress) = self.world.get::<&mut PathProgress>(entity) {
            progress.t = t;
        }
    }

    /// Apply damage to an enemy directly (for tests).
    #[cfg(test)]
    pub fn damage_enemy(&mut self, entity: hecs::Entity, damage: i32) {
        use bulwark_core::components::Enemy;

        if let Ok(mut enemy) = self.world.get::<&mut Enemy>(entity) {
            enemy.hp -= damage;
        }
    }

    /// Mutable access to the economy counters (for tests).
    #[cfg(test)]
    pub fn economy_mut(&mut self) -> &mut EconomyState {
        &mut self.economy
    }

    /// Make the next tick run a spawn cycle immediately (for tests).
    #[cfg(test)]
    pub fn prime_spawn(&mut self) {
        self.spawn_timer = SpawnTimer::at_threshold();
    }
}
