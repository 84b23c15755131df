//! Projectile data model.
//!
//! Lives in the sim crate (not core) because targets reference ECS
//! entities.

use bulwark_core::types::Position;

/// What a projectile is steering toward. Exactly one alternative is ever
/// active, and the switch is one-way: once a projectile is frozen onto a
/// fixed point it never goes back to tracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileTarget {
    /// Homing on a live enemy.
    Tracking(hecs::Entity),
    /// Flying to the impact point left behind when the tracked enemy died
    /// or escaped. Impact at a fixed point deals no damage.
    Fixed(Position),
}

/// An in-flight shot fired by a shooter tower.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// Flight speed in px/s.
    pub speed: f64,
    pub target: ProjectileTarget,
}
