//! Simulation engine for BULWARK.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the presentation layer.

pub mod economy;
pub mod engine;
pub mod path;
pub mod projectile;
pub mod spawn;
pub mod systems;

pub use bulwark_core as core;
pub use engine::GameEngine;

#[cfg(test)]
mod tests;
