//! Encounter driver for CORSAIR.
//!
//! Owns one combat instance's ships in a hecs world, runs the pilot, gunnery,
//! retreat and cleanup systems each tick, and reports kills with their
//! faction and salvage aftermath. Headless and seeded, so a replay with the
//! same seed and commands produces the same reports.

pub mod aftermath;
pub mod commands;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod systems;

pub use corsair_core as core;
pub use engine::Encounter;
pub use error::EncounterError;

#[cfg(test)]
mod tests;
