//! Weapon resolution for CORSAIR.
//!
//! Decides whether a discharge hits, splits damage between shields and hull,
//! and tracks per-weapon cooldown and ammunition. Pure functions over
//! caller-owned state; randomness comes from the caller's generator.

pub mod resolution;
pub mod state;

pub use resolution::{apply_damage, fire, fire_with_accuracy, hit_chance, resolve_shot};
pub use resolution::{DamageSplit, FireResult, ShotRoll};
pub use state::{can_fire, loadout_for, readiness, reload, update_cooldowns};
pub use state::{FireBlocked, Readiness, WeaponRuntimeState};
