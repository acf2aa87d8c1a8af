//! ECS systems that operate on the encounter world each tick.
//!
//! Systems are plain functions over `&mut World`. They keep no state of their
//! own; ships are always visited in `ShipId` order through the roster so a
//! seeded run replays exactly.

use std::collections::BTreeMap;

use hecs::Entity;

use corsair_core::types::ShipId;

pub mod cleanup;
pub mod cooldowns;
pub mod gunnery;
pub mod pilots;
pub mod retreat;

/// Live ships by id.
pub type Roster = BTreeMap<ShipId, Entity>;
