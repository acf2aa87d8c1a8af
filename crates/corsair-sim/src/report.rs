//! Per-tick output of an encounter.
//!
//! Everything here serializes, so two runs can be compared byte for byte.

use serde::{Deserialize, Serialize};

use corsair_core::types::{FactionId, PlayerId, Ship, ShipId, WeaponId};
use corsair_weapons::FireResult;

use crate::commands::{CombatCommand, CommandRejected};
use crate::components::Side;

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Encounter clock at the end of the tick.
    pub time_secs: f64,
    pub shots: Vec<ShotReport>,
    pub kills: Vec<KillRecord>,
    pub escapes: Vec<EscapeRecord>,
    pub rejected: Vec<RejectedCommand>,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.shots.is_empty()
            && self.kills.is_empty()
            && self.escapes.is_empty()
            && self.rejected.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotReport {
    pub attacker: ShipId,
    pub target: ShipId,
    pub mount: usize,
    pub weapon: WeaponId,
    pub result: FireResult,
}

/// A ship destroyed this tick, as it was when it died.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillRecord {
    pub tick: u64,
    pub victim: Ship,
    pub victim_side: Side,
    pub victim_faction: Option<FactionId>,
    pub victim_bounty: u64,
    /// Ship that landed the last hit, if any did.
    pub killer: Option<ShipId>,
    pub killer_player: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscapeRecord {
    pub tick: u64,
    pub ship: ShipId,
    pub side: Side,
    /// Range to the nearest enemy when the ship got away. `None` when no
    /// enemy was left to run from.
    pub range: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedCommand {
    pub command: CombatCommand,
    pub reason: CommandRejected,
}
