//! Orders issued to an encounter from outside the AI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use corsair_core::types::{ShipId, ShipTypeId};

/// Commands are queued and applied at the start of the next tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatCommand {
    /// Discharge the weapon at `mount` on `attacker` at `target`.
    Fire {
        attacker: ShipId,
        mount: usize,
        target: ShipId,
    },
    /// Refill every magazine on `ship`. Only allowed once the shooting stops.
    Reload { ship: ShipId },
    /// Start opening the range. The ship leaves once it is clear.
    Disengage { ship: ShipId },
}

/// Why a command or fire order was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandRejected {
    #[error("no ship {0} in this encounter")]
    UnknownShip(ShipId),

    #[error("ship {0} is already destroyed")]
    Destroyed(ShipId),

    #[error("ship {0} cannot fire on itself")]
    SelfTarget(ShipId),

    #[error("ship {ship} has no weapon at mount {mount}")]
    NoSuchMount { ship: ShipId, mount: usize },

    #[error("ship {ship} already fired mount {mount} this tick")]
    AlreadyFired { ship: ShipId, mount: usize },

    #[error("unknown ship type {0}")]
    UnknownShipType(ShipTypeId),

    #[error("cannot reload while hostilities are active")]
    HostilitiesActive,
}
