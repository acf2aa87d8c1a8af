use thiserror::Error;

use corsair_core::types::{ShipId, ShipTypeId};
use corsair_loot::LootError;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum EncounterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("ship {0} is already in this encounter")]
    DuplicateShip(ShipId),

    #[error("ship {ship} has unknown ship type {ship_type}")]
    UnknownShipType { ship: ShipId, ship_type: ShipTypeId },

    #[error("ship {0} is not in this encounter")]
    UnknownShip(ShipId),

    #[error(transparent)]
    Loot(#[from] LootError),
}
