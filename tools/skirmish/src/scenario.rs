//! Scenario files: who is in the fight and where they start.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::Deserialize;

use corsair_ai::AiState;
use corsair_core::enums::AiLevel;
use corsair_core::types::*;
use corsair_sim::components::{Combatant, Side};
use corsair_sim::config::EncounterConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// The human player, credited with kills made by `player` ships.
    pub player: PlayerId,
    /// Star system the fight takes place in. Drives reinforcement checks.
    #[serde(default)]
    pub system: Option<SystemId>,
    #[serde(default)]
    pub encounter: EncounterConfig,
    /// Player standing with each faction before the fight.
    #[serde(default)]
    pub reputation: BTreeMap<FactionId, i32>,
    #[serde(rename = "ship")]
    pub ships: Vec<ShipSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShipSpec {
    pub id: u32,
    #[serde(rename = "type")]
    pub ship_type: ShipTypeId,
    pub side: Side,
    #[serde(default)]
    pub faction: Option<FactionId>,
    #[serde(default)]
    pub standoff: f64,
    /// Pilot skill. Ships without one only act on commands.
    #[serde(default)]
    pub ai: Option<AiLevel>,
    #[serde(default)]
    pub formation: Option<[f64; 2]>,
    #[serde(default)]
    pub weapons: Vec<WeaponId>,
    #[serde(default)]
    pub outfits: Vec<OutfitId>,
    #[serde(default)]
    pub cargo: BTreeMap<CommodityId, u32>,
    #[serde(default)]
    pub bounty: u64,
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

impl ShipSpec {
    /// Build the ship at full strength, plus its combatant and pilot.
    pub fn build(
        &self,
        ship_type: &ShipType,
        player: &PlayerId,
    ) -> (Ship, Combatant, Option<AiState>) {
        let mut ship = Ship::from_type(ShipId(self.id), ship_type);
        ship.weapons = self.weapons.clone();
        ship.outfits = self.outfits.clone();
        ship.cargo = self.cargo.clone();

        let mut combatant = Combatant::new(self.side, self.standoff).with_bounty(self.bounty);
        combatant.faction = self.faction.clone();
        if self.side == Side::Player {
            combatant.player = Some(player.clone());
        }

        let ai = self.ai.map(|level| match self.formation {
            Some([x, y]) => AiState::new(level).with_formation(DVec2::new(x, y)),
            None => AiState::new(level),
        });
        (ship, combatant, ai)
    }
}
