//! Consequences of a kill: standing changes, the bounty posted on the killer,
//! and what can be salvaged from the wreck.

use serde::{Deserialize, Serialize};

use corsair_core::catalog::Catalog;
use corsair_core::enums::CombatEvent;
use corsair_core::types::{Ship, ShipId};
use corsair_faction::{bounty_amount, combat_reputation, ReputationChange, ReputationMap};
use corsair_loot::{apply_loot, generate_loot, LootDrop};

use crate::components::Side;
use crate::engine::Encounter;
use crate::error::EncounterError;
use crate::report::KillRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aftermath {
    /// `None` when the kill carries no faction consequences, e.g. a player
    /// ship going down.
    pub event: Option<CombatEvent>,
    pub reputation: Vec<ReputationChange>,
    /// Bounty the victim's faction posts on the killing player.
    pub bounty: u64,
    pub loot: LootDrop,
}

/// The combat event a kill of a ship on `side` counts as.
pub fn classify(side: Side) -> Option<CombatEvent> {
    match side {
        Side::Hostile => Some(CombatEvent::KillHostile),
        Side::Allied => Some(CombatEvent::KillAlly),
        Side::Neutral => Some(CombatEvent::KillNeutral),
        Side::Civilian => Some(CombatEvent::KillCivilian),
        Side::Player => None,
    }
}

impl<'c, C: Catalog> Encounter<'c, C> {
    /// Work out what `kill` costs and yields.
    ///
    /// Standing changes and bounties apply only when a player landed the
    /// last hit on a ship that belongs to a faction. Salvage is always
    /// rolled, from this encounter's generator.
    pub fn aftermath(
        &mut self,
        kill: &KillRecord,
        reputation: &ReputationMap,
    ) -> Result<Aftermath, EncounterError> {
        let victim = &kill.victim;
        let ship_type = self
            .catalog
            .ship_type(&victim.ship_type)
            .ok_or_else(|| EncounterError::UnknownShipType {
                ship: victim.id,
                ship_type: victim.ship_type.clone(),
            })?;

        let event = classify(kill.victim_side);
        let (changes, bounty) = match (event, &kill.killer_player, &kill.victim_faction) {
            (Some(event), Some(_), Some(faction)) => (
                combat_reputation(event, faction, reputation.get(faction), self.catalog),
                bounty_amount(event, ship_type.price),
            ),
            _ => (Vec::new(), 0),
        };

        let loot = generate_loot(
            victim,
            ship_type,
            kill.victim_side == Side::Hostile,
            kill.victim_bounty > 0,
            kill.victim_bounty,
            self.catalog,
            &mut self.rng,
        );

        tracing::info!(
            victim = %victim.id,
            ?event,
            changes = changes.len(),
            bounty,
            salvage = loot.total_value,
            "aftermath"
        );
        Ok(Aftermath {
            event,
            reputation: changes,
            bounty,
            loot,
        })
    }

    /// Stow `loot` aboard `collector`, a ship still in the fight. Returns the
    /// credits to pay out. A hold too small for all of it takes none of it.
    pub fn collect_loot(
        &mut self,
        collector: ShipId,
        loot: &LootDrop,
    ) -> Result<u64, EncounterError> {
        let entity = self
            .entity(collector)
            .ok_or(EncounterError::UnknownShip(collector))?;
        let mut ship = self
            .world
            .get::<&mut Ship>(entity)
            .map_err(|_| EncounterError::UnknownShip(collector))?;
        let ship_type = self.catalog.ship_type(&ship.ship_type).ok_or_else(|| {
            EncounterError::UnknownShipType {
                ship: collector,
                ship_type: ship.ship_type.clone(),
            }
        })?;

        let credits = apply_loot(&mut ship, ship_type, loot)?;
        tracing::info!(ship = %collector, credits, "loot collected");
        Ok(credits)
    }
}
