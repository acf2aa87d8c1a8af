//! Reinforcement dispatch when a faction's ship comes under attack.

use serde::{Deserialize, Serialize};

use corsair_core::catalog::Catalog;
use corsair_core::constants::*;
use corsair_core::types::{Faction, FactionId, SystemId};

use crate::reputation::ReputationMap;

/// A faction's response to an attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reinforcement {
    pub faction: FactionId,
    pub delay_turns: u32,
    pub ships: u32,
}

/// Turns before help arrives. Worse standing means a faster response;
/// factions that do not dislike the attacker never respond.
pub fn reinforcement_delay(reputation: i32) -> Option<u32> {
    if reputation < -50 {
        Some(REINFORCEMENT_DELAY_AT_WAR)
    } else if reputation < -25 {
        Some(REINFORCEMENT_DELAY_HOSTILE)
    } else if reputation < 0 {
        Some(REINFORCEMENT_DELAY_UNFRIENDLY)
    } else {
        None
    }
}

/// Ships dispatched: base patrol scaled by up to 2x with hostility, in [1, 5].
pub fn reinforcement_strength(faction: &Faction, reputation: i32) -> u32 {
    let multiplier = if reputation < 0 {
        (1.0 + reputation.unsigned_abs() as f64 / 100.0).clamp(1.0, 2.0)
    } else {
        1.0
    };
    let ships = (faction.patrol_strength as f64 * multiplier).round() as u32;
    ships.clamp(MIN_REINFORCEMENTS, MAX_REINFORCEMENTS)
}

/// True when `system` is the faction's or an ally's territory and the
/// attacker's standing is bad enough to provoke a response.
pub fn will_faction_reinforce(
    faction: &Faction,
    system: &SystemId,
    reputation: i32,
    catalog: &impl Catalog,
) -> bool {
    let in_territory = faction.controls(system)
        || faction
            .allies
            .iter()
            .filter_map(|id| catalog.faction(id))
            .any(|ally| ally.controls(system));
    in_territory && reinforcement_delay(reputation).is_some()
}

/// Responses to an attack on `victim_faction` in `system`, from the victim's
/// faction and then its allies in declared order.
pub fn reinforcing_factions(
    victim_faction: &FactionId,
    system: &SystemId,
    reputation: &ReputationMap,
    catalog: &impl Catalog,
) -> Vec<Reinforcement> {
    let Some(victim) = catalog.faction(victim_faction) else {
        return Vec::new();
    };

    std::iter::once(victim)
        .chain(victim.allies.iter().filter_map(|id| catalog.faction(id)))
        .filter_map(|faction| {
            let standing = reputation.get(&faction.id);
            if !will_faction_reinforce(faction, system, standing, catalog) {
                return None;
            }
            let delay_turns = reinforcement_delay(standing)?;
            Some(Reinforcement {
                faction: faction.id.clone(),
                delay_turns,
                ships: reinforcement_strength(faction, standing),
            })
        })
        .collect()
}
