//! Reputation cascades.
//!
//! A combat event moves standing with the victim's faction, then ripples out
//! through its declared allies and enemies. Killing a civilian also costs
//! standing with every faction that is not at odds with the victim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use corsair_core::catalog::Catalog;
use corsair_core::constants::*;
use corsair_core::enums::CombatEvent;
use corsair_core::types::FactionId;

use crate::hostility::HostilityLevel;

/// A signed standing adjustment for one faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationChange {
    pub faction: FactionId,
    pub amount: i32,
    pub reason: String,
}

/// Base deltas of an event for the victim, its allies, and its enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDeltas {
    pub direct: i32,
    pub allies: i32,
    pub enemies: i32,
}

pub fn event_deltas(event: CombatEvent) -> EventDeltas {
    let (direct, allies, enemies) = match event {
        CombatEvent::KillHostile => (-5, -3, 5),
        CombatEvent::KillAlly => (-25, -15, 2),
        CombatEvent::KillNeutral => (-10, -6, 2),
        CombatEvent::KillCivilian => (-20, -12, 4),
        CombatEvent::DefendAlly => (10, 6, -2),
        CombatEvent::PirateAction => (-15, -9, 3),
        CombatEvent::BountyPaid => (5, 3, -1),
    };
    EventDeltas {
        direct,
        allies,
        enemies,
    }
}

fn describe(event: CombatEvent) -> &'static str {
    match event {
        CombatEvent::KillHostile => "destroyed a hostile ship",
        CombatEvent::KillAlly => "destroyed an allied ship",
        CombatEvent::KillNeutral => "destroyed a neutral ship",
        CombatEvent::KillCivilian => "destroyed a civilian ship",
        CombatEvent::DefendAlly => "defended an ally",
        CombatEvent::PirateAction => "committed piracy",
        CombatEvent::BountyPaid => "paid off a bounty",
    }
}

/// Standing changes caused by `event` against a ship of `victim_faction`.
///
/// `attacker_reputation` is the attacker's current standing with the victim's
/// faction. One change per faction, ordered victim, allies, enemies, then the
/// rest by id. An unknown victim faction yields nothing.
pub fn combat_reputation(
    event: CombatEvent,
    victim_faction: &FactionId,
    attacker_reputation: i32,
    catalog: &impl Catalog,
) -> Vec<ReputationChange> {
    let Some(victim) = catalog.faction(victim_faction) else {
        tracing::warn!(faction = %victim_faction, "reputation event for unknown faction");
        return Vec::new();
    };

    let deltas = event_deltas(event);
    let what = describe(event);
    let mut changes: Vec<ReputationChange> = Vec::new();

    let mut direct = ReputationChange {
        faction: victim.id.clone(),
        amount: deltas.direct,
        reason: what.to_string(),
    };
    if event == CombatEvent::KillAlly && attacker_reputation > BETRAYAL_THRESHOLD {
        direct.amount += BETRAYAL_PENALTY;
        direct.reason = format!("{what} (betrayal)");
    }
    changes.push(direct);

    for ally in &victim.allies {
        push_unique(
            &mut changes,
            ally,
            deltas.allies,
            format!("{what}: ally of {}", victim.name),
        );
    }

    let earning_trust = event == CombatEvent::KillHostile && attacker_reputation < 0;
    for enemy in &victim.enemies {
        let (amount, reason) = if earning_trust {
            (
                deltas.enemies + EARNING_TRUST_BONUS,
                format!("{what}: enemy of {} (earning trust)", victim.name),
            )
        } else {
            (deltas.enemies, format!("{what}: enemy of {}", victim.name))
        };
        push_unique(&mut changes, enemy, amount, reason);
    }

    if event == CombatEvent::KillCivilian {
        for faction in catalog.factions() {
            if faction.id == victim.id
                || victim.is_enemy_of(&faction.id)
                || faction.is_enemy_of(&victim.id)
            {
                continue;
            }
            match changes.iter_mut().find(|c| c.faction == faction.id) {
                Some(existing) => existing.amount += CIVILIAN_OUTRAGE_PENALTY,
                None => changes.push(ReputationChange {
                    faction: faction.id.clone(),
                    amount: CIVILIAN_OUTRAGE_PENALTY,
                    reason: "civilian casualties".to_string(),
                }),
            }
        }
    }

    tracing::debug!(
        ?event,
        faction = %victim.id,
        changes = changes.len(),
        "reputation cascade"
    );
    changes
}

fn push_unique(
    changes: &mut Vec<ReputationChange>,
    faction: &FactionId,
    amount: i32,
    reason: String,
) {
    if changes.iter().any(|c| &c.faction == faction) {
        return;
    }
    changes.push(ReputationChange {
        faction: faction.clone(),
        amount,
        reason,
    });
}

/// A player's standing with every faction, each in [-100, 100].
/// Factions never mentioned stand at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReputationMap(BTreeMap<FactionId, i32>);

impl ReputationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, faction: &FactionId) -> i32 {
        self.0.get(faction).copied().unwrap_or(0)
    }

    pub fn set(&mut self, faction: FactionId, value: i32) {
        self.0
            .insert(faction, value.clamp(REPUTATION_MIN, REPUTATION_MAX));
    }

    pub fn with(mut self, faction: impl Into<FactionId>, value: i32) -> Self {
        self.set(faction.into(), value);
        self
    }

    /// Accumulate each change, clamping after every step.
    pub fn apply(&mut self, changes: &[ReputationChange]) {
        for change in changes {
            let current = self.get(&change.faction);
            let updated = current.saturating_add(change.amount);
            self.set(change.faction.clone(), updated);
        }
    }

    pub fn hostility(&self, faction: &FactionId) -> HostilityLevel {
        HostilityLevel::from_reputation(self.get(faction))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FactionId, i32)> {
        self.0.iter().map(|(id, value)| (id, *value))
    }
}
