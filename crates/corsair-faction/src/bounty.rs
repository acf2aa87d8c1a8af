//! Bounties and the per-faction legal-status ladder.
//!
//! Timestamps are caller-supplied seconds; nothing here reads a clock.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use corsair_core::constants::*;
use corsair_core::enums::CombatEvent;
use corsair_core::types::{FactionId, PlayerId};

/// Credits a faction offers after `event` against a ship worth `ship_value`.
/// Zero for events that are not crimes.
pub fn bounty_amount(event: CombatEvent, ship_value: u64) -> u64 {
    let multiplier = match event {
        CombatEvent::KillCivilian => 3.0,
        CombatEvent::KillAlly => 2.0,
        CombatEvent::KillNeutral => 1.5,
        CombatEvent::PirateAction => 1.0,
        _ => return 0,
    };
    let scaled = (ship_value as f64 * BOUNTY_VALUE_FRACTION * multiplier).floor() as u64;
    BOUNTY_BASE.saturating_add(scaled)
}

/// How heavily a crime weighs on the record.
pub fn crime_severity(event: CombatEvent) -> Option<u32> {
    match event {
        CombatEvent::KillCivilian => Some(10),
        CombatEvent::KillAlly => Some(5),
        CombatEvent::PirateAction => Some(4),
        CombatEvent::KillNeutral => Some(3),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalStatus {
    #[default]
    Clean,
    Offender,
    Wanted,
    Fugitive,
}

impl LegalStatus {
    pub fn from_score(score: u32) -> Self {
        if score >= FUGITIVE_THRESHOLD {
            LegalStatus::Fugitive
        } else if score >= WANTED_THRESHOLD {
            LegalStatus::Wanted
        } else if score >= OFFENDER_THRESHOLD {
            LegalStatus::Offender
        } else {
            LegalStatus::Clean
        }
    }
}

/// A player's criminal record with one faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BountyInfo {
    pub faction: FactionId,
    /// Open bounty in credits.
    pub amount: u64,
    /// Seconds timestamp after which the bounty lapses.
    pub expires_at: u64,
    pub crime_count: u32,
    pub legal_status: LegalStatus,
}

impl BountyInfo {
    pub fn new(faction: FactionId) -> Self {
        Self {
            faction,
            amount: 0,
            expires_at: 0,
            crime_count: 0,
            legal_status: LegalStatus::Clean,
        }
    }

    /// Log a crime committed at `now`. Returns the bounty added, zero for non-crimes.
    ///
    /// Status only ever moves up the ladder.
    pub fn record_crime(&mut self, event: CombatEvent, ship_value: u64, now: u64) -> u64 {
        let Some(severity) = crime_severity(event) else {
            return 0;
        };
        if self.is_expired(now) {
            self.amount = 0;
        }

        let added = bounty_amount(event, ship_value);
        self.crime_count = self.crime_count.saturating_add(1);
        self.amount = self.amount.saturating_add(added);
        self.expires_at = now.saturating_add(BOUNTY_DURATION_SECS);

        let status = LegalStatus::from_score(self.crime_count.saturating_mul(severity));
        if status > self.legal_status {
            tracing::info!(
                faction = %self.faction,
                from = ?self.legal_status,
                to = ?status,
                "legal status raised"
            );
            self.legal_status = status;
        }
        added
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    /// Pay out the open bounty if it has not lapsed.
    pub fn claim(&mut self, now: u64) -> Option<u64> {
        if self.amount == 0 || self.is_expired(now) {
            return None;
        }
        Some(std::mem::take(&mut self.amount))
    }
}

/// Every player's record with every faction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BountyBoard {
    records: BTreeMap<PlayerId, BTreeMap<FactionId, BountyInfo>>,
}

impl BountyBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_crime(
        &mut self,
        player: &PlayerId,
        faction: &FactionId,
        event: CombatEvent,
        ship_value: u64,
        now: u64,
    ) -> u64 {
        if crime_severity(event).is_none() {
            return 0;
        }
        self.records
            .entry(player.clone())
            .or_default()
            .entry(faction.clone())
            .or_insert_with(|| BountyInfo::new(faction.clone()))
            .record_crime(event, ship_value, now)
    }

    pub fn get(&self, player: &PlayerId, faction: &FactionId) -> Option<&BountyInfo> {
        self.records.get(player)?.get(faction)
    }

    pub fn legal_status(&self, player: &PlayerId, faction: &FactionId) -> LegalStatus {
        self.get(player, faction)
            .map_or(LegalStatus::Clean, |info| info.legal_status)
    }

    /// Collect the bounty on `player` posted by `faction`.
    pub fn claim(&mut self, player: &PlayerId, faction: &FactionId, now: u64) -> Option<u64> {
        self.records.get_mut(player)?.get_mut(faction)?.claim(now)
    }

    /// Open, unexpired bounties on `player`, in faction id order.
    pub fn active(&self, player: &PlayerId, now: u64) -> Vec<&BountyInfo> {
        self.records
            .get(player)
            .map(|by_faction| {
                by_faction
                    .values()
                    .filter(|info| info.amount > 0 && !info.is_expired(now))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Zero every lapsed bounty. Records and statuses are kept.
    pub fn expire(&mut self, now: u64) -> usize {
        let mut lapsed = 0;
        for info in self.records.values_mut().flat_map(|m| m.values_mut()) {
            if info.amount > 0 && info.is_expired(now) {
                info.amount = 0;
                lapsed += 1;
            }
        }
        lapsed
    }
}
