//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// Hull class. Military and capital hulls carry better salvage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipClass {
    Shuttle,
    #[default]
    Freighter,
    Fighter,
    Courier,
    Military,
    Capital,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    #[default]
    Laser,
    Missile,
    Plasma,
    Railgun,
}

/// Rare item tier, ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Non-player combatant skill tier, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiLevel {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
    Ace,
}

impl AiLevel {
    pub const ALL: [AiLevel; 5] = [
        AiLevel::Easy,
        AiLevel::Medium,
        AiLevel::Hard,
        AiLevel::Expert,
        AiLevel::Ace,
    ];

    /// Hard and above.
    pub fn is_veteran(self) -> bool {
        self >= AiLevel::Hard
    }
}

/// Combat outcomes that move faction standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatEvent {
    KillHostile,
    KillAlly,
    KillNeutral,
    KillCivilian,
    DefendAlly,
    PirateAction,
    BountyPaid,
}

impl CombatEvent {
    pub const ALL: [CombatEvent; 7] = [
        CombatEvent::KillHostile,
        CombatEvent::KillAlly,
        CombatEvent::KillNeutral,
        CombatEvent::KillCivilian,
        CombatEvent::DefendAlly,
        CombatEvent::PirateAction,
        CombatEvent::BountyPaid,
    ];

    /// Crimes that put a price on the attacker's head.
    pub fn is_crime(self) -> bool {
        matches!(
            self,
            CombatEvent::KillAlly
                | CombatEvent::KillNeutral
                | CombatEvent::KillCivilian
                | CombatEvent::PirateAction
        )
    }
}
