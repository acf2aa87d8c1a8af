//! ECS components attached to ships in an encounter.
//!
//! Every ship entity carries its `Ship`, a `Combatant` and a `Loadout`.
//! AI-controlled ships also carry an `AiState`; markers come and go as the
//! fight develops.

use serde::{Deserialize, Serialize};

use corsair_core::types::{FactionId, PlayerId, ShipId};
use corsair_weapons::WeaponRuntimeState;

/// Which side of the fight a ship is on, relative to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Allied,
    Hostile,
    Neutral,
    Civilian,
}

impl Side {
    /// Player and allied ships fight together.
    pub fn is_friendly(self) -> bool {
        matches!(self, Side::Player | Side::Allied)
    }

    /// True when ships of these sides shoot at each other unprompted.
    /// Neutral and civilian ships are never anyone's chosen target.
    pub fn opposes(self, other: Side) -> bool {
        (self.is_friendly() && other == Side::Hostile)
            || (self == Side::Hostile && other.is_friendly())
    }

    /// True when `other` flies in formation with ships of this side.
    pub fn fights_alongside(self, other: Side) -> bool {
        self == other || (self.is_friendly() && other.is_friendly())
    }
}

/// Allegiance and position on the engagement line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub side: Side,
    pub faction: Option<FactionId>,
    /// Scalar position on the engagement line. Range between two ships is
    /// the difference of their standoffs.
    pub standoff: f64,
    /// Set for ships flown by a human player.
    pub player: Option<PlayerId>,
    /// Outstanding bounty on this ship, paid out with its salvage.
    pub bounty: u64,
}

impl Combatant {
    pub fn new(side: Side, standoff: f64) -> Self {
        Self {
            side,
            faction: None,
            standoff,
            player: None,
            bounty: 0,
        }
    }

    pub fn with_faction(mut self, faction: impl Into<FactionId>) -> Self {
        self.faction = Some(faction.into());
        self
    }

    pub fn with_player(mut self, player: impl Into<PlayerId>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn with_bounty(mut self, bounty: u64) -> Self {
        self.bounty = bounty;
        self
    }

    pub fn range_to(&self, other: &Combatant) -> f64 {
        (self.standoff - other.standoff).abs()
    }
}

/// Runtime state of every mounted weapon, in mount order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loadout(pub Vec<WeaponRuntimeState>);

impl Loadout {
    pub fn mount_mut(&mut self, mount: usize) -> Option<&mut WeaponRuntimeState> {
        self.0.iter_mut().find(|state| state.mount == mount)
    }
}

/// Marker: the ship is opening the range and will leave once clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retreating;

/// Who landed the most recent hit on a ship. Credited with the kill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastHitBy {
    pub ship: ShipId,
    pub player: Option<PlayerId>,
}
