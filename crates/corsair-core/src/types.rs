//! Identifiers, reference data, and the mutable ship entity.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::*;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

string_id!(
    /// Catalog key of a hull design.
    ShipTypeId
);
string_id!(
    /// Catalog key of a weapon.
    WeaponId
);
string_id!(
    /// Catalog key of a non-weapon outfit.
    OutfitId
);
string_id!(
    /// Catalog key of a faction.
    FactionId
);
string_id!(
    /// Catalog key of a tradeable commodity.
    CommodityId
);
string_id!(
    /// Catalog key of a rare salvage item.
    RareItemId
);
string_id!(
    /// Star system identifier, used for faction territory.
    SystemId
);
string_id!(
    /// Account identifier of a human player.
    PlayerId
);

/// Runtime identifier of a ship instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable hull design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipType {
    pub id: ShipTypeId,
    pub name: String,
    pub class: ShipClass,
    pub max_hull: u32,
    pub max_shields: u32,
    /// Agility rating. Makes the ship harder to hit and improves its own aim.
    pub maneuverability: f64,
    /// Purchase price in credits. Drives salvage credits and bounties.
    pub price: u64,
    /// Hold size in tons.
    #[serde(default)]
    pub cargo_capacity: u32,
    #[serde(default)]
    pub fuel_capacity: u32,
}

/// Immutable weapon definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: WeaponId,
    pub name: String,
    pub kind: WeaponKind,
    pub damage: u32,
    /// Optimal range. Shots beyond it lose accuracy.
    pub range: f64,
    /// Base accuracy, 0-100.
    pub accuracy: f64,
    /// Seconds between shots.
    pub cooldown: f64,
    /// Fraction of damage that bypasses shields (0.0 - 1.0).
    #[serde(default)]
    pub shield_penetration: f64,
    /// Magazine size. Zero means the weapon never runs dry.
    #[serde(default)]
    pub ammo_capacity: u32,
    #[serde(default)]
    pub ammo_per_shot: u32,
    #[serde(default)]
    pub energy_cost: u32,
    #[serde(default)]
    pub price: u64,
}

impl Weapon {
    pub fn is_ammo_limited(&self) -> bool {
        self.ammo_capacity > 0
    }

    /// Rounds consumed per discharge. Ammo weapons always use at least one.
    pub fn ammo_consumption(&self) -> u32 {
        if self.is_ammo_limited() {
            self.ammo_per_shot.max(1)
        } else {
            0
        }
    }

    pub fn is_missile(&self) -> bool {
        self.kind == WeaponKind::Missile
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: OutfitId,
    pub name: String,
    #[serde(default)]
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    pub id: CommodityId,
    pub name: String,
    #[serde(default)]
    pub base_price: u64,
}

/// A collectible that only drops from destroyed ships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RareItem {
    pub id: RareItemId,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub value: u64,
}

/// A faction and its declared relationships.
///
/// Allies and enemies are ordered lists so reputation cascades are
/// reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    #[serde(default)]
    pub allies: Vec<FactionId>,
    #[serde(default)]
    pub enemies: Vec<FactionId>,
    /// Systems this faction patrols.
    #[serde(default)]
    pub territory: Vec<SystemId>,
    /// Ships a routine patrol dispatches.
    #[serde(default = "default_patrol_strength")]
    pub patrol_strength: u32,
}

fn default_patrol_strength() -> u32 {
    2
}

impl Faction {
    pub fn is_enemy_of(&self, other: &FactionId) -> bool {
        self.enemies.contains(other)
    }

    pub fn controls(&self, system: &SystemId) -> bool {
        self.territory.contains(system)
    }
}

/// An item stowed in a ship's hold after salvage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum HoldItem {
    Weapon(WeaponId),
    Outfit(OutfitId),
    Rare(RareItemId),
}

/// Mutable combat entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub ship_type: ShipTypeId,
    pub hull: u32,
    pub shields: u32,
    #[serde(default)]
    pub fuel: u32,
    #[serde(default)]
    pub cargo: BTreeMap<CommodityId, u32>,
    /// Equipped weapons, in mount order.
    #[serde(default)]
    pub weapons: Vec<WeaponId>,
    #[serde(default)]
    pub outfits: Vec<OutfitId>,
    /// Salvaged items that are carried, not equipped.
    #[serde(default)]
    pub hold: Vec<HoldItem>,
}

impl Ship {
    /// A fresh ship at full hull, shields and fuel.
    pub fn from_type(id: ShipId, ship_type: &ShipType) -> Self {
        Self {
            id,
            ship_type: ship_type.id.clone(),
            hull: ship_type.max_hull,
            shields: ship_type.max_shields,
            fuel: ship_type.fuel_capacity,
            cargo: BTreeMap::new(),
            weapons: Vec::new(),
            outfits: Vec::new(),
            hold: Vec::new(),
        }
    }

    pub fn with_weapon(mut self, weapon: impl Into<WeaponId>) -> Self {
        self.weapons.push(weapon.into());
        self
    }

    pub fn with_outfit(mut self, outfit: impl Into<OutfitId>) -> Self {
        self.outfits.push(outfit.into());
        self
    }

    pub fn with_cargo(mut self, commodity: impl Into<CommodityId>, quantity: u32) -> Self {
        let stack = self.cargo.entry(commodity.into()).or_insert(0);
        *stack = stack.saturating_add(quantity);
        self
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull == 0
    }

    pub fn hull_fraction(&self, ship_type: &ShipType) -> f64 {
        fraction(self.hull, ship_type.max_hull)
    }

    /// Zero for ships without shield generators.
    pub fn shield_fraction(&self, ship_type: &ShipType) -> f64 {
        fraction(self.shields, ship_type.max_shields)
    }

    /// Units of cargo aboard, across all commodities. Saturates at `u32::MAX`.
    pub fn cargo_units(&self) -> u32 {
        self.cargo
            .values()
            .fold(0u32, |total, &quantity| total.saturating_add(quantity))
    }
}

/// `current / max` in [0, 1]; zero when `max` is zero.
pub fn fraction(current: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        (current as f64 / max as f64).clamp(0.0, 1.0)
    }
}
