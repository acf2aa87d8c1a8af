//! Read-only reference data, injected into every engine call.
//!
//! Lookups by unknown id return `None`; callers skip or degrade rather than fail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::*;

/// Lookup interface over static reference data.
pub trait Catalog {
    fn ship_type(&self, id: &ShipTypeId) -> Option<&ShipType>;
    fn weapon(&self, id: &WeaponId) -> Option<&Weapon>;
    fn outfit(&self, id: &OutfitId) -> Option<&Outfit>;
    fn faction(&self, id: &FactionId) -> Option<&Faction>;
    fn commodity(&self, id: &CommodityId) -> Option<&Commodity>;

    /// Every faction, in ascending id order.
    fn factions(&self) -> Vec<&Faction>;

    /// Every rare item, in declaration order.
    fn rare_items(&self) -> &[RareItem];
}

/// Serialized form of a catalog: flat lists, as written by designers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub ship_types: Vec<ShipType>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub outfits: Vec<Outfit>,
    #[serde(default)]
    pub factions: Vec<Faction>,
    #[serde(default)]
    pub commodities: Vec<Commodity>,
    #[serde(default)]
    pub rare_items: Vec<RareItem>,
}

/// In-memory catalog keyed by id.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    ship_types: BTreeMap<ShipTypeId, ShipType>,
    weapons: BTreeMap<WeaponId, Weapon>,
    outfits: BTreeMap<OutfitId, Outfit>,
    factions: BTreeMap<FactionId, Faction>,
    commodities: BTreeMap<CommodityId, Commodity>,
    rare_items: Vec<RareItem>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = toml::from_str(source)?;
        Self::from_document(document)
    }

    /// Index a document, rejecting duplicate ids and dangling faction links.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for ship_type in document.ship_types {
            insert_unique(&mut catalog.ship_types, "ship type", ship_type.id.clone(), ship_type)?;
        }
        for weapon in document.weapons {
            insert_unique(&mut catalog.weapons, "weapon", weapon.id.clone(), weapon)?;
        }
        for outfit in document.outfits {
            insert_unique(&mut catalog.outfits, "outfit", outfit.id.clone(), outfit)?;
        }
        for faction in document.factions {
            insert_unique(&mut catalog.factions, "faction", faction.id.clone(), faction)?;
        }
        for commodity in document.commodities {
            insert_unique(&mut catalog.commodities, "commodity", commodity.id.clone(), commodity)?;
        }
        for item in document.rare_items {
            if catalog.rare_items.iter().any(|existing| existing.id == item.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "rare item",
                    id: item.id.to_string(),
                });
            }
            catalog.rare_items.push(item);
        }

        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every ally/enemy reference names a known faction.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for faction in self.factions.values() {
            for reference in faction.allies.iter().chain(faction.enemies.iter()) {
                if !self.factions.contains_key(reference) {
                    tracing::warn!(
                        faction = %faction.id,
                        reference = %reference,
                        "dangling faction reference"
                    );
                    return Err(CatalogError::UnknownFaction {
                        faction: faction.id.to_string(),
                        reference: reference.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn with_ship_type(mut self, ship_type: ShipType) -> Self {
        self.ship_types.insert(ship_type.id.clone(), ship_type);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.insert(weapon.id.clone(), weapon);
        self
    }

    pub fn with_outfit(mut self, outfit: Outfit) -> Self {
        self.outfits.insert(outfit.id.clone(), outfit);
        self
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.factions.insert(faction.id.clone(), faction);
        self
    }

    pub fn with_commodity(mut self, commodity: Commodity) -> Self {
        self.commodities.insert(commodity.id.clone(), commodity);
        self
    }

    pub fn with_rare_item(mut self, item: RareItem) -> Self {
        self.rare_items.push(item);
        self
    }
}

fn insert_unique<K: Ord + ToString, V>(
    map: &mut BTreeMap<K, V>,
    kind: &'static str,
    key: K,
    value: V,
) -> Result<(), CatalogError> {
    if map.contains_key(&key) {
        return Err(CatalogError::DuplicateId {
            kind,
            id: key.to_string(),
        });
    }
    map.insert(key, value);
    Ok(())
}

impl Catalog for StaticCatalog {
    fn ship_type(&self, id: &ShipTypeId) -> Option<&ShipType> {
        self.ship_types.get(id)
    }

    fn weapon(&self, id: &WeaponId) -> Option<&Weapon> {
        self.weapons.get(id)
    }

    fn outfit(&self, id: &OutfitId) -> Option<&Outfit> {
        self.outfits.get(id)
    }

    fn faction(&self, id: &FactionId) -> Option<&Faction> {
        self.factions.get(id)
    }

    fn commodity(&self, id: &CommodityId) -> Option<&Commodity> {
        self.commodities.get(id)
    }

    fn factions(&self) -> Vec<&Faction> {
        self.factions.values().collect()
    }

    fn rare_items(&self) -> &[RareItem] {
        &self.rare_items
    }
}
