//! Salvage rolls for a destroyed ship.

use rand::Rng;
use serde::{Deserialize, Serialize};

use corsair_core::catalog::Catalog;
use corsair_core::constants::*;
use corsair_core::enums::{Rarity, ShipClass};
use corsair_core::types::{CommodityId, OutfitId, RareItem, RareItemId, Ship, ShipType, WeaponId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoItem {
    pub commodity: CommodityId,
    pub quantity: u32,
}

/// Everything recovered from one wreck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDrop {
    pub credits: u64,
    pub cargo: Vec<CargoItem>,
    pub outfits: Vec<OutfitId>,
    pub weapons: Vec<WeaponId>,
    pub rare_items: Vec<RareItemId>,
    /// Credits plus the catalog value of every item.
    pub total_value: u64,
    pub summary: String,
}

impl LootDrop {
    pub fn is_empty(&self) -> bool {
        self.credits == 0
            && self.cargo.is_empty()
            && self.outfits.is_empty()
            && self.weapons.is_empty()
            && self.rare_items.is_empty()
    }

    /// Saturates at `u32::MAX`.
    pub fn cargo_units(&self) -> u32 {
        self.cargo
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }
}

/// Roll salvage for `ship`. Never fails; a bare hull may yield nothing.
///
/// Draw order is fixed (credits, cargo stacks in id order, outfits and
/// weapons in mount order, rare item) so a seeded generator reproduces a drop.
pub fn generate_loot(
    ship: &Ship,
    ship_type: &ShipType,
    was_hostile: bool,
    had_bounty: bool,
    bounty: u64,
    catalog: &impl Catalog,
    rng: &mut impl Rng,
) -> LootDrop {
    let mut loot = LootDrop::default();

    let share = rng.gen_range(LOOT_CREDITS_MIN..=LOOT_CREDITS_MAX);
    loot.credits = (ship_type.price as f64 * share).floor() as u64;
    if had_bounty {
        loot.credits = loot.credits.saturating_add(bounty);
    }

    for (commodity, &quantity) in &ship.cargo {
        let survival = rng.gen_range(CARGO_SURVIVAL_MIN..=CARGO_SURVIVAL_MAX);
        let kept = (quantity as f64 * survival).floor() as u32;
        if kept > 0 {
            loot.cargo.push(CargoItem {
                commodity: commodity.clone(),
                quantity: kept,
            });
        }
    }

    for outfit in &ship.outfits {
        if rng.gen_bool(OUTFIT_SALVAGE_CHANCE) {
            loot.outfits.push(outfit.clone());
        }
    }

    let weapon_chance = if was_hostile {
        HOSTILE_WEAPON_SALVAGE_CHANCE
    } else {
        WEAPON_SALVAGE_CHANCE
    };
    for weapon in &ship.weapons {
        if rng.gen_bool(weapon_chance) {
            loot.weapons.push(weapon.clone());
        }
    }

    let chance = rare_item_chance(ship_type, was_hostile);
    if rng.gen::<f64>() < chance {
        if let Some(item) = roll_rare_item(catalog.rare_items(), rng) {
            loot.rare_items.push(item.id.clone());
        }
    }

    loot.total_value = value_of(&loot, catalog);
    loot.summary = summarize(&loot);

    tracing::debug!(
        ship = %ship.id,
        credits = loot.credits,
        total_value = loot.total_value,
        "loot generated"
    );
    loot
}

/// Probability of a rare item, capped.
pub fn rare_item_chance(ship_type: &ShipType, was_hostile: bool) -> f64 {
    let mut chance = RARE_BASE_CHANCE;
    chance += match ship_type.class {
        ShipClass::Military => RARE_MILITARY_BONUS,
        ShipClass::Capital => RARE_CAPITAL_BONUS,
        _ => 0.0,
    };
    if was_hostile {
        chance += RARE_HOSTILE_BONUS;
    }
    if ship_type.price > RARE_VALUE_TIER_1 {
        chance += RARE_VALUE_BONUS;
    }
    if ship_type.price > RARE_VALUE_TIER_2 {
        chance += RARE_VALUE_BONUS;
    }
    chance.min(RARE_CHANCE_CAP)
}

/// Tier for a roll in [0, 100).
pub fn rarity_for_roll(roll: f64) -> Rarity {
    if roll < LEGENDARY_ROLL {
        Rarity::Legendary
    } else if roll < EPIC_ROLL {
        Rarity::Epic
    } else if roll < RARE_ROLL {
        Rarity::Rare
    } else {
        Rarity::Uncommon
    }
}

/// Pick a tier, then an item of that tier. Falls back to the whole list
/// when the tier is empty.
fn roll_rare_item<'a>(items: &'a [RareItem], rng: &mut impl Rng) -> Option<&'a RareItem> {
    if items.is_empty() {
        return None;
    }
    let tier = rarity_for_roll(rng.gen_range(0.0..100.0));
    let pool: Vec<&RareItem> = items.iter().filter(|item| item.rarity == tier).collect();
    if pool.is_empty() {
        items.get(rng.gen_range(0..items.len()))
    } else {
        pool.get(rng.gen_range(0..pool.len())).copied()
    }
}

fn value_of(loot: &LootDrop, catalog: &impl Catalog) -> u64 {
    let cargo = loot.cargo.iter().filter_map(|item| {
        catalog
            .commodity(&item.commodity)
            .map(|c| c.base_price.saturating_mul(item.quantity as u64))
    });
    let outfits = loot
        .outfits
        .iter()
        .filter_map(|id| catalog.outfit(id))
        .map(|o| o.price);
    let weapons = loot
        .weapons
        .iter()
        .filter_map(|id| catalog.weapon(id))
        .map(|w| w.price);
    let rares = loot
        .rare_items
        .iter()
        .filter_map(|id| catalog.rare_items().iter().find(|r| &r.id == id))
        .map(|r| r.value);
    cargo
        .chain(outfits)
        .chain(weapons)
        .chain(rares)
        .fold(loot.credits, u64::saturating_add)
}

fn summarize(loot: &LootDrop) -> String {
    if loot.is_empty() {
        return "Nothing salvageable survived.".to_string();
    }
    let mut parts = Vec::new();
    if loot.credits > 0 {
        parts.push(format!("{} credits", loot.credits));
    }
    if !loot.cargo.is_empty() {
        parts.push(format!("{} units of cargo", loot.cargo_units()));
    }
    if !loot.weapons.is_empty() {
        parts.push(plural(loot.weapons.len(), "weapon"));
    }
    if !loot.outfits.is_empty() {
        parts.push(plural(loot.outfits.len(), "outfit"));
    }
    if !loot.rare_items.is_empty() {
        parts.push(plural(loot.rare_items.len(), "rare item"));
    }
    format!("Recovered {}.", parts.join(", "))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
