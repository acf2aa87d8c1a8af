//! Hold-space accounting and atomic loot pickup.

use corsair_core::constants::*;
use corsair_core::types::{HoldItem, Ship, ShipType};

use crate::error::LootError;
use crate::generator::LootDrop;

pub fn hold_item_tons(item: &HoldItem) -> u32 {
    match item {
        HoldItem::Weapon(_) => WEAPON_TONS,
        HoldItem::Outfit(_) => OUTFIT_TONS,
        HoldItem::Rare(_) => RARE_ITEM_TONS,
    }
}

/// Tons needed to take everything in `loot` aboard. Saturates at `u32::MAX`.
pub fn cargo_space_required(loot: &LootDrop) -> u32 {
    cargo_tons(loot.cargo_units())
        .saturating_add(item_tons(loot.weapons.len(), WEAPON_TONS))
        .saturating_add(item_tons(loot.outfits.len(), OUTFIT_TONS))
        .saturating_add(item_tons(loot.rare_items.len(), RARE_ITEM_TONS))
}

fn cargo_tons(units: u32) -> u32 {
    units.saturating_mul(CARGO_TONS_PER_UNIT)
}

fn item_tons(count: usize, tons_each: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(tons_each)
}

/// Capacity left after cargo and stowed items.
pub fn free_space(ship: &Ship, ship_type: &ShipType) -> u32 {
    let stowed = ship
        .hold
        .iter()
        .fold(0u32, |total, item| total.saturating_add(hold_item_tons(item)));
    let used = cargo_tons(ship.cargo_units()).saturating_add(stowed);
    ship_type.cargo_capacity.saturating_sub(used)
}

pub fn can_carry_loot(ship: &Ship, ship_type: &ShipType, loot: &LootDrop) -> bool {
    cargo_space_required(loot) <= free_space(ship, ship_type)
}

/// Take `loot` aboard: cargo joins the hold's commodities, items are stowed.
/// Returns the credits to pay out. Either everything fits or nothing changes.
pub fn apply_loot(
    ship: &mut Ship,
    ship_type: &ShipType,
    loot: &LootDrop,
) -> Result<u64, LootError> {
    let required = cargo_space_required(loot);
    let available = free_space(ship, ship_type);
    if required > available {
        tracing::debug!(ship = %ship.id, required, available, "loot rejected");
        return Err(LootError::InsufficientSpace {
            required,
            available,
        });
    }

    for item in &loot.cargo {
        let stack = ship.cargo.entry(item.commodity.clone()).or_insert(0);
        *stack = stack.saturating_add(item.quantity);
    }
    ship.hold.extend(loot.weapons.iter().cloned().map(HoldItem::Weapon));
    ship.hold.extend(loot.outfits.iter().cloned().map(HoldItem::Outfit));
    ship.hold.extend(loot.rare_items.iter().cloned().map(HoldItem::Rare));

    Ok(loot.credits)
}
