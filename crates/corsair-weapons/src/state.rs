//! Per-weapon runtime state: cooldown and magazine.
//!
//! Each mounted weapon cycles Ready -> Cooling -> Ready as ticks pass.
//! Ammo weapons may also sit Empty, which only `reload` clears.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use corsair_core::catalog::Catalog;
use corsair_core::types::{Ship, Weapon, WeaponId};

/// Mutable state of one mounted weapon for the length of a combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRuntimeState {
    pub weapon_id: WeaponId,
    /// Index of the weapon in the carrying ship's mount list.
    pub mount: usize,
    pub current_ammo: u32,
    /// Seconds until the weapon can discharge again.
    pub cooldown_remaining: f64,
}

impl WeaponRuntimeState {
    /// A loaded, ready weapon.
    pub fn new(weapon: &Weapon) -> Self {
        Self::mounted(weapon, 0)
    }

    pub fn mounted(weapon: &Weapon, mount: usize) -> Self {
        Self {
            weapon_id: weapon.id.clone(),
            mount,
            current_ammo: weapon.ammo_capacity,
            cooldown_remaining: 0.0,
        }
    }
}

/// Why a weapon cannot discharge right now.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireBlocked {
    #[error("cooling down")]
    CoolingDown,
    #[error("out of ammo")]
    OutOfAmmo,
}

/// Weapon state machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    Ready,
    Cooling,
    /// Magazine empty. Stays here until reloaded, even after cooling.
    Empty,
}

pub fn can_fire(weapon: &Weapon, state: &WeaponRuntimeState) -> Result<(), FireBlocked> {
    if state.cooldown_remaining > 0.0 {
        return Err(FireBlocked::CoolingDown);
    }
    if weapon.is_ammo_limited() && state.current_ammo == 0 {
        return Err(FireBlocked::OutOfAmmo);
    }
    Ok(())
}

pub fn readiness(weapon: &Weapon, state: &WeaponRuntimeState) -> Readiness {
    if weapon.is_ammo_limited() && state.current_ammo == 0 {
        Readiness::Empty
    } else if state.cooldown_remaining > 0.0 {
        Readiness::Cooling
    } else {
        Readiness::Ready
    }
}

/// Advance every weapon's cooldown by `dt` seconds, flooring at zero.
pub fn update_cooldowns(states: &mut [WeaponRuntimeState], dt: f64) {
    for state in states.iter_mut() {
        state.cooldown_remaining = (state.cooldown_remaining - dt).max(0.0);
    }
}

/// Refill the magazine. Only meaningful between encounters.
pub fn reload(weapon: &Weapon, state: &mut WeaponRuntimeState) {
    state.current_ammo = weapon.ammo_capacity;
}

/// One runtime state per equipped weapon, in mount order.
/// Weapons missing from the catalog are skipped.
pub fn loadout_for(ship: &Ship, catalog: &impl Catalog) -> Vec<WeaponRuntimeState> {
    ship.weapons
        .iter()
        .enumerate()
        .filter_map(|(mount, id)| match catalog.weapon(id) {
            Some(weapon) => Some(WeaponRuntimeState::mounted(weapon, mount)),
            None => {
                tracing::warn!(ship = %ship.id, weapon = %id, "unknown weapon skipped");
                None
            }
        })
        .collect()
}
