//! Shot resolution: hit chance, hit and critical rolls, shield/hull damage split.

use rand::Rng;
use serde::{Deserialize, Serialize};

use corsair_core::constants::*;
use corsair_core::types::{Ship, ShipType, Weapon};

use crate::state::{can_fire, FireBlocked, WeaponRuntimeState};

/// Outcome of one trigger pull.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireResult {
    /// False when the weapon was blocked and nothing was discharged.
    pub fired: bool,
    pub hit: bool,
    pub critical: bool,
    /// Hit chance the roll was made against (percent).
    pub hit_chance: f64,
    /// Damage dealt after the critical multiplier, zero on a miss.
    pub damage: u32,
    pub shield_damage: u32,
    pub hull_damage: u32,
    pub target_destroyed: bool,
    pub blocked: Option<FireBlocked>,
    pub message: String,
}

impl FireResult {
    fn blocked(weapon: &Weapon, reason: FireBlocked) -> Self {
        Self {
            fired: false,
            hit: false,
            critical: false,
            hit_chance: 0.0,
            damage: 0,
            shield_damage: 0,
            hull_damage: 0,
            target_destroyed: false,
            blocked: Some(reason),
            message: format!("{} cannot fire: {reason}", weapon.name),
        }
    }
}

/// The two uniform draws behind a shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRoll {
    /// Uniform in [0, 100). Hits when not above the hit chance.
    pub hit_roll: f64,
    /// Uniform in [0, 1). Critical when below `CRITICAL_CHANCE`.
    pub crit_roll: f64,
}

impl ShotRoll {
    pub fn draw(rng: &mut impl Rng) -> Self {
        Self {
            hit_roll: rng.gen_range(0.0..100.0),
            crit_roll: rng.gen::<f64>(),
        }
    }
}

/// How a hit's damage was absorbed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSplit {
    pub shield_damage: u32,
    pub hull_damage: u32,
}

/// Percent chance to hit, clamped to [5, 95].
///
/// Base accuracy loses a point per 100 units beyond optimal range and two per
/// point of target maneuverability, and gains half a point per point of
/// attacker maneuverability.
pub fn hit_chance(
    weapon: &Weapon,
    attacker_type: &ShipType,
    target_type: &ShipType,
    distance: f64,
) -> f64 {
    raw_hit_chance(weapon, attacker_type, target_type, distance)
        .clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

fn raw_hit_chance(
    weapon: &Weapon,
    attacker_type: &ShipType,
    target_type: &ShipType,
    distance: f64,
) -> f64 {
    let range_penalty = (distance - weapon.range).max(0.0) / RANGE_PENALTY_DIVISOR;
    let evasion = target_type.maneuverability * EVASION_PER_MANEUVERABILITY;
    let aim = attacker_type.maneuverability * AIM_PER_MANEUVERABILITY;
    let chance = weapon.accuracy - range_penalty - evasion + aim;
    // NaN inputs would slip through clamp.
    if chance.is_nan() {
        MIN_HIT_CHANCE
    } else {
        chance
    }
}

/// Discharge `weapon` at `target`. Mutates the target and the weapon state.
pub fn fire(
    weapon: &Weapon,
    state: &mut WeaponRuntimeState,
    target: &mut Ship,
    attacker_type: &ShipType,
    target_type: &ShipType,
    distance: f64,
    rng: &mut impl Rng,
) -> FireResult {
    fire_with_accuracy(
        weapon,
        state,
        target,
        attacker_type,
        target_type,
        distance,
        1.0,
        rng,
    )
}

/// `fire` with the hit chance scaled by the shooter's accuracy multiplier
/// before clamping.
#[allow(clippy::too_many_arguments)]
pub fn fire_with_accuracy(
    weapon: &Weapon,
    state: &mut WeaponRuntimeState,
    target: &mut Ship,
    attacker_type: &ShipType,
    target_type: &ShipType,
    distance: f64,
    accuracy_multiplier: f64,
    rng: &mut impl Rng,
) -> FireResult {
    if let Err(reason) = can_fire(weapon, state) {
        return FireResult::blocked(weapon, reason);
    }

    let chance = (raw_hit_chance(weapon, attacker_type, target_type, distance)
        * accuracy_multiplier)
        .clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE);
    let roll = ShotRoll::draw(rng);
    resolve_shot(weapon, state, target, chance, roll)
}

/// Resolve a shot against fixed rolls.
pub fn resolve_shot(
    weapon: &Weapon,
    state: &mut WeaponRuntimeState,
    target: &mut Ship,
    hit_chance: f64,
    roll: ShotRoll,
) -> FireResult {
    if let Err(reason) = can_fire(weapon, state) {
        return FireResult::blocked(weapon, reason);
    }

    state.cooldown_remaining = weapon.cooldown.max(0.0);
    if weapon.is_ammo_limited() {
        state.current_ammo = state.current_ammo.saturating_sub(weapon.ammo_consumption());
    }

    if roll.hit_roll > hit_chance {
        tracing::debug!(weapon = %weapon.id, target = %target.id, hit_chance, "miss");
        return FireResult {
            fired: true,
            hit: false,
            critical: false,
            hit_chance,
            damage: 0,
            shield_damage: 0,
            hull_damage: 0,
            target_destroyed: target.is_destroyed(),
            blocked: None,
            message: format!("{} missed ({hit_chance:.0}% to hit)", weapon.name),
        };
    }

    let critical = roll.crit_roll < CRITICAL_CHANCE;
    let damage = if critical {
        (weapon.damage as f64 * CRITICAL_MULTIPLIER).floor() as u32
    } else {
        weapon.damage
    };

    let split = apply_damage(target, damage, weapon.shield_penetration);
    let destroyed = target.is_destroyed();

    tracing::debug!(
        weapon = %weapon.id,
        target = %target.id,
        damage,
        critical,
        shield_damage = split.shield_damage,
        hull_damage = split.hull_damage,
        "hit"
    );

    let mut message = format!(
        "{} hit for {damage} ({} shields, {} hull)",
        weapon.name, split.shield_damage, split.hull_damage
    );
    if critical {
        message = format!("Critical! {message}");
    }
    if destroyed {
        message.push_str(", target destroyed");
    }

    FireResult {
        fired: true,
        hit: true,
        critical,
        hit_chance,
        damage,
        shield_damage: split.shield_damage,
        hull_damage: split.hull_damage,
        target_destroyed: destroyed,
        blocked: None,
        message,
    }
}

/// Apply `damage` to a ship, letting `penetration` of it bypass shields.
///
/// Shields absorb up to their current value of the non-penetrating part;
/// overflow joins the penetrating part on the hull. Unshielded ships take
/// everything on the hull. Hull floors at zero.
pub fn apply_damage(target: &mut Ship, damage: u32, penetration: f64) -> DamageSplit {
    let penetration = if penetration.is_nan() {
        0.0
    } else {
        penetration.clamp(0.0, 1.0)
    };
    let direct = ((damage as f64 * penetration).floor() as u32).min(damage);
    let shield_part = damage - direct;

    let split = if target.shields > 0 {
        let absorbed = shield_part.min(target.shields);
        let overflow = shield_part - absorbed;
        target.shields -= absorbed;
        DamageSplit {
            shield_damage: absorbed,
            hull_damage: direct + overflow,
        }
    } else {
        DamageSplit {
            shield_damage: 0,
            hull_damage: damage,
        }
    };

    target.hull = target.hull.saturating_sub(split.hull_damage);
    split
}
