//! Per-tick decision pipeline for AI-controlled ships.
//!
//! Pure functions over caller-owned state. The caller sequences the returned
//! actions and rate-limits execution (one shot per weapon per tick).
//! Nothing here touches the entity world.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use corsair_core::catalog::Catalog;
use corsair_core::constants::*;
use corsair_core::enums::AiLevel;
use corsair_core::types::{Ship, ShipId, ShipType, Weapon, WeaponId};
use corsair_weapons::hit_chance;

use crate::profiles::{get_profile, AiProfile};

/// Assigned position in a formation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub position: DVec2,
}

/// Mutable AI state for one ship, owned by whoever drives its combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiState {
    pub level: AiLevel,
    pub aggression: f64,
    pub accuracy_multiplier: f64,
    pub reaction_time: f64,
    pub current_target: Option<ShipId>,
    /// Seconds since the target was last evaluated.
    pub last_target_check: f64,
    pub is_retreating: bool,
    /// Willingness to keep fighting (0-1).
    pub morale: f64,
    pub formation: Option<FormationSlot>,
}

impl AiState {
    pub fn new(level: AiLevel) -> Self {
        let profile = get_profile(level);
        Self {
            level,
            aggression: profile.aggression,
            accuracy_multiplier: profile.accuracy_multiplier,
            reaction_time: profile.reaction_time,
            current_target: None,
            last_target_check: 0.0,
            is_retreating: false,
            morale: 1.0,
            formation: None,
        }
    }

    pub fn with_formation(mut self, position: DVec2) -> Self {
        self.formation = Some(FormationSlot { position });
        self
    }
}

/// Another ship as seen from the deciding ship.
#[derive(Debug, Clone, Copy)]
pub struct Contact<'a> {
    pub ship: &'a Ship,
    pub ship_type: &'a ShipType,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AiActionKind {
    Target {
        target: ShipId,
    },
    Fire {
        /// Index into the ship's weapon mounts.
        mount: usize,
        weapon: WeaponId,
        target: ShipId,
    },
    Evade,
    Retreat,
    HoldFormation {
        position: DVec2,
    },
}

/// An intent with a priority in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAction {
    pub kind: AiActionKind,
    pub priority: f64,
}

impl AiAction {
    fn new(kind: AiActionKind, priority: f64) -> Self {
        Self {
            kind,
            priority: priority.clamp(0.0, 1.0),
        }
    }
}

/// Run the decision pipeline for one ship for one tick.
///
/// Retreat short-circuits everything after it. Otherwise the result holds an
/// optional retarget, fire intents for the current target, an optional
/// evade, and an optional formation hold.
#[allow(clippy::too_many_arguments)]
pub fn decide(
    ai: &mut AiState,
    own: &Ship,
    own_type: &ShipType,
    enemies: &[Contact<'_>],
    allies: &[Contact<'_>],
    catalog: &impl Catalog,
    dt: f64,
    rng: &mut impl Rng,
) -> Vec<AiAction> {
    let profile = get_profile(ai.level);
    let hull = own.hull_fraction(own_type);

    update_morale(ai, &profile, hull);

    let living = enemies.iter().filter(|c| !c.ship.is_destroyed()).count();
    if should_retreat(ai, &profile, hull, living) {
        if !ai.is_retreating {
            tracing::debug!(ship = %own.id, hull, morale = ai.morale, "retreating");
        }
        ai.is_retreating = true;
        return vec![AiAction::new(AiActionKind::Retreat, PRIORITY_RETREAT)];
    }

    let mut actions = Vec::new();

    ai.last_target_check += dt;
    if needs_target_check(ai, enemies) {
        let previous = ai.current_target;
        ai.current_target = select_target(ai, &profile, enemies, rng);
        ai.last_target_check = 0.0;
        if let Some(target) = ai.current_target {
            if previous != Some(target) {
                tracing::debug!(ship = %own.id, target = %target, "new target");
                actions.push(AiAction::new(
                    AiActionKind::Target { target },
                    PRIORITY_RETARGET,
                ));
            }
        }
    }

    if let Some(target) = ai
        .current_target
        .and_then(|id| enemies.iter().find(|c| c.ship.id == id))
    {
        actions.extend(select_weapons(&profile, own, own_type, target, catalog));
    }

    if let Some(priority) = evasion(&profile, own, own_type, rng) {
        actions.push(AiAction::new(AiActionKind::Evade, priority));
    }

    if let Some(slot) = ai.formation {
        if !allies.is_empty() {
            actions.push(AiAction::new(
                AiActionKind::HoldFormation {
                    position: slot.position,
                },
                PRIORITY_FORMATION,
            ));
        }
    }

    actions
}

/// Drift morale toward the hull fraction without overshooting it.
fn update_morale(ai: &mut AiState, profile: &AiProfile, target: f64) {
    let mut morale = if ai.morale > target {
        (ai.morale - MORALE_DECAY_PER_TICK).max(target)
    } else if ai.morale < target {
        (ai.morale + MORALE_RECOVERY_PER_TICK).min(target)
    } else {
        ai.morale
    };
    if let Some(floor) = profile.morale_floor {
        morale = morale.max(floor);
    }
    ai.morale = morale.clamp(0.0, 1.0);
}

fn should_retreat(ai: &AiState, profile: &AiProfile, hull: f64, enemy_count: usize) -> bool {
    if ai.is_retreating || ai.morale < RETREAT_MORALE || hull < RETREAT_HULL {
        return true;
    }
    if enemy_count > OUTNUMBERED_ENEMY_COUNT && hull < OUTNUMBERED_RETREAT_HULL {
        return true;
    }
    hull < profile.retreat.hull_below && enemy_count >= profile.retreat.min_enemies
}

fn needs_target_check(ai: &AiState, enemies: &[Contact<'_>]) -> bool {
    let Some(current) = ai.current_target else {
        return true;
    };
    let alive = enemies
        .iter()
        .any(|c| c.ship.id == current && !c.ship.is_destroyed());
    !alive || ai.last_target_check >= TARGET_RECHECK_SECS
}

/// Highest-scoring living enemy. Ties keep the earlier contact.
fn select_target(
    ai: &AiState,
    profile: &AiProfile,
    enemies: &[Contact<'_>],
    rng: &mut impl Rng,
) -> Option<ShipId> {
    let mut best: Option<(ShipId, f64)> = None;
    for contact in enemies.iter().filter(|c| !c.ship.is_destroyed()) {
        let jitter = if profile.target_jitter > 0.0 {
            rng.gen_range(0.0..profile.target_jitter)
        } else {
            0.0
        };
        let score = target_score(ai.aggression, contact) + jitter;
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((contact.ship.id, score));
        }
    }
    best.map(|(id, _)| id)
}

/// Damaged and dangerous ships score higher. Excludes the random term.
pub fn target_score(aggression: f64, contact: &Contact<'_>) -> f64 {
    let hull = contact.ship.hull_fraction(contact.ship_type);
    let shields = contact.ship.shield_fraction(contact.ship_type);
    let threat = TARGET_WEAPON_WEIGHT * contact.ship.weapons.len() as f64
        + contact.ship_type.max_hull as f64 / TARGET_HULL_SIZE_DIVISOR;
    TARGET_HULL_WEIGHT * (1.0 - hull) + TARGET_SHIELD_WEIGHT * (1.0 - shields) + aggression * threat
}

fn select_weapons(
    profile: &AiProfile,
    own: &Ship,
    own_type: &ShipType,
    target: &Contact<'_>,
    catalog: &impl Catalog,
) -> Vec<AiAction> {
    let target_hull = target.ship.hull_fraction(target.ship_type);
    let strong_shields = target.ship.shields as f64 > target.ship_type.max_shields as f64 / 2.0;

    own.weapons
        .iter()
        .enumerate()
        .filter_map(|(mount, id)| {
            let weapon = catalog.weapon(id)?;
            if target.distance > weapon.range * MAX_ENGAGEMENT_RANGE_FACTOR {
                return None;
            }
            let in_range = target.distance <= weapon.range;
            if !in_range {
                if let Some(min_chance) = profile.long_range_min_hit_chance {
                    let chance = hit_chance(weapon, own_type, target.ship_type, target.distance);
                    if chance <= min_chance {
                        return None;
                    }
                }
            }
            if profile.conserves_missiles
                && weapon.is_missile()
                && target_hull >= MISSILE_RESERVE_HULL
            {
                return None;
            }
            Some(AiAction::new(
                AiActionKind::Fire {
                    mount,
                    weapon: weapon.id.clone(),
                    target: target.ship.id,
                },
                fire_priority(weapon, in_range, strong_shields),
            ))
        })
        .collect()
}

/// Damage term, plus a range-fit bonus, plus a penetration bonus against strong shields.
pub fn fire_priority(weapon: &Weapon, in_range: bool, strong_shields: bool) -> f64 {
    let damage = (weapon.damage as f64 / FIRE_PRIORITY_DAMAGE_SCALE).min(1.0)
        * FIRE_PRIORITY_DAMAGE_WEIGHT;
    let range_fit = if in_range {
        FIRE_PRIORITY_IN_RANGE
    } else {
        FIRE_PRIORITY_EXTENDED_RANGE
    };
    let penetration = if strong_shields {
        weapon.shield_penetration.clamp(0.0, 1.0) * FIRE_PRIORITY_PENETRATION_WEIGHT
    } else {
        0.0
    };
    (damage + range_fit + penetration).clamp(0.0, 1.0)
}

/// Forced when badly hurt, otherwise a per-level coin flip.
fn evasion(
    profile: &AiProfile,
    own: &Ship,
    own_type: &ShipType,
    rng: &mut impl Rng,
) -> Option<f64> {
    let hull_low = own.hull_fraction(own_type) < EVADE_HULL;
    // Ships without shield generators never count as shields-down.
    let shields_low = own_type.max_shields > 0 && own.shield_fraction(own_type) < EVADE_SHIELDS;
    if hull_low || shields_low {
        return Some(PRIORITY_FORCED_EVADE);
    }
    (rng.gen::<f64>() < profile.evade_chance).then_some(PRIORITY_EVADE)
}
