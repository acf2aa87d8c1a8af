//! Shot execution shared by player commands and AI pilots.

use std::collections::BTreeSet;

use hecs::World;
use rand::Rng;

use corsair_core::catalog::Catalog;
use corsair_core::types::{Ship, ShipId};
use corsair_weapons::fire_with_accuracy;

use crate::commands::CommandRejected;
use crate::components::{Combatant, LastHitBy, Loadout};
use crate::report::ShotReport;
use crate::systems::Roster;

/// One trigger pull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOrder {
    pub attacker: ShipId,
    pub mount: usize,
    pub target: ShipId,
    /// Scales the hit chance before clamping. 1.0 for human shooters.
    pub accuracy: f64,
}

/// Mounts that have already discharged this tick.
pub type FiredThisTick = BTreeSet<(ShipId, usize)>;

/// Resolve `order` against the world.
///
/// A weapon that is cooling down or empty still yields a report with
/// `fired == false`; structural problems (unknown ships, missing mounts,
/// dead ships) are rejected outright and nothing changes.
pub fn execute(
    world: &mut World,
    roster: &Roster,
    catalog: &impl Catalog,
    rng: &mut impl Rng,
    fired: &mut FiredThisTick,
    order: FireOrder,
) -> Result<ShotReport, CommandRejected> {
    let FireOrder {
        attacker,
        mount,
        target,
        accuracy,
    } = order;

    if attacker == target {
        return Err(CommandRejected::SelfTarget(attacker));
    }
    let attacker_entity = *roster
        .get(&attacker)
        .ok_or(CommandRejected::UnknownShip(attacker))?;
    let target_entity = *roster
        .get(&target)
        .ok_or(CommandRejected::UnknownShip(target))?;
    if fired.contains(&(attacker, mount)) {
        return Err(CommandRejected::AlreadyFired {
            ship: attacker,
            mount,
        });
    }

    let (attacker_type_id, attacker_player, attacker_standoff) = {
        let ship = world
            .get::<&Ship>(attacker_entity)
            .map_err(|_| CommandRejected::UnknownShip(attacker))?;
        if ship.is_destroyed() {
            return Err(CommandRejected::Destroyed(attacker));
        }
        let combatant = world
            .get::<&Combatant>(attacker_entity)
            .map_err(|_| CommandRejected::UnknownShip(attacker))?;
        (
            ship.ship_type.clone(),
            combatant.player.clone(),
            combatant.standoff,
        )
    };
    let attacker_type = catalog
        .ship_type(&attacker_type_id)
        .ok_or(CommandRejected::UnknownShipType(attacker_type_id))?;

    let target_standoff = world
        .get::<&Combatant>(target_entity)
        .map_err(|_| CommandRejected::UnknownShip(target))?
        .standoff;
    let distance = (attacker_standoff - target_standoff).abs();

    let report = {
        let mut loadout = world
            .get::<&mut Loadout>(attacker_entity)
            .map_err(|_| CommandRejected::UnknownShip(attacker))?;
        let no_mount = CommandRejected::NoSuchMount {
            ship: attacker,
            mount,
        };
        let state = loadout.mount_mut(mount).ok_or_else(|| no_mount.clone())?;
        let weapon = catalog.weapon(&state.weapon_id).ok_or(no_mount)?;

        let mut target_ship = world
            .get::<&mut Ship>(target_entity)
            .map_err(|_| CommandRejected::UnknownShip(target))?;
        if target_ship.is_destroyed() {
            return Err(CommandRejected::Destroyed(target));
        }
        let target_type = catalog
            .ship_type(&target_ship.ship_type)
            .ok_or_else(|| CommandRejected::UnknownShipType(target_ship.ship_type.clone()))?;

        let result = fire_with_accuracy(
            weapon,
            state,
            &mut target_ship,
            attacker_type,
            target_type,
            distance,
            accuracy,
            rng,
        );
        ShotReport {
            attacker,
            target,
            mount,
            weapon: weapon.id.clone(),
            result,
        }
    };

    if report.result.fired {
        fired.insert((attacker, mount));
        tracing::debug!(
            attacker = %attacker,
            target = %target,
            weapon = %report.weapon,
            hit = report.result.hit,
            damage = report.result.damage,
            "shot"
        );
    }
    if report.result.hit {
        // The target entity was just borrowed, so it is alive.
        let _ = world.insert_one(
            target_entity,
            LastHitBy {
                ship: attacker,
                player: attacker_player,
            },
        );
    }
    Ok(report)
}
