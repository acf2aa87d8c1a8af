//! Pilot system: runs the decision pipeline for every AI-controlled ship and
//! carries out what it decides.

use hecs::{Entity, World};
use rand::Rng;

use corsair_ai::{decide, AiActionKind, AiState, Contact};
use corsair_core::catalog::Catalog;
use corsair_core::types::{Ship, ShipId, ShipType};

use crate::components::{Combatant, Retreating};
use crate::report::TickReport;
use crate::systems::gunnery::{self, FireOrder, FiredThisTick};
use crate::systems::Roster;

/// Another ship as it stood when a pilot looked around.
struct Sighting<'c> {
    ship: Ship,
    ship_type: &'c ShipType,
    combatant: Combatant,
}

#[allow(clippy::too_many_arguments)]
pub fn run<'c>(
    world: &mut World,
    roster: &Roster,
    catalog: &'c impl Catalog,
    rng: &mut impl Rng,
    fired: &mut FiredThisTick,
    report: &mut TickReport,
    dt: f64,
) {
    let pilots: Vec<(ShipId, Entity)> = roster
        .iter()
        .filter(|(_, entity)| world.get::<&AiState>(**entity).is_ok())
        .map(|(id, entity)| (*id, *entity))
        .collect();

    for (id, entity) in pilots {
        if world.get::<&Retreating>(entity).is_ok() {
            continue;
        }
        let sightings = look_around(world, roster, catalog);
        let Some(own) = sightings.iter().find(|s| s.ship.id == id) else {
            continue;
        };
        if own.ship.is_destroyed() {
            continue;
        }

        let enemies: Vec<Contact<'_>> = sightings
            .iter()
            .filter(|s| own.combatant.side.opposes(s.combatant.side) && !s.ship.is_destroyed())
            .map(|s| contact(own, s))
            .collect();
        let allies: Vec<Contact<'_>> = sightings
            .iter()
            .filter(|s| {
                s.ship.id != id
                    && own.combatant.side.fights_alongside(s.combatant.side)
                    && !s.ship.is_destroyed()
            })
            .map(|s| contact(own, s))
            .collect();

        let Ok(mut ai) = world.get::<&AiState>(entity).map(|ai| (*ai).clone()) else {
            continue;
        };
        let mut actions = decide(
            &mut ai,
            &own.ship,
            own.ship_type,
            &enemies,
            &allies,
            catalog,
            dt,
            rng,
        );
        let accuracy = ai.accuracy_multiplier;
        if let Ok(mut state) = world.get::<&mut AiState>(entity) {
            *state = ai;
        }

        actions.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        for action in actions {
            match action.kind {
                AiActionKind::Fire { mount, target, .. } => {
                    let order = FireOrder {
                        attacker: id,
                        mount,
                        target,
                        accuracy,
                    };
                    match gunnery::execute(world, roster, catalog, rng, fired, order) {
                        Ok(shot) if shot.result.fired => report.shots.push(shot),
                        Ok(_) => {}
                        Err(reason) => tracing::trace!(ship = %id, %reason, "fire order dropped"),
                    }
                }
                AiActionKind::Retreat => {
                    if world.insert_one(entity, Retreating).is_ok() {
                        tracing::info!(ship = %id, "breaking off");
                    }
                }
                AiActionKind::Target { .. }
                | AiActionKind::Evade
                | AiActionKind::HoldFormation { .. } => {
                    tracing::trace!(ship = %id, action = ?action.kind, "manoeuvre");
                }
            }
        }
    }
}

fn look_around<'c>(world: &World, roster: &Roster, catalog: &'c impl Catalog) -> Vec<Sighting<'c>> {
    roster
        .values()
        .filter_map(|&entity| {
            let ship = (*world.get::<&Ship>(entity).ok()?).clone();
            let combatant = (*world.get::<&Combatant>(entity).ok()?).clone();
            let ship_type = catalog.ship_type(&ship.ship_type)?;
            Some(Sighting {
                ship,
                ship_type,
                combatant,
            })
        })
        .collect()
}

fn contact<'a>(own: &Sighting<'_>, other: &'a Sighting<'_>) -> Contact<'a> {
    Contact {
        ship: &other.ship,
        ship_type: other.ship_type,
        distance: own.combatant.range_to(&other.combatant),
    }
}
