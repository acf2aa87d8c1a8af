//! Retreat system: retreating ships open the range from the nearest enemy
//! and leave the encounter once they are far enough out.

use hecs::{Entity, World};

use corsair_core::types::{Ship, ShipId};

use crate::components::{Combatant, Retreating, Side};
use crate::report::{EscapeRecord, TickReport};
use crate::systems::Roster;

/// How fast and how far a ship has to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetreatParams {
    pub speed: f64,
    pub escape_range: f64,
    pub dt: f64,
}

pub fn run(
    world: &mut World,
    roster: &mut Roster,
    despawn_buffer: &mut Vec<Entity>,
    params: RetreatParams,
    report: &mut TickReport,
) {
    despawn_buffer.clear();

    let runners: Vec<(ShipId, Entity)> = roster
        .iter()
        .filter(|(_, entity)| world.get::<&Retreating>(**entity).is_ok())
        .map(|(id, entity)| (*id, *entity))
        .collect();

    for (id, entity) in runners {
        let Some((side, standoff)) = runner(world, entity) else {
            continue;
        };
        let nearest = roster
            .values()
            .filter(|&&other| other != entity)
            .filter_map(|&other| {
                let ship = world.get::<&Ship>(other).ok()?;
                let combatant = world.get::<&Combatant>(other).ok()?;
                (side.opposes(combatant.side) && !ship.is_destroyed()).then_some(combatant.standoff)
            })
            .min_by(|a, b| (a - standoff).abs().total_cmp(&(b - standoff).abs()));

        let moved = match nearest {
            Some(enemy) => {
                let away = if standoff >= enemy { 1.0 } else { -1.0 };
                standoff + away * params.speed * params.dt
            }
            None => standoff,
        };
        if let Ok(mut combatant) = world.get::<&mut Combatant>(entity) {
            combatant.standoff = moved;
        }

        let range = nearest.map(|enemy| (moved - enemy).abs());
        if range.map_or(true, |r| r >= params.escape_range) {
            tracing::info!(ship = %id, ?side, ?range, "escaped");
            report.escapes.push(EscapeRecord {
                tick: report.tick,
                ship: id,
                side,
                range,
            });
            despawn_buffer.push(entity);
        }
    }

    roster.retain(|_, entity| !despawn_buffer.contains(entity));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Side and standoff of a retreating ship that is still flying.
fn runner(world: &World, entity: Entity) -> Option<(Side, f64)> {
    let ship = world.get::<&Ship>(entity).ok()?;
    if ship.is_destroyed() {
        return None;
    }
    let combatant = world.get::<&Combatant>(entity).ok()?;
    Some((combatant.side, combatant.standoff))
}
