//! Cleanup system: destroyed ships leave the world as kill records.

use hecs::{Entity, World};

use corsair_core::types::Ship;

use crate::components::{Combatant, LastHitBy};
use crate::report::{KillRecord, TickReport};
use crate::systems::Roster;

/// Collect every ship at zero hull into `report.kills`, then despawn them.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    roster: &mut Roster,
    despawn_buffer: &mut Vec<Entity>,
    report: &mut TickReport,
) {
    despawn_buffer.clear();

    for &entity in roster.values() {
        let Ok(ship) = world.get::<&Ship>(entity) else {
            continue;
        };
        if !ship.is_destroyed() {
            continue;
        }
        let Ok(combatant) = world.get::<&Combatant>(entity) else {
            continue;
        };
        let last_hit = world.get::<&LastHitBy>(entity).ok();
        let kill = KillRecord {
            tick: report.tick,
            victim: (*ship).clone(),
            victim_side: combatant.side,
            victim_faction: combatant.faction.clone(),
            victim_bounty: combatant.bounty,
            killer: last_hit.as_ref().map(|hit| hit.ship),
            killer_player: last_hit.as_ref().and_then(|hit| hit.player.clone()),
        };
        tracing::info!(
            victim = %kill.victim.id,
            side = ?kill.victim_side,
            killer = ?kill.killer,
            "ship destroyed"
        );
        report.kills.push(kill);
        despawn_buffer.push(entity);
    }

    roster.retain(|_, entity| !despawn_buffer.contains(entity));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
