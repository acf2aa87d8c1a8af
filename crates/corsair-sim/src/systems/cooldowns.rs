//! Cooldown system: every mounted weapon recovers by one tick's worth.

use hecs::World;

use crate::components::Loadout;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, loadout) in world.query_mut::<&mut Loadout>() {
        corsair_weapons::update_cooldowns(&mut loadout.0, dt);
    }
}
