//! Encounter engine: one combat instance.
//!
//! `Encounter` owns the hecs world holding every ship in the fight, processes
//! queued commands, runs the systems, and produces a `TickReport` per tick.
//! The catalog is borrowed for the lifetime of the encounter.

use std::collections::VecDeque;

use hecs::{Component, Entity, World};

use corsair_ai::AiState;
use corsair_core::catalog::Catalog;
use corsair_core::rng::{seeded, CombatRng};
use corsair_core::types::{Ship, ShipId};
use corsair_weapons::{loadout_for, reload};

use crate::commands::{CombatCommand, CommandRejected};
use crate::components::{Combatant, Loadout, Retreating, Side};
use crate::config::EncounterConfig;
use crate::error::EncounterError;
use crate::report::{RejectedCommand, TickReport};
use crate::systems;
use crate::systems::gunnery::{FireOrder, FiredThisTick};
use crate::systems::retreat::RetreatParams;
use crate::systems::Roster;

/// The encounter engine. Owns the ECS world and all combat state.
pub struct Encounter<'c, C: Catalog> {
    pub(crate) world: World,
    pub(crate) catalog: &'c C,
    pub(crate) rng: CombatRng,
    config: EncounterConfig,
    tick: u64,
    roster: Roster,
    command_queue: VecDeque<CombatCommand>,
    despawn_buffer: Vec<Entity>,
    report: TickReport,
}

impl<'c, C: Catalog> Encounter<'c, C> {
    /// Create an empty encounter. Ships are added with `spawn`.
    pub fn new(config: EncounterConfig, catalog: &'c C) -> Result<Self, EncounterError> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            catalog,
            rng: seeded(config.seed),
            config,
            tick: 0,
            roster: Roster::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            report: TickReport::default(),
        })
    }

    /// Put a ship into the fight with a full magazine in every mount.
    /// Ships with an `AiState` fly themselves; the rest wait for commands.
    pub fn spawn(
        &mut self,
        ship: Ship,
        combatant: Combatant,
        ai: Option<AiState>,
    ) -> Result<Entity, EncounterError> {
        let id = ship.id;
        if self.roster.contains_key(&id) {
            return Err(EncounterError::DuplicateShip(id));
        }
        if self.catalog.ship_type(&ship.ship_type).is_none() {
            return Err(EncounterError::UnknownShipType {
                ship: id,
                ship_type: ship.ship_type,
            });
        }

        let loadout = Loadout(loadout_for(&ship, self.catalog));
        tracing::debug!(
            ship = %id,
            side = ?combatant.side,
            standoff = combatant.standoff,
            mounts = loadout.0.len(),
            ai = ai.is_some(),
            "spawned"
        );
        let entity = match ai {
            Some(ai) => self.world.spawn((ship, combatant, loadout, ai)),
            None => self.world.spawn((ship, combatant, loadout)),
        };
        self.roster.insert(id, entity);
        Ok(entity)
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: CombatCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = CombatCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the encounter by one tick and report what happened.
    pub fn tick(&mut self) -> TickReport {
        self.report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };
        let mut fired = FiredThisTick::new();

        self.process_commands(&mut fired);
        self.run_systems(&mut fired);

        self.tick += 1;
        self.report.time_secs = self.time_secs();
        std::mem::take(&mut self.report)
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Encounter clock in seconds.
    pub fn time_secs(&self) -> f64 {
        self.tick as f64 * self.config.tick_secs
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Ids of the ships still in the fight, ascending.
    pub fn ship_ids(&self) -> Vec<ShipId> {
        self.roster.keys().copied().collect()
    }

    pub fn ship(&self, id: ShipId) -> Option<Ship> {
        self.component(id)
    }

    pub fn combatant(&self, id: ShipId) -> Option<Combatant> {
        self.component(id)
    }

    pub fn ai_state(&self, id: ShipId) -> Option<AiState> {
        self.component(id)
    }

    pub fn loadout(&self, id: ShipId) -> Option<Loadout> {
        self.component(id)
    }

    /// True while a player-side ship and a hostile ship are both still flying.
    pub fn hostilities_active(&self) -> bool {
        let mut friendly = false;
        let mut hostile = false;
        for &entity in self.roster.values() {
            let (Ok(ship), Ok(combatant)) = (
                self.world.get::<&Ship>(entity),
                self.world.get::<&Combatant>(entity),
            ) else {
                continue;
            };
            if ship.is_destroyed() {
                continue;
            }
            friendly |= combatant.side.is_friendly();
            hostile |= combatant.side == Side::Hostile;
        }
        friendly && hostile
    }

    /// The fight is over once one side has been destroyed or has left.
    pub fn is_over(&self) -> bool {
        !self.hostilities_active()
    }

    pub(crate) fn entity(&self, id: ShipId) -> Option<Entity> {
        self.roster.get(&id).copied()
    }

    fn component<T: Component + Clone>(&self, id: ShipId) -> Option<T> {
        let entity = self.entity(id)?;
        let component = self.world.get::<&T>(entity).ok()?;
        Some((*component).clone())
    }

    /// Process all queued commands.
    fn process_commands(&mut self, fired: &mut FiredThisTick) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(reason) = self.handle_command(&command, fired) {
                tracing::warn!(?command, %reason, "command rejected");
                self.report
                    .rejected
                    .push(RejectedCommand { command, reason });
            }
        }
    }

    /// Handle a single command.
    fn handle_command(
        &mut self,
        command: &CombatCommand,
        fired: &mut FiredThisTick,
    ) -> Result<(), CommandRejected> {
        match *command {
            CombatCommand::Fire {
                attacker,
                mount,
                target,
            } => {
                let order = FireOrder {
                    attacker,
                    mount,
                    target,
                    accuracy: 1.0,
                };
                let shot = systems::gunnery::execute(
                    &mut self.world,
                    &self.roster,
                    self.catalog,
                    &mut self.rng,
                    fired,
                    order,
                )?;
                self.report.shots.push(shot);
            }
            CombatCommand::Reload { ship } => {
                if self.hostilities_active() {
                    return Err(CommandRejected::HostilitiesActive);
                }
                let entity = self.entity_or_reject(ship)?;
                let mut loadout = self
                    .world
                    .get::<&mut Loadout>(entity)
                    .map_err(|_| CommandRejected::UnknownShip(ship))?;
                for state in loadout.0.iter_mut() {
                    if let Some(weapon) = self.catalog.weapon(&state.weapon_id) {
                        reload(weapon, state);
                    }
                }
                tracing::info!(ship = %ship, "reloaded");
            }
            CombatCommand::Disengage { ship } => {
                let entity = self.entity_or_reject(ship)?;
                let destroyed = self
                    .world
                    .get::<&Ship>(entity)
                    .map_err(|_| CommandRejected::UnknownShip(ship))?
                    .is_destroyed();
                if destroyed {
                    return Err(CommandRejected::Destroyed(ship));
                }
                if let Ok(mut ai) = self.world.get::<&mut AiState>(entity) {
                    ai.is_retreating = true;
                }
                self.world
                    .insert_one(entity, Retreating)
                    .map_err(|_| CommandRejected::UnknownShip(ship))?;
                tracing::info!(ship = %ship, "disengaging");
            }
        }
        Ok(())
    }

    fn entity_or_reject(&self, id: ShipId) -> Result<Entity, CommandRejected> {
        self.roster
            .get(&id)
            .copied()
            .ok_or(CommandRejected::UnknownShip(id))
    }

    /// Run all systems in order.
    fn run_systems(&mut self, fired: &mut FiredThisTick) {
        let dt = self.config.tick_secs;
        // 1. Weapon cooldowns
        systems::cooldowns::run(&mut self.world, dt);
        // 2. AI pilots (targeting, fire, evasion, retreat decisions)
        systems::pilots::run(
            &mut self.world,
            &self.roster,
            self.catalog,
            &mut self.rng,
            fired,
            &mut self.report,
            dt,
        );
        // 3. Retreat movement and escapes
        systems::retreat::run(
            &mut self.world,
            &mut self.roster,
            &mut self.despawn_buffer,
            RetreatParams {
                speed: self.config.retreat_speed,
                escape_range: self.config.escape_range,
                dt,
            },
            &mut self.report,
        );
        // 4. Cleanup (destroyed ships become kill records)
        systems::cleanup::run(
            &mut self.world,
            &mut self.roster,
            &mut self.despawn_buffer,
            &mut self.report,
        );
    }
}
