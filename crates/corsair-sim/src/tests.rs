//! Tests for the encounter engine, its systems, and kill aftermath.

use proptest::prelude::*;

use corsair_ai::AiState;
use corsair_core::enums::{AiLevel, CombatEvent, ShipClass, WeaponKind};
use corsair_core::types::*;
use corsair_core::StaticCatalog;
use corsair_faction::ReputationMap;
use corsair_loot::{CargoItem, LootDrop, LootError};
use corsair_weapons::FireBlocked;

use crate::aftermath::classify;
use crate::commands::{CombatCommand, CommandRejected};
use crate::components::{Combatant, Side};
use crate::config::{ConfigError, EncounterConfig};
use crate::engine::Encounter;
use crate::error::EncounterError;
use crate::report::KillRecord;

// ---- Fixtures ----

fn cutter() -> ShipType {
    ShipType {
        id: "cutter".into(),
        name: "Cutter".into(),
        class: ShipClass::Military,
        max_hull: 100,
        max_shields: 0,
        maneuverability: 0.0,
        price: 100_000,
        cargo_capacity: 20,
        fuel_capacity: 0,
    }
}

/// Soaks up fire without going down.
fn hulk() -> ShipType {
    ShipType {
        id: "hulk".into(),
        name: "Hulk".into(),
        max_hull: 1_000_000,
        ..cutter()
    }
}

fn weapon(id: &str, damage: u32, ammo_capacity: u32) -> Weapon {
    Weapon {
        id: id.into(),
        name: id.to_uppercase(),
        kind: WeaponKind::Railgun,
        damage,
        range: 1000.0,
        accuracy: 100.0,
        cooldown: 1.0,
        shield_penetration: 0.0,
        ammo_capacity,
        ammo_per_shot: 1,
        energy_cost: 0,
        price: 2_000,
    }
}

fn faction(id: &str, enemies: &[&str]) -> Faction {
    Faction {
        id: id.into(),
        name: id.to_uppercase(),
        allies: Vec::new(),
        enemies: enemies.iter().map(|e| FactionId::from(*e)).collect(),
        territory: Vec::new(),
        patrol_strength: 2,
    }
}

fn catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_ship_type(cutter())
        .with_ship_type(hulk())
        .with_weapon(weapon("cannon", 100, 0))
        .with_weapon(weapon("popgun", 10, 0))
        .with_weapon(weapon("torpedo", 20, 1))
        .with_faction(faction("pirates", &["navy"]))
        .with_faction(faction("navy", &["pirates"]))
}

fn cutter_ship(id: u32) -> Ship {
    Ship::from_type(ShipId(id), &cutter())
}

fn hulk_ship(id: u32) -> Ship {
    Ship::from_type(ShipId(id), &hulk())
}

fn encounter(catalog: &StaticCatalog) -> Encounter<'_, StaticCatalog> {
    match Encounter::new(EncounterConfig::default(), catalog) {
        Ok(encounter) => encounter,
        Err(e) => panic!("default config rejected: {e}"),
    }
}

fn fire(attacker: u32, mount: usize, target: u32) -> CombatCommand {
    CombatCommand::Fire {
        attacker: ShipId(attacker),
        mount,
        target: ShipId(target),
    }
}

// ---- Config ----

#[test]
fn test_default_config_is_valid() {
    let config = EncounterConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.tick_secs, 1.0);
    assert_eq!(config.escape_range, 3000.0);
    assert_eq!(config.retreat_speed, 150.0);
}

#[test]
fn test_config_from_toml_fills_defaults() {
    let config = EncounterConfig::from_toml_str("seed = 7\ntick_secs = 0.5\n").unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.tick_secs, 0.5);
    assert_eq!(config.escape_range, 3000.0);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = EncounterConfig::from_toml_str("tick_secs = 0.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "tick_secs", .. }));

    let err = EncounterConfig::from_toml_str("retreat_speed = -1.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "retreat_speed", .. }));

    let err = EncounterConfig::from_toml_str("escape_range = \"far\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));

    let catalog = catalog();
    let config = EncounterConfig {
        tick_secs: f64::NAN,
        ..Default::default()
    };
    assert!(matches!(
        Encounter::new(config, &catalog),
        Err(EncounterError::Config(_))
    ));
}

// ---- Spawning ----

#[test]
fn test_spawn_builds_loadout_from_catalog() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    let ship = cutter_ship(1).with_weapon("ghost").with_weapon("cannon");
    enc.spawn(ship, Combatant::new(Side::Player, 0.0), None).unwrap();

    let loadout = enc.loadout(ShipId(1)).unwrap();
    assert_eq!(loadout.0.len(), 1);
    assert_eq!(loadout.0[0].mount, 1);
    assert_eq!(loadout.0[0].weapon_id, WeaponId::from("cannon"));
    assert_eq!(enc.ship_ids(), vec![ShipId(1)]);
}

#[test]
fn test_spawn_rejects_duplicates_and_unknown_types() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(cutter_ship(1), Combatant::new(Side::Player, 0.0), None)
        .unwrap();

    let dup = enc.spawn(cutter_ship(1), Combatant::new(Side::Hostile, 10.0), None);
    assert!(matches!(dup, Err(EncounterError::DuplicateShip(ShipId(1)))));

    let mut stray = cutter_ship(2);
    stray.ship_type = "dreadnought".into();
    let unknown = enc.spawn(stray, Combatant::new(Side::Hostile, 10.0), None);
    assert!(matches!(unknown, Err(EncounterError::UnknownShipType { .. })));
    assert_eq!(enc.ship_ids(), vec![ShipId(1)]);
}

#[test]
fn test_hostilities_need_both_sides() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    assert!(enc.is_over());
    enc.spawn(cutter_ship(1), Combatant::new(Side::Player, 0.0), None)
        .unwrap();
    enc.spawn(cutter_ship(2), Combatant::new(Side::Neutral, 100.0), None)
        .unwrap();
    assert!(!enc.hostilities_active());
    enc.spawn(cutter_ship(3), Combatant::new(Side::Hostile, 500.0), None)
        .unwrap();
    assert!(enc.hostilities_active());
}

// ---- Commands ----

#[test]
fn test_player_fire_kills_and_credits_player() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(
        cutter_ship(1).with_weapon("cannon"),
        Combatant::new(Side::Player, 0.0).with_player("ada"),
        None,
    )
    .unwrap();
    enc.spawn(
        cutter_ship(2),
        Combatant::new(Side::Hostile, 500.0).with_faction("pirates"),
        None,
    )
    .unwrap();

    // 95% per shot; fifty misses in a row does not happen.
    let mut kill = None;
    for _ in 0..50 {
        enc.queue_command(fire(1, 0, 2));
        let report = enc.tick();
        assert_eq!(report.shots.len(), 1);
        assert!(report.shots[0].result.fired);
        assert!(report.rejected.is_empty());
        if let Some(k) = report.kills.into_iter().next() {
            kill = Some(k);
            break;
        }
    }
    let kill = kill.expect("target never destroyed");
    assert_eq!(kill.victim.id, ShipId(2));
    assert_eq!(kill.victim.hull, 0);
    assert_eq!(kill.victim_side, Side::Hostile);
    assert_eq!(kill.victim_faction, Some(FactionId::from("pirates")));
    assert_eq!(kill.killer, Some(ShipId(1)));
    assert_eq!(kill.killer_player, Some(PlayerId::from("ada")));

    assert!(enc.ship(ShipId(2)).is_none());
    assert!(enc.is_over());
}

#[test]
fn test_one_shot_per_mount_per_tick() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(
        cutter_ship(1).with_weapon("popgun"),
        Combatant::new(Side::Player, 0.0),
        None,
    )
    .unwrap();
    enc.spawn(hulk_ship(2), Combatant::new(Side::Hostile, 100.0), None)
        .unwrap();

    enc.queue_commands([fire(1, 0, 2), fire(1, 0, 2)]);
    let report = enc.tick();
    assert_eq!(report.shots.len(), 1);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(
        report.rejected[0].reason,
        CommandRejected::AlreadyFired {
            ship: ShipId(1),
            mount: 0
        }
    );
}

#[test]
fn test_empty_magazine_is_reported_as_blocked_shot() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(
        cutter_ship(1).with_weapon("torpedo"),
        Combatant::new(Side::Player, 0.0),
        None,
    )
    .unwrap();
    enc.spawn(hulk_ship(2), Combatant::new(Side::Hostile, 100.0), None)
        .unwrap();

    enc.queue_command(fire(1, 0, 2));
    let first = enc.tick();
    assert!(first.shots[0].result.fired);
    assert_eq!(enc.loadout(ShipId(1)).unwrap().0[0].current_ammo, 0);

    enc.queue_command(fire(1, 0, 2));
    let second = enc.tick();
    assert_eq!(second.shots.len(), 1);
    assert!(!second.shots[0].result.fired);
    assert_eq!(second.shots[0].result.blocked, Some(FireBlocked::OutOfAmmo));
    assert!(second.rejected.is_empty());
}

#[test]
fn test_reload_only_after_the_shooting_stops() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(
        cutter_ship(1).with_weapon("torpedo"),
        Combatant::new(Side::Player, 0.0),
        None,
    )
    .unwrap();
    enc.spawn(hulk_ship(2), Combatant::new(Side::Hostile, 100.0), None)
        .unwrap();

    enc.queue_command(fire(1, 0, 2));
    enc.tick();
    enc.queue_command(CombatCommand::Reload { ship: ShipId(1) });
    let report = enc.tick();
    assert_eq!(report.rejected[0].reason, CommandRejected::HostilitiesActive);
    assert_eq!(enc.loadout(ShipId(1)).unwrap().0[0].current_ammo, 0);

    // The hostile runs; with nothing left to fight, the magazine can be refilled.
    enc.queue_command(CombatCommand::Disengage { ship: ShipId(2) });
    while !enc.is_over() {
        enc.tick();
    }
    enc.queue_command(CombatCommand::Reload { ship: ShipId(1) });
    let report = enc.tick();
    assert!(report.rejected.is_empty());
    assert_eq!(enc.loadout(ShipId(1)).unwrap().0[0].current_ammo, 1);
}

#[test]
fn test_malformed_fire_orders_are_rejected() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(
        cutter_ship(1).with_weapon("popgun"),
        Combatant::new(Side::Player, 0.0),
        None,
    )
    .unwrap();
    enc.spawn(hulk_ship(2), Combatant::new(Side::Hostile, 100.0), None)
        .unwrap();

    enc.queue_commands([fire(1, 0, 9), fire(1, 0, 1), fire(1, 3, 2)]);
    let report = enc.tick();
    let reasons: Vec<CommandRejected> = report.rejected.into_iter().map(|r| r.reason).collect();
    assert_eq!(
        reasons,
        vec![
            CommandRejected::UnknownShip(ShipId(9)),
            CommandRejected::SelfTarget(ShipId(1)),
            CommandRejected::NoSuchMount {
                ship: ShipId(1),
                mount: 3
            },
        ]
    );
    assert!(report.shots.is_empty());
    assert_eq!(enc.ship(ShipId(2)).unwrap().hull, hulk().max_hull);
}

// ---- Retreat ----

#[test]
fn test_disengaging_ship_escapes_past_escape_range() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(cutter_ship(1), Combatant::new(Side::Player, 0.0), None)
        .unwrap();
    enc.spawn(cutter_ship(2), Combatant::new(Side::Hostile, 2000.0), None)
        .unwrap();
    enc.queue_command(CombatCommand::Disengage { ship: ShipId(2) });

    // 2000 + 150 per tick first reaches 3000 on the seventh tick.
    let mut escaped_on = None;
    for _ in 0..10 {
        let report = enc.tick();
        if let Some(escape) = report.escapes.first() {
            assert_eq!(escape.ship, ShipId(2));
            assert_eq!(escape.side, Side::Hostile);
            assert_eq!(escape.range, Some(3050.0));
            escaped_on = Some(escape.tick);
            break;
        }
        assert!(enc.combatant(ShipId(2)).unwrap().standoff > 2000.0);
    }
    assert_eq!(escaped_on, Some(6));
    assert!(enc.ship(ShipId(2)).is_none());
    assert!(enc.is_over());
}

#[test]
fn test_disengage_with_nobody_to_run_from_leaves_at_once() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(cutter_ship(4), Combatant::new(Side::Civilian, 0.0), None)
        .unwrap();
    enc.queue_command(CombatCommand::Disengage { ship: ShipId(4) });
    let report = enc.tick();
    assert_eq!(report.escapes.len(), 1);
    assert_eq!(report.escapes[0].range, None);
}

// ---- Pilots ----

#[test]
fn test_ai_opens_fire_on_enemy() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(hulk_ship(1), Combatant::new(Side::Player, 0.0), None)
        .unwrap();
    enc.spawn(
        cutter_ship(2).with_weapon("popgun"),
        Combatant::new(Side::Hostile, 500.0),
        Some(AiState::new(AiLevel::Ace)),
    )
    .unwrap();

    let report = enc.tick();
    assert_eq!(report.shots.len(), 1);
    let shot = &report.shots[0];
    assert_eq!((shot.attacker, shot.target), (ShipId(2), ShipId(1)));
    assert!(shot.result.fired);
    assert_eq!(
        enc.ai_state(ShipId(2)).unwrap().current_target,
        Some(ShipId(1))
    );
}

#[test]
fn test_ai_leaves_neutrals_alone() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(
        cutter_ship(1).with_weapon("cannon"),
        Combatant::new(Side::Allied, 0.0),
        Some(AiState::new(AiLevel::Expert)),
    )
    .unwrap();
    enc.spawn(cutter_ship(2), Combatant::new(Side::Neutral, 100.0), None)
        .unwrap();
    enc.spawn(cutter_ship(3), Combatant::new(Side::Civilian, 200.0), None)
        .unwrap();

    for _ in 0..5 {
        let report = enc.tick();
        assert!(report.shots.is_empty());
    }
    assert_eq!(enc.ai_state(ShipId(1)).unwrap().current_target, None);
}

#[test]
fn test_crippled_ai_breaks_off() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(hulk_ship(1), Combatant::new(Side::Player, 0.0), None)
        .unwrap();
    let crippled = Ship {
        hull: 10,
        ..cutter_ship(2).with_weapon("popgun")
    };
    enc.spawn(
        crippled,
        Combatant::new(Side::Hostile, 500.0),
        Some(AiState::new(AiLevel::Hard)),
    )
    .unwrap();

    let report = enc.tick();
    assert!(report.shots.is_empty());
    assert!(enc.ai_state(ShipId(2)).unwrap().is_retreating);
    assert_eq!(enc.combatant(ShipId(2)).unwrap().standoff, 650.0);
}

// ---- Aftermath ----

fn kill_record(side: Side, faction: Option<&str>, player: Option<&str>, bounty: u64) -> KillRecord {
    KillRecord {
        tick: 3,
        victim: Ship {
            hull: 0,
            ..cutter_ship(2)
        },
        victim_side: side,
        victim_faction: faction.map(FactionId::from),
        victim_bounty: bounty,
        killer: Some(ShipId(1)),
        killer_player: player.map(PlayerId::from),
    }
}

#[test]
fn test_classify_by_side() {
    assert_eq!(classify(Side::Hostile), Some(CombatEvent::KillHostile));
    assert_eq!(classify(Side::Allied), Some(CombatEvent::KillAlly));
    assert_eq!(classify(Side::Neutral), Some(CombatEvent::KillNeutral));
    assert_eq!(classify(Side::Civilian), Some(CombatEvent::KillCivilian));
    assert_eq!(classify(Side::Player), None);
}

#[test]
fn test_aftermath_of_player_kill_on_hostile() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    let reputation = ReputationMap::new().with("pirates", -60);
    let kill = kill_record(Side::Hostile, Some("pirates"), Some("ada"), 5_000);

    let aftermath = enc.aftermath(&kill, &reputation).unwrap();
    assert_eq!(aftermath.event, Some(CombatEvent::KillHostile));
    let changes: Vec<(&str, i32)> = aftermath
        .reputation
        .iter()
        .map(|c| (c.faction.as_str(), c.amount))
        .collect();
    assert_eq!(changes, vec![("pirates", -5), ("navy", 7)]);
    assert_eq!(aftermath.bounty, 0);
    // 10-20% of the hull price, plus the bounty on the wreck.
    assert!(aftermath.loot.credits >= 10_000 + 5_000);
    assert!(aftermath.loot.credits <= 20_000 + 5_000);
}

#[test]
fn test_aftermath_of_civilian_kill_posts_bounty() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    let kill = kill_record(Side::Civilian, Some("navy"), Some("ada"), 0);

    let aftermath = enc.aftermath(&kill, &ReputationMap::new()).unwrap();
    assert_eq!(aftermath.event, Some(CombatEvent::KillCivilian));
    assert_eq!(aftermath.bounty, 10_000 + 60_000);
    assert_eq!(aftermath.reputation[0].faction, FactionId::from("navy"));
    assert_eq!(aftermath.reputation[0].amount, -20);
}

#[test]
fn test_aftermath_without_player_has_no_consequences() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    let kill = kill_record(Side::Neutral, Some("navy"), None, 0);
    let aftermath = enc.aftermath(&kill, &ReputationMap::new()).unwrap();
    assert_eq!(aftermath.event, Some(CombatEvent::KillNeutral));
    assert!(aftermath.reputation.is_empty());
    assert_eq!(aftermath.bounty, 0);

    let lost = kill_record(Side::Player, None, Some("ada"), 0);
    let aftermath = enc.aftermath(&lost, &ReputationMap::new()).unwrap();
    assert_eq!(aftermath.event, None);
    assert!(aftermath.reputation.is_empty());
}

#[test]
fn test_collect_loot_stows_salvage_aboard_the_killer() {
    let catalog = catalog();
    let mut enc = encounter(&catalog);
    enc.spawn(
        cutter_ship(1),
        Combatant::new(Side::Player, 0.0).with_player("ada"),
        None,
    )
    .unwrap();
    let loot = LootDrop {
        credits: 1_200,
        cargo: vec![CargoItem {
            commodity: "ore".into(),
            quantity: 15,
        }],
        ..LootDrop::default()
    };

    assert_eq!(enc.collect_loot(ShipId(1), &loot).unwrap(), 1_200);
    let stowed = enc.ship(ShipId(1)).unwrap();
    assert_eq!(stowed.cargo[&CommodityId::from("ore")], 15);

    // The cutter holds 20 t, so a second load does not fit and pays nothing.
    let err = enc.collect_loot(ShipId(1), &loot).unwrap_err();
    assert!(matches!(
        err,
        EncounterError::Loot(LootError::InsufficientSpace {
            required: 15,
            available: 5,
        })
    ));
    assert_eq!(enc.ship(ShipId(1)).unwrap(), stowed);

    assert!(matches!(
        enc.collect_loot(ShipId(9), &loot),
        Err(EncounterError::UnknownShip(ShipId(9)))
    ));
}

// ---- Side relations ----

#[test]
fn test_side_relations() {
    assert!(Side::Player.opposes(Side::Hostile));
    assert!(Side::Hostile.opposes(Side::Allied));
    assert!(!Side::Player.opposes(Side::Allied));
    assert!(!Side::Hostile.opposes(Side::Neutral));
    assert!(!Side::Civilian.opposes(Side::Hostile));
    assert!(Side::Player.fights_alongside(Side::Allied));
    assert!(Side::Neutral.fights_alongside(Side::Neutral));
    assert!(!Side::Neutral.fights_alongside(Side::Civilian));
}

// ---- Invariants ----

proptest! {
    #[test]
    fn prop_melee_keeps_ships_and_weapons_in_bounds(seed in any::<u64>()) {
        let catalog = catalog();
        let config = EncounterConfig { seed, ..Default::default() };
        let mut enc = Encounter::new(config, &catalog).unwrap();
        for (id, side, standoff) in [
            (1, Side::Player, 0.0),
            (2, Side::Allied, 50.0),
            (3, Side::Hostile, 600.0),
            (4, Side::Hostile, 900.0),
        ] {
            let ship = cutter_ship(id).with_weapon("popgun").with_weapon("torpedo");
            enc.spawn(ship, Combatant::new(side, standoff), Some(AiState::new(AiLevel::Medium)))
                .unwrap();
        }

        for _ in 0..40 {
            enc.tick();
            for id in enc.ship_ids() {
                let ship = enc.ship(id).unwrap();
                prop_assert!(ship.hull > 0 && ship.hull <= cutter().max_hull);
                let ai = enc.ai_state(id).unwrap();
                prop_assert!((0.0..=1.0).contains(&ai.morale));
                for state in enc.loadout(id).unwrap().0 {
                    prop_assert!(state.cooldown_remaining >= 0.0);
                    prop_assert!(state.current_ammo <= 1);
                }
            }
        }
    }
}
