//! skirmish: run a seeded CORSAIR encounter from the command line.
//!
//! Usage:
//!   skirmish run --catalog data/catalog.toml --scenario data/ambush.toml \
//!       [--seed N] [--max-ticks N] [--json]
//!   skirmish check --catalog data/catalog.toml
//!
//! Logging goes through `RUST_LOG` (default `info`).

mod scenario;

use std::path::{Path, PathBuf};
use std::process;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use corsair_core::catalog::Catalog;
use corsair_core::{CatalogError, StaticCatalog};
use corsair_faction::{reinforcing_factions, BountyBoard, ReputationMap};
use corsair_loot::LootError;
use corsair_sim::report::{KillRecord, TickReport};
use corsair_sim::{Encounter, EncounterError};

use scenario::Scenario;

#[derive(Error, Debug)]
enum SkirmishError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("scenario error: {0}")]
    Scenario(#[from] toml::de::Error),

    #[error(transparent)]
    Encounter(#[from] EncounterError),

    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),
}

impl SkirmishError {
    fn exit_code(&self) -> i32 {
        match self {
            SkirmishError::Usage(_) => 2,
            SkirmishError::Io { .. } => 3,
            SkirmishError::Catalog(_) | SkirmishError::Scenario(_) => 4,
            SkirmishError::Encounter(_) | SkirmishError::Json(_) => 5,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(2);
    }

    let outcome = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(SkirmishError::Usage(format!("unknown command: {other}"))),
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        if matches!(e, SkirmishError::Usage(_)) {
            print_usage();
        }
        process::exit(e.exit_code());
    }
}

fn print_usage() {
    eprintln!(
        "skirmish: CORSAIR encounter runner\n\
         \n\
         Commands:\n\
         \n\
         run       Fight a scenario to the end and print the log\n\
         \n\
           --catalog <path>    Catalog file (.json or .toml)\n\
           --scenario <path>   Scenario file (.toml)\n\
           --seed <N>          Override the scenario seed\n\
           --max-ticks <N>     Stop after N ticks (default: 600)\n\
           --json              Print one JSON report per tick instead of text\n\
         \n\
         check     Load and validate a catalog\n\
         \n\
           --catalog <path>    Catalog file (.json or .toml)\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn required_path(args: &[String], flag: &str) -> Result<PathBuf, SkirmishError> {
    flag_value(args, flag)
        .map(PathBuf::from)
        .ok_or_else(|| SkirmishError::Usage(format!("missing {flag} <path>")))
}

fn parsed<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, SkirmishError> {
    flag_value(args, flag)
        .map(|raw| {
            raw.parse()
                .map_err(|_| SkirmishError::Usage(format!("{flag} expects a number, got {raw}")))
        })
        .transpose()
}

fn read(path: &Path) -> Result<String, SkirmishError> {
    std::fs::read_to_string(path).map_err(|source| SkirmishError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_catalog(path: &Path) -> Result<StaticCatalog, SkirmishError> {
    let source = read(path)?;
    let catalog = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => StaticCatalog::from_json_str(&source)?,
        _ => StaticCatalog::from_toml_str(&source)?,
    };
    Ok(catalog)
}

fn cmd_check(args: &[String]) -> Result<(), SkirmishError> {
    let path = required_path(args, "--catalog")?;
    let catalog = load_catalog(&path)?;
    catalog.validate()?;
    println!(
        "{}: ok ({} factions, {} rare items)",
        path.display(),
        catalog.factions().len(),
        catalog.rare_items().len()
    );
    Ok(())
}

fn cmd_run(args: &[String]) -> Result<(), SkirmishError> {
    let catalog = load_catalog(&required_path(args, "--catalog")?)?;
    let mut scenario = Scenario::from_toml_str(&read(&required_path(args, "--scenario")?)?)?;
    if let Some(seed) = parsed(args, "--seed")? {
        scenario.encounter.seed = seed;
    }
    let max_ticks: u64 = parsed(args, "--max-ticks")?.unwrap_or(600);
    let json = args.iter().any(|arg| arg == "--json");

    let mut encounter = Encounter::new(scenario.encounter.clone(), &catalog)?;
    for spec in &scenario.ships {
        let Some(ship_type) = catalog.ship_type(&spec.ship_type) else {
            return Err(EncounterError::UnknownShipType {
                ship: corsair_core::types::ShipId(spec.id),
                ship_type: spec.ship_type.clone(),
            }
            .into());
        };
        let (ship, combatant, ai) = spec.build(ship_type, &scenario.player);
        encounter.spawn(ship, combatant, ai)?;
    }
    tracing::info!(
        seed = scenario.encounter.seed,
        ships = scenario.ships.len(),
        "encounter started"
    );

    let mut reputation = ReputationMap::new();
    for (faction, &standing) in &scenario.reputation {
        reputation.set(faction.clone(), standing);
    }
    let mut board = BountyBoard::new();
    let mut credits = 0u64;

    while encounter.tick_count() < max_ticks {
        let report = encounter.tick();
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_report(&report);
        }

        for kill in &report.kills {
            let salvage = settle(
                &mut encounter,
                kill,
                &scenario,
                &mut reputation,
                &mut board,
                &catalog,
            )?;
            credits = credits.saturating_add(salvage);
        }

        if encounter.is_over() {
            break;
        }
    }

    println!();
    println!(
        "after {} ticks ({:.1}s): {}",
        encounter.tick_count(),
        encounter.time_secs(),
        if encounter.is_over() { "fight over" } else { "still fighting" }
    );
    println!("salvage credits: {credits}");
    for (faction, standing) in reputation.iter() {
        println!(
            "  {faction}: {standing:+} ({}), legal status {:?}",
            reputation.hostility(faction),
            board.legal_status(&scenario.player, faction)
        );
    }
    for bounty in board.active(&scenario.player, encounter.time_secs() as u64) {
        println!("  bounty posted by {}: {} credits", bounty.faction, bounty.amount);
    }
    Ok(())
}

/// Apply one kill's aftermath to the player's standing and record, and stow
/// the salvage aboard the killer. Returns salvage credits, zero when the
/// salvage could not be taken aboard.
fn settle(
    encounter: &mut Encounter<'_, StaticCatalog>,
    kill: &KillRecord,
    scenario: &Scenario,
    reputation: &mut ReputationMap,
    board: &mut BountyBoard,
    catalog: &StaticCatalog,
) -> Result<u64, SkirmishError> {
    let aftermath = encounter.aftermath(kill, reputation)?;
    reputation.apply(&aftermath.reputation);
    for change in &aftermath.reputation {
        println!("    {:+} {} ({})", change.amount, change.faction, change.reason);
    }

    let by_player = kill.killer_player.is_some();
    if let (Some(event), Some(faction), true) = (aftermath.event, &kill.victim_faction, by_player) {
        let value = catalog
            .ship_type(&kill.victim.ship_type)
            .map_or(0, |t| t.price);
        let now = encounter.time_secs() as u64;
        let added = board.record_crime(&scenario.player, faction, event, value, now);
        if added > 0 {
            println!("    {faction} posts a {added} credit bounty");
        }
        if let Some(system) = &scenario.system {
            for help in reinforcing_factions(faction, system, reputation, catalog) {
                println!(
                    "    {} sends {} ships, arriving in {} turns",
                    help.faction, help.ships, help.delay_turns
                );
            }
        }
    }

    println!("    {}", aftermath.loot.summary);
    let Some(collector) = kill.killer.filter(|_| by_player) else {
        return Ok(0);
    };
    if aftermath.loot.is_empty() {
        return Ok(0);
    }
    match encounter.collect_loot(collector, &aftermath.loot) {
        Ok(credits) => Ok(credits),
        Err(EncounterError::Loot(LootError::InsufficientSpace {
            required,
            available,
        })) => {
            println!(
                "    hold too small: need {required} t, have {available} t; salvage left behind"
            );
            Ok(0)
        }
        Err(EncounterError::UnknownShip(_)) => {
            println!("    {collector} is gone; salvage left behind");
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(report: &TickReport) {
    if report.is_quiet() {
        return;
    }
    println!("[tick {:>4} | {:>6.1}s]", report.tick, report.time_secs);
    for shot in &report.shots {
        println!(
            "  {} -> {}: {}",
            shot.attacker, shot.target, shot.result.message
        );
    }
    for escape in &report.escapes {
        println!("  {} ({:?}) escaped", escape.ship, escape.side);
    }
    for rejected in &report.rejected {
        println!("  rejected {:?}: {}", rejected.command, rejected.reason);
    }
    for kill in &report.kills {
        match kill.killer {
            Some(killer) => println!("  {} destroyed by {}", kill.victim.id, killer),
            None => println!("  {} destroyed", kill.victim.id),
        }
    }
}
