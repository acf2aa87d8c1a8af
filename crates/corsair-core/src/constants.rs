//! Combat constants and tuning parameters.

// --- Hit resolution ---

/// Floor on any shot's hit chance (percent). No shot is impossible.
pub const MIN_HIT_CHANCE: f64 = 5.0;

/// Ceiling on any shot's hit chance (percent). No shot is guaranteed.
pub const MAX_HIT_CHANCE: f64 = 95.0;

/// Units beyond optimal range that cost one point of accuracy.
pub const RANGE_PENALTY_DIVISOR: f64 = 100.0;

/// Accuracy lost per point of target maneuverability.
pub const EVASION_PER_MANEUVERABILITY: f64 = 2.0;

/// Accuracy gained per point of attacker maneuverability.
pub const AIM_PER_MANEUVERABILITY: f64 = 0.5;

/// Chance (0-1) that a hit is critical.
pub const CRITICAL_CHANCE: f64 = 0.10;

/// Damage multiplier on a critical hit.
pub const CRITICAL_MULTIPLIER: f64 = 1.5;

// --- AI ---

/// Seconds between target re-evaluations.
pub const TARGET_RECHECK_SECS: f64 = 3.0;

/// Morale lost per tick while above the hull-derived target.
pub const MORALE_DECAY_PER_TICK: f64 = 0.05;

/// Morale regained per tick while below the hull-derived target.
pub const MORALE_RECOVERY_PER_TICK: f64 = 0.02;

/// Morale never drops below this for Hard and above.
pub const VETERAN_MORALE_FLOOR: f64 = 0.3;

/// Morale below which any AI retreats.
pub const RETREAT_MORALE: f64 = 0.3;

/// Hull fraction below which any AI retreats.
pub const RETREAT_HULL: f64 = 0.2;

/// Enemy count above which an AI counts as outnumbered.
pub const OUTNUMBERED_ENEMY_COUNT: usize = 3;

/// Hull fraction below which an outnumbered AI retreats.
pub const OUTNUMBERED_RETREAT_HULL: f64 = 0.5;

/// Easy AIs need at least this many enemies before their hull threshold applies.
pub const EASY_RETREAT_MIN_ENEMIES: usize = 2;

/// Target score weight on missing hull.
pub const TARGET_HULL_WEIGHT: f64 = 30.0;

/// Target score weight on missing shields.
pub const TARGET_SHIELD_WEIGHT: f64 = 20.0;

/// Target score per equipped weapon (scaled by aggression).
pub const TARGET_WEAPON_WEIGHT: f64 = 10.0;

/// Max hull divisor in the target threat term (scaled by aggression).
pub const TARGET_HULL_SIZE_DIVISOR: f64 = 100.0;

/// Weapons engage out to this multiple of their optimal range.
pub const MAX_ENGAGEMENT_RANGE_FACTOR: f64 = 2.0;

/// Hit chance (percent) veterans require for shots beyond optimal range.
pub const LONG_RANGE_MIN_HIT_CHANCE: f64 = 40.0;

/// Medium+ AIs hold missiles until the target's hull drops below this fraction.
pub const MISSILE_RESERVE_HULL: f64 = 0.5;

/// Damage that saturates the damage term of a fire priority.
pub const FIRE_PRIORITY_DAMAGE_SCALE: f64 = 200.0;

/// Share of a fire priority earned by raw damage.
pub const FIRE_PRIORITY_DAMAGE_WEIGHT: f64 = 0.5;

/// Fire priority bonus inside optimal range, and beyond it.
pub const FIRE_PRIORITY_IN_RANGE: f64 = 0.3;
pub const FIRE_PRIORITY_EXTENDED_RANGE: f64 = 0.1;

/// Fire priority bonus per point of penetration against strong shields.
pub const FIRE_PRIORITY_PENETRATION_WEIGHT: f64 = 0.2;

/// Action priorities in [0, 1].
pub const PRIORITY_RETREAT: f64 = 1.0;
pub const PRIORITY_FORCED_EVADE: f64 = 0.9;
pub const PRIORITY_RETARGET: f64 = 0.7;
pub const PRIORITY_EVADE: f64 = 0.5;
pub const PRIORITY_FORMATION: f64 = 0.3;

/// Hull fraction that forces evasion.
pub const EVADE_HULL: f64 = 0.3;

/// Shield fraction that forces evasion.
pub const EVADE_SHIELDS: f64 = 0.2;

// --- Reputation ---

pub const REPUTATION_MIN: i32 = -100;
pub const REPUTATION_MAX: i32 = 100;

/// Standing above which killing an ally counts as betrayal.
pub const BETRAYAL_THRESHOLD: i32 = 25;

/// Extra penalty for betraying a faction that trusted you.
pub const BETRAYAL_PENALTY: i32 = -10;

/// Bonus from a hostile faction's enemies when you already stand against it.
pub const EARNING_TRUST_BONUS: i32 = 2;

/// Penalty from every lawful faction when a civilian dies.
pub const CIVILIAN_OUTRAGE_PENALTY: i32 = -5;

// --- Bounties and legal status ---

/// Flat part of every bounty (credits).
pub const BOUNTY_BASE: u64 = 10_000;

/// Fraction of the victim's value added to a bounty, before the event multiplier.
pub const BOUNTY_VALUE_FRACTION: f64 = 0.2;

/// Seconds a bounty stays open after the latest crime (30 days).
pub const BOUNTY_DURATION_SECS: u64 = 30 * 24 * 60 * 60;

/// Record score at which a player becomes an offender.
pub const OFFENDER_THRESHOLD: u32 = 10;

/// Record score at which a player becomes wanted.
pub const WANTED_THRESHOLD: u32 = 50;

/// Record score at which a player becomes a fugitive.
pub const FUGITIVE_THRESHOLD: u32 = 100;

// --- Reinforcements ---

/// Turns before reinforcements arrive, by reputation band.
pub const REINFORCEMENT_DELAY_AT_WAR: u32 = 2;
pub const REINFORCEMENT_DELAY_HOSTILE: u32 = 4;
pub const REINFORCEMENT_DELAY_UNFRIENDLY: u32 = 6;

pub const MIN_REINFORCEMENTS: u32 = 1;
pub const MAX_REINFORCEMENTS: u32 = 5;

// --- Loot ---

/// Salvaged credits as a fraction of the wreck's value.
pub const LOOT_CREDITS_MIN: f64 = 0.10;
pub const LOOT_CREDITS_MAX: f64 = 0.20;

/// Fraction of each cargo stack that survives the explosion.
pub const CARGO_SURVIVAL_MIN: f64 = 0.30;
pub const CARGO_SURVIVAL_MAX: f64 = 0.60;

pub const OUTFIT_SALVAGE_CHANCE: f64 = 0.40;
pub const WEAPON_SALVAGE_CHANCE: f64 = 0.30;
pub const HOSTILE_WEAPON_SALVAGE_CHANCE: f64 = 0.45;

pub const RARE_BASE_CHANCE: f64 = 0.05;
pub const RARE_MILITARY_BONUS: f64 = 0.10;
pub const RARE_CAPITAL_BONUS: f64 = 0.15;
pub const RARE_HOSTILE_BONUS: f64 = 0.08;
pub const RARE_VALUE_BONUS: f64 = 0.05;
pub const RARE_VALUE_TIER_1: u64 = 500_000;
pub const RARE_VALUE_TIER_2: u64 = 1_000_000;
pub const RARE_CHANCE_CAP: f64 = 0.40;

/// Tier roll-space cut-offs (percent).
pub const LEGENDARY_ROLL: f64 = 5.0;
pub const EPIC_ROLL: f64 = 20.0;
pub const RARE_ROLL: f64 = 50.0;

/// Hold space in tons.
pub const CARGO_TONS_PER_UNIT: u32 = 1;
pub const WEAPON_TONS: u32 = 5;
pub const OUTFIT_TONS: u32 = 3;
pub const RARE_ITEM_TONS: u32 = 1;

// --- Encounter ---

/// Default simulated seconds per encounter tick.
pub const DEFAULT_TICK_SECS: f64 = 1.0;

/// Distance from the nearest enemy at which a retreating ship escapes.
pub const DEFAULT_ESCAPE_RANGE: f64 = 3_000.0;

/// Units per second a retreating ship opens the range.
pub const DEFAULT_RETREAT_SPEED: f64 = 150.0;
