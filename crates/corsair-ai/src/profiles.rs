//! Difficulty-specific behavioral profiles.
//!
//! Consolidates per-level parameters for the decision pipeline.

use corsair_core::enums::AiLevel;

/// Hull fraction below which a level retreats, and the enemy count it needs to see first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetreatRule {
    pub hull_below: f64,
    pub min_enemies: usize,
}

/// Behavioral profile for a difficulty level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    /// Weight on enemy threat when picking targets (0-1).
    pub aggression: f64,
    /// Multiplier on the hit chance of this AI's shots.
    pub accuracy_multiplier: f64,
    /// Seconds of reaction delay. Carried for future use, not read by the pipeline.
    pub reaction_time: f64,
    /// Upper bound of the random term added to each target score.
    pub target_jitter: f64,
    /// Chance per tick of evading without being forced to.
    pub evade_chance: f64,
    pub retreat: RetreatRule,
    /// Morale never drops below this value.
    pub morale_floor: Option<f64>,
    /// Shots beyond optimal range need at least this hit chance.
    pub long_range_min_hit_chance: Option<f64>,
    /// Hold missiles until the target is badly damaged.
    pub conserves_missiles: bool,
}

/// Get the behavioral profile for a given level.
pub fn get_profile(level: AiLevel) -> AiProfile {
    use corsair_core::constants::*;

    match level {
        AiLevel::Easy => AiProfile {
            aggression: 0.3,
            accuracy_multiplier: 0.7,
            reaction_time: 2.0,
            target_jitter: 15.0,
            evade_chance: 0.1,
            retreat: RetreatRule {
                hull_below: 0.4,
                min_enemies: EASY_RETREAT_MIN_ENEMIES,
            },
            morale_floor: None,
            long_range_min_hit_chance: None,
            conserves_missiles: false,
        },
        AiLevel::Medium => AiProfile {
            aggression: 0.5,
            accuracy_multiplier: 0.85,
            reaction_time: 1.5,
            target_jitter: 15.0,
            evade_chance: 0.2,
            retreat: RetreatRule {
                hull_below: 0.3,
                min_enemies: 0,
            },
            morale_floor: None,
            long_range_min_hit_chance: None,
            conserves_missiles: true,
        },
        AiLevel::Hard => AiProfile {
            aggression: 0.7,
            accuracy_multiplier: 0.95,
            reaction_time: 1.0,
            target_jitter: 5.0,
            evade_chance: 0.3,
            retreat: RetreatRule {
                hull_below: 0.25,
                min_enemies: 0,
            },
            morale_floor: Some(VETERAN_MORALE_FLOOR),
            long_range_min_hit_chance: Some(LONG_RANGE_MIN_HIT_CHANCE),
            conserves_missiles: true,
        },
        AiLevel::Expert => AiProfile {
            aggression: 0.85,
            accuracy_multiplier: 1.0,
            reaction_time: 0.5,
            target_jitter: 5.0,
            evade_chance: 0.3,
            retreat: RetreatRule {
                hull_below: 0.15,
                min_enemies: 0,
            },
            morale_floor: Some(VETERAN_MORALE_FLOOR),
            long_range_min_hit_chance: Some(LONG_RANGE_MIN_HIT_CHANCE),
            conserves_missiles: true,
        },
        AiLevel::Ace => AiProfile {
            aggression: 1.0,
            accuracy_multiplier: 1.1,
            reaction_time: 0.25,
            target_jitter: 5.0,
            evade_chance: 0.3,
            retreat: RetreatRule {
                hull_below: 0.15,
                min_enemies: 0,
            },
            morale_floor: Some(VETERAN_MORALE_FLOOR),
            long_range_min_hit_chance: Some(LONG_RANGE_MIN_HIT_CHANCE),
            conserves_missiles: true,
        },
    }
}
