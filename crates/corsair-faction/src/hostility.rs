use std::fmt;

use serde::{Deserialize, Serialize};

/// Reputation bands, from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostilityLevel {
    AtWar,
    Hostile,
    Unfriendly,
    Neutral,
    Friendly,
    Allied,
}

impl HostilityLevel {
    pub fn from_reputation(reputation: i32) -> Self {
        match reputation {
            r if r <= -75 => HostilityLevel::AtWar,
            r if r <= -50 => HostilityLevel::Hostile,
            r if r <= -25 => HostilityLevel::Unfriendly,
            r if r >= 75 => HostilityLevel::Allied,
            r if r >= 25 => HostilityLevel::Friendly,
            _ => HostilityLevel::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HostilityLevel::AtWar => "at_war",
            HostilityLevel::Hostile => "hostile",
            HostilityLevel::Unfriendly => "unfriendly",
            HostilityLevel::Neutral => "neutral",
            HostilityLevel::Friendly => "friendly",
            HostilityLevel::Allied => "allied",
        }
    }

    /// Hostile or worse: patrols attack on sight.
    pub fn attacks_on_sight(self) -> bool {
        self <= HostilityLevel::Hostile
    }
}

impl fmt::Display for HostilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
