//! Non-player combatant AI for CORSAIR.
//!
//! Implements the per-tick decision pipeline (morale, retreat, targeting,
//! fire control, evasion, formation) and the difficulty profiles behind it.

pub mod decision;
pub mod profiles;

pub use decision::{decide, fire_priority, target_score};
pub use decision::{AiAction, AiActionKind, AiState, Contact, FormationSlot};
pub use profiles::{get_profile, AiProfile, RetreatRule};
