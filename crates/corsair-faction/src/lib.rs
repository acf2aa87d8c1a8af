//! Faction consequences for CORSAIR.
//!
//! Reputation cascades from combat events, bounties and the legal-status
//! ladder, hostility bands, and reinforcement dispatch.

pub mod bounty;
pub mod hostility;
pub mod reinforcement;
pub mod reputation;

pub use bounty::{bounty_amount, crime_severity, BountyBoard, BountyInfo, LegalStatus};
pub use hostility::HostilityLevel;
pub use reinforcement::{
    reinforcement_delay, reinforcement_strength, reinforcing_factions, will_faction_reinforce,
    Reinforcement,
};
pub use reputation::{combat_reputation, event_deltas, EventDeltas, ReputationChange, ReputationMap};
