//! Salvage for CORSAIR.
//!
//! Rolls what survives a ship's destruction and accounts for the hold space
//! needed to pick it up.

pub mod error;
pub mod generator;
pub mod hold;

pub use error::LootError;
pub use generator::{generate_loot, rare_item_chance, rarity_for_roll, CargoItem, LootDrop};
pub use hold::{apply_loot, can_carry_loot, cargo_space_required, free_space, hold_item_tons};

#[cfg(test)]
mod tests;
