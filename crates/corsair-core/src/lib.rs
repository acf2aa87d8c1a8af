//! Core types and definitions for the CORSAIR combat engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ships, reference data, the injected catalog, enums, and tuning constants.
//! It performs no I/O; catalogs are parsed from strings handed in by the caller.

pub mod catalog;
pub mod constants;
pub mod enums;
pub mod error;
pub mod rng;
pub mod types;

pub use catalog::{Catalog, StaticCatalog};
pub use error::CatalogError;
