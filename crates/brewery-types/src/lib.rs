//! Shared type definitions for the brewery finder.
//!
//! This crate holds the records fetched from the brewery directory and the
//! status values shown in the status banner. Types defined here flow
//! downstream to `TypeScript` via `ts-rs` so a browser front end can
//! consume the same shapes.
//!
//! # Modules
//!
//! - [`brewery`] -- Brewery records and brewery type classification
//! - [`status`] -- Pipeline status values and their banner styles

pub mod brewery;
pub mod status;

// Re-export all public types at crate root for convenience.
pub use brewery::{BreweryRecord, BreweryType, TOURING_BREWERY_TYPES, UnknownBreweryType};
pub use status::{StatusStyle, StatusValue};
