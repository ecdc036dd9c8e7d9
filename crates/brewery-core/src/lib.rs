//! Core of the brewery finder: view state, search pipeline, and rendering.
//!
//! The finder lets a user pick a US state, fetches brewery listings for it
//! from the Open Brewery DB, and shows them as a list that can be narrowed
//! by brewery type (on the directory side) and by city (locally).
//!
//! # Architecture
//!
//! ```text
//! listener --> Controller --> PendingSearch --> BreweryDirectory
//!                  ^                |
//!                  +-- SearchEvent -+
//!                  |
//!                  +--> render --> ViewPort
//! ```
//!
//! # Modules
//!
//! - [`state`] -- The single mutable [`ViewState`] and city filtering
//! - [`render`] -- Pure page projection and the [`ViewPort`] trait
//! - [`directory`] -- Directory backends (HTTP and fixture)
//! - [`pipeline`] -- Sequence-tagged search execution
//! - [`controller`] -- Listener entry points and event application
//! - [`config`] -- Environment configuration
//! - [`error`] -- Error types

pub mod config;
pub mod controller;
pub mod directory;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod state;

pub use config::FinderConfig;
pub use controller::Controller;
pub use directory::{BreweryDirectory, BreweryQuery, FixtureDirectory, HttpDirectory};
pub use error::BreweryError;
pub use pipeline::{PendingSearch, SearchDelays, SearchEvent, SearchTicket};
pub use render::{BreweryCard, CityOption, ListView, PageView, ViewPort};
pub use state::ViewState;
