//! The single mutable view state owned by the controller.
//!
//! [`ViewState`] holds the selected region, active filters, fetched
//! breweries, the derived city list and the current status. It is created
//! once at startup and mutated in place; nothing here is persisted.

use std::collections::BTreeSet;

use brewery_types::{BreweryRecord, BreweryType, StatusValue};
use tracing::debug;

/// Everything the page displays, in one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Region (US state) the last search was issued for. Empty when none.
    pub selected_region: String,
    /// Breweries from the most recent completed search, already narrowed
    /// to touring types.
    entities: Vec<BreweryRecord>,
    /// Sorted, distinct cities across `entities`.
    city_options: Vec<String>,
    /// Brewery type passed to the directory. `None` means every type.
    pub type_filter: Option<BreweryType>,
    /// Cities to show. Empty means every city.
    city_filter: BTreeSet<String>,
    /// Stage the pipeline most recently reached.
    pub status: StatusValue,
    /// Number of breweries on screen after the last render.
    pub displayed_count: usize,
}

impl ViewState {
    /// Create the startup state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetched breweries.
    pub fn entities(&self) -> &[BreweryRecord] {
        &self.entities
    }

    /// Sorted, distinct cities across the fetched breweries.
    pub fn city_options(&self) -> &[String] {
        &self.city_options
    }

    /// Cities currently selected. Empty means no city filter.
    pub const fn city_filter(&self) -> &BTreeSet<String> {
        &self.city_filter
    }

    /// Replace the fetched breweries, re-derive the city options and drop
    /// the city filter.
    pub fn set_entities(&mut self, entities: Vec<BreweryRecord>) {
        self.city_options = distinct_cities(&entities);
        self.entities = entities;
        self.city_filter.clear();
    }

    /// Forget every fetched brewery and the city filter.
    pub fn clear_results(&mut self) {
        self.set_entities(Vec::new());
    }

    /// Whether a city's checkbox is ticked.
    pub fn is_city_checked(&self, city: &str) -> bool {
        self.city_filter.is_empty() || self.city_filter.contains(city)
    }

    /// Breweries that pass the city filter, in fetch order.
    pub fn displayed(&self) -> impl Iterator<Item = &BreweryRecord> {
        self.entities
            .iter()
            .filter(|brewery| self.is_city_checked(&brewery.city))
    }

    /// Include or exclude a city. Returns whether the filter changed.
    ///
    /// An empty filter means every city is shown, so excluding a city from
    /// it first selects all known cities and then drops the one excluded.
    /// Cities that are not among the options are ignored.
    pub fn toggle_city(&mut self, city: &str, included: bool) -> bool {
        if self.city_options.binary_search_by(|c| c.as_str().cmp(city)).is_err() {
            debug!(city, "ignoring toggle for unknown city");
            return false;
        }

        if included {
            return self.city_filter.insert(city.to_owned());
        }

        if self.city_filter.is_empty() {
            self.city_filter = self
                .city_options
                .iter()
                .filter(|c| c.as_str() != city)
                .cloned()
                .collect();
            return true;
        }

        self.city_filter.remove(city)
    }

    /// Number of cities counted in the status banner: the selected ones
    /// when a filter is active, otherwise all of them.
    pub fn shown_city_count(&self) -> usize {
        if self.city_filter.is_empty() {
            self.city_options.len()
        } else {
            self.city_filter.len()
        }
    }
}

/// Sorted, duplicate-free list of the cities across `entities`.
pub fn distinct_cities(entities: &[BreweryRecord]) -> Vec<String> {
    entities
        .iter()
        .map(|brewery| brewery.city.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
