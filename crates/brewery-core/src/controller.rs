//! The controller: sole owner of the view state.
//!
//! Every listener funnels into a [`Controller`] method. Searches are split
//! in two halves so the controller is never borrowed across an await:
//! [`Controller::begin_search`] clears the page and hands out a
//! [`PendingSearch`], and [`Controller::apply`] folds the events that
//! search reports back into the state. Events from any search other than
//! the most recently issued one are discarded.

use std::sync::Arc;

use brewery_types::{BreweryType, StatusValue};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::directory::{BreweryDirectory, BreweryQuery};
use crate::pipeline::{PendingSearch, SearchDelays, SearchEvent, SearchTicket};
use crate::render::{self, PageView, ViewPort};
use crate::state::ViewState;

/// Owns the view state and drives the page.
#[derive(Debug)]
pub struct Controller<P: ViewPort> {
    state: ViewState,
    port: P,
    directory: Arc<BreweryDirectory>,
    delays: SearchDelays,
    /// Sequence number of the most recently issued search.
    latest_seq: u64,
}

impl<P: ViewPort> Controller<P> {
    /// Create a controller drawing on `port` and searching `directory`.
    pub fn new(port: P, directory: Arc<BreweryDirectory>, delays: SearchDelays) -> Self {
        Self {
            state: ViewState::new(),
            port,
            directory,
            delays,
            latest_seq: 0,
        }
    }

    /// Current view state.
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// The rendering surface.
    pub const fn port(&self) -> &P {
        &self.port
    }

    /// Mutable access to the rendering surface.
    pub const fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Shared handle to the directory, for running searches elsewhere.
    pub fn directory(&self) -> Arc<BreweryDirectory> {
        Arc::clone(&self.directory)
    }

    /// Configured search latency.
    pub const fn delays(&self) -> SearchDelays {
        self.delays
    }

    /// Sequence number of the most recently issued search.
    pub const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Draw the page on startup, then run the initial (empty) search.
    pub async fn initialise(&mut self) {
        self.state.status = StatusValue::Initialising;
        self.refresh();
        self.run_search().await;
    }

    /// Region form submitted.
    pub fn submit_region(&mut self, region: &str) -> Option<PendingSearch> {
        region.trim().clone_into(&mut self.state.selected_region);
        self.begin_search()
    }

    /// Brewery type selection changed.
    pub fn change_type_filter(&mut self, brewery_type: Option<BreweryType>) -> Option<PendingSearch> {
        self.state.type_filter = brewery_type;
        self.begin_search()
    }

    /// City checkbox toggled. Re-renders without fetching.
    pub fn toggle_city(&mut self, city: &str, included: bool) -> bool {
        let changed = self.state.toggle_city(city, included);
        debug!(city, included, changed, "city filter toggled");
        self.refresh();
        changed
    }

    /// Re-render the page from the current state.
    pub fn refresh(&mut self) -> PageView {
        render::render(&mut self.state, &mut self.port)
    }

    /// Clear the previous results and issue a ticket for the current
    /// region and type filter.
    ///
    /// Returns `None` without issuing a request when no region is
    /// selected; the status is then [`StatusValue::Idle`]. Either way any
    /// search still in flight is superseded.
    pub fn begin_search(&mut self) -> Option<PendingSearch> {
        self.latest_seq = self.latest_seq.saturating_add(1);
        self.state.clear_results();

        if self.state.selected_region.is_empty() {
            self.state.status = StatusValue::Idle;
            self.refresh();
            debug!(seq = self.latest_seq, "no region selected, skipping search");
            return None;
        }

        self.state.status = StatusValue::Fetching;
        self.refresh();

        let ticket = SearchTicket {
            seq: self.latest_seq,
            query: BreweryQuery {
                region: self.state.selected_region.clone(),
                brewery_type: self.state.type_filter,
            },
        };
        info!(
            seq = ticket.seq,
            region = ticket.query.region,
            brewery_type = ticket.query.brewery_type.map(BreweryType::as_str),
            "search started"
        );
        Some(PendingSearch::new(ticket))
    }

    /// Fold a search event into the state and re-render.
    ///
    /// Returns `false` (and changes nothing) when the event belongs to a
    /// superseded search.
    pub fn apply(&mut self, event: SearchEvent) -> bool {
        if event.seq() != self.latest_seq {
            debug!(
                seq = event.seq(),
                latest_seq = self.latest_seq,
                "discarding event from superseded search"
            );
            return false;
        }

        match event {
            SearchEvent::Receiving { .. } => {
                self.state.status = StatusValue::Receiving;
            }
            SearchEvent::Completed { outcome, .. } => match outcome {
                Ok(breweries) => {
                    self.state.status = if breweries.is_empty() {
                        StatusValue::NoData
                    } else {
                        StatusValue::Done
                    };
                    self.state.set_entities(breweries);
                }
                Err(message) => {
                    self.state.clear_results();
                    self.state.status = StatusValue::FetchError(message);
                }
            },
        }

        self.refresh();
        true
    }

    /// Run a search for the current region and type filter in place,
    /// applying its events as they arrive.
    pub async fn run_search(&mut self) {
        let Some(search) = self.begin_search() else {
            return;
        };

        let directory = Arc::clone(&self.directory);
        let delays = self.delays;
        let (tx, mut rx) = mpsc::unbounded_channel();

        let running = search.run(&directory, delays, tx);
        let applying = async {
            while let Some(event) = rx.recv().await {
                self.apply(event);
            }
        };
        tokio::join!(running, applying);
    }

    /// Search `region`, optionally restricted to one brewery type.
    pub async fn search(&mut self, region: &str, brewery_type: Option<BreweryType>) {
        region.trim().clone_into(&mut self.state.selected_region);
        self.state.type_filter = brewery_type;
        self.run_search().await;
    }
}
