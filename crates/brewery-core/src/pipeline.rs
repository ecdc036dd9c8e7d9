//! The search pipeline: delay, request, receive, decode, narrow.
//!
//! A [`PendingSearch`] owns everything it needs and never touches the view
//! state. It reports progress as [`SearchEvent`]s tagged with the sequence
//! number of its ticket, and the owning controller applies only events
//! from the most recently issued ticket. A slow response from a
//! superseded search is therefore dropped instead of overwriting newer
//! results.

use std::time::Duration;

use brewery_types::BreweryRecord;
use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::directory::{BreweryDirectory, BreweryQuery, decode_breweries};

/// Artificial latency around each directory request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDelays {
    /// Shortest wait before the request is sent.
    pub fetch_min: Duration,
    /// Longest wait before the request is sent.
    pub fetch_max: Duration,
    /// Wait between the response arriving and it being decoded.
    pub receive: Duration,
}

impl Default for SearchDelays {
    fn default() -> Self {
        Self {
            fetch_min: Duration::from_millis(500),
            fetch_max: Duration::from_millis(1000),
            receive: Duration::from_millis(300),
        }
    }
}

impl SearchDelays {
    /// No artificial latency at all.
    pub const fn none() -> Self {
        Self {
            fetch_min: Duration::ZERO,
            fetch_max: Duration::ZERO,
            receive: Duration::ZERO,
        }
    }

    /// Pick the pre-request wait uniformly from `[fetch_min, fetch_max]`.
    pub fn pick_fetch_delay(&self) -> Duration {
        if self.fetch_max <= self.fetch_min {
            return self.fetch_min;
        }
        rand::rng().random_range(self.fetch_min..=self.fetch_max)
    }
}

/// Identifies one search among all searches a controller has started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Monotonically increasing per controller.
    pub seq: u64,
    /// What is being searched for.
    pub query: BreweryQuery,
}

/// Result of a finished search: touring breweries, or the failure message.
pub type SearchOutcome = Result<Vec<BreweryRecord>, String>;

/// Progress reported by a running search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The directory answered; the body is about to be decoded.
    Receiving {
        /// Ticket sequence number.
        seq: u64,
    },
    /// The search finished.
    Completed {
        /// Ticket sequence number.
        seq: u64,
        /// Breweries found, or why the search failed.
        outcome: SearchOutcome,
    },
}

impl SearchEvent {
    /// Sequence number of the search that produced this event.
    pub const fn seq(&self) -> u64 {
        match self {
            Self::Receiving { seq } | Self::Completed { seq, .. } => *seq,
        }
    }
}

/// A search that has been issued but not yet run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    ticket: SearchTicket,
}

impl PendingSearch {
    /// Wrap a ticket.
    pub const fn new(ticket: SearchTicket) -> Self {
        Self { ticket }
    }

    /// The ticket this search reports under.
    pub const fn ticket(&self) -> &SearchTicket {
        &self.ticket
    }

    /// Run the search to completion, reporting progress on `events`.
    ///
    /// Waits a randomized delay, sends the request, reports
    /// [`SearchEvent::Receiving`], waits the receive delay, decodes the
    /// body and keeps only touring brewery types. Any transport or decode
    /// failure is reported as the completed outcome. A closed event
    /// channel means the listener is gone; the result is then dropped.
    pub async fn run(
        self,
        directory: &BreweryDirectory,
        delays: SearchDelays,
        events: UnboundedSender<SearchEvent>,
    ) {
        let SearchTicket { seq, query } = self.ticket;

        sleep(delays.pick_fetch_delay()).await;

        let outcome = match directory.fetch(&query).await {
            Ok(body) => {
                if events.send(SearchEvent::Receiving { seq }).is_err() {
                    debug!(seq, "search listener gone before response was read");
                }
                sleep(delays.receive).await;
                decode_breweries(&body).map(keep_touring)
            }
            Err(e) => Err(e),
        };

        let outcome = match outcome {
            Ok(breweries) => {
                info!(
                    seq,
                    region = query.region,
                    backend = directory.name(),
                    breweries = breweries.len(),
                    "search completed"
                );
                Ok(breweries)
            }
            Err(e) => {
                warn!(
                    seq,
                    region = query.region,
                    backend = directory.name(),
                    error = %e,
                    "search failed"
                );
                Err(e.to_string())
            }
        };

        if events.send(SearchEvent::Completed { seq, outcome }).is_err() {
            debug!(seq, "search listener gone, dropping result");
        }
    }
}

/// Keep only the brewery types that offer tours, in fetch order.
pub fn keep_touring(breweries: Vec<BreweryRecord>) -> Vec<BreweryRecord> {
    breweries
        .into_iter()
        .filter(|brewery| brewery.brewery_type.offers_tours())
        .collect()
}
