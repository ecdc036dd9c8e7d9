//! Configuration for the brewery finder.
//!
//! All configuration is loaded from environment variables, and every
//! variable has a default. The finder needs to know where the brewery
//! directory lives and how long the simulated network latency should be.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::BreweryError;
use crate::pipeline::SearchDelays;

/// Public Open Brewery DB endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openbrewerydb.org";

/// Complete finder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    /// Base URL of the brewery directory (without the `/breweries` path).
    pub api_url: String,
    /// Artificial delays around each request.
    pub delays: SearchDelays,
    /// When set, responses are served from this JSON file instead of the
    /// network.
    pub fixture_path: Option<PathBuf>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            delays: SearchDelays::default(),
            fixture_path: None,
        }
    }
}

impl FinderConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `BREWERY_API_URL` -- directory base URL (default `https://api.openbrewerydb.org`)
    /// - `FETCH_DELAY_MIN_MS` -- lower bound of the pre-request delay (default 500)
    /// - `FETCH_DELAY_MAX_MS` -- upper bound of the pre-request delay (default 1000)
    /// - `RECEIVE_DELAY_MS` -- delay after the response arrives (default 300)
    /// - `BREWERY_FIXTURE_PATH` -- serve responses from a local JSON file
    pub fn from_env() -> Result<Self, BreweryError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BreweryError> {
        let defaults = Self::default();

        let api_url = lookup("BREWERY_API_URL")
            .map(|url| url.trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let fetch_min = millis(&lookup, "FETCH_DELAY_MIN_MS", defaults.delays.fetch_min)?;
        let fetch_max = millis(&lookup, "FETCH_DELAY_MAX_MS", defaults.delays.fetch_max)?;
        let receive = millis(&lookup, "RECEIVE_DELAY_MS", defaults.delays.receive)?;

        if fetch_min > fetch_max {
            return Err(BreweryError::Config(format!(
                "FETCH_DELAY_MIN_MS ({}) exceeds FETCH_DELAY_MAX_MS ({})",
                fetch_min.as_millis(),
                fetch_max.as_millis()
            )));
        }

        let fixture_path = lookup("BREWERY_FIXTURE_PATH")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_url,
            delays: SearchDelays {
                fetch_min,
                fetch_max,
                receive,
            },
            fixture_path,
        })
    }
}

/// Read an optional millisecond duration.
fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: Duration,
) -> Result<Duration, BreweryError> {
    lookup(name).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| BreweryError::Config(format!("invalid {name}: {e}")))
    })
}
