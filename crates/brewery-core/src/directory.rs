//! Brewery directory backends.
//!
//! Defines an enum-based dispatch for directory backends, avoiding the
//! dyn-compatibility issues with async trait methods. [`HttpDirectory`]
//! talks to the public Open Brewery DB over HTTP via `reqwest`;
//! [`FixtureDirectory`] answers from a canned body and records every query,
//! for offline runs and tests.
//!
//! Backends return the raw response body. Decoding and narrowing to touring
//! types happen in the search pipeline.

use std::path::Path;
use std::sync::Mutex;

use brewery_types::{BreweryRecord, BreweryType};
use reqwest::Url;
use tracing::debug;

use crate::error::BreweryError;

/// Parameters of a single directory search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreweryQuery {
    /// US state to search in, as the user typed it.
    pub region: String,
    /// Restrict results to this brewery type on the directory side.
    pub brewery_type: Option<BreweryType>,
}

impl BreweryQuery {
    /// Query-string pairs for the `/breweries` endpoint.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("by_state", self.region.as_str())];
        if let Some(brewery_type) = self.brewery_type {
            params.push(("by_type", brewery_type.as_str()));
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Unified backend enum (dyn-compatible alternative to async trait)
// ---------------------------------------------------------------------------

/// A source of brewery listings.
#[derive(Debug)]
pub enum BreweryDirectory {
    /// The live directory API.
    Http(HttpDirectory),
    /// Canned responses.
    Fixture(FixtureDirectory),
}

impl BreweryDirectory {
    /// Run a search and return the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`BreweryError::Transport`] if the directory is unreachable,
    /// answers with a non-success status, or (for fixtures) is configured
    /// to fail.
    pub async fn fetch(&self, query: &BreweryQuery) -> Result<String, BreweryError> {
        match self {
            Self::Http(directory) => directory.fetch(query).await,
            Self::Fixture(directory) => directory.fetch(query),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Http(_) => "open-brewery-db",
            Self::Fixture(_) => "fixture",
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP backend
// ---------------------------------------------------------------------------

/// Backend for the Open Brewery DB REST API.
///
/// Sends `GET {base_url}/breweries?by_state=..[&by_type=..]`.
#[derive(Debug)]
pub struct HttpDirectory {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpDirectory {
    /// Create a backend rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`BreweryError::Config`] if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self, BreweryError> {
        let endpoint = format!("{}/breweries", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| BreweryError::Config(format!("invalid directory URL {endpoint}: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    /// Full request URL for a query.
    pub fn search_url(&self, query: &BreweryQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(query.params());
        url
    }

    /// Send the search and return the response body.
    async fn fetch(&self, query: &BreweryQuery) -> Result<String, BreweryError> {
        let url = self.search_url(query);
        debug!(url = %url, "requesting breweries");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| BreweryError::Transport(format!("directory unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(BreweryError::Transport(format!(
                "directory returned {status}: {error_body}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| BreweryError::Transport(format!("failed to read response: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Fixture backend
// ---------------------------------------------------------------------------

/// What a fixture answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureResponse {
    /// A response body, served for every query.
    Body(String),
    /// A transport failure with this message.
    Failure(String),
}

/// Backend that answers from memory.
///
/// When the body is a JSON array, entries are narrowed the way the live
/// directory would: by `brewery_type` when the query names one, and by
/// `state` for entries that carry that field. Any other body is served
/// verbatim.
#[derive(Debug)]
pub struct FixtureDirectory {
    response: FixtureResponse,
    requests: Mutex<Vec<BreweryQuery>>,
}

impl FixtureDirectory {
    /// Serve `body` for every query.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self::new(FixtureResponse::Body(body.into()))
    }

    /// Serve a JSON array of `records` for every query.
    ///
    /// # Errors
    ///
    /// Returns [`BreweryError::Decode`] if the records cannot be serialized.
    pub fn with_records(records: &[BreweryRecord]) -> Result<Self, BreweryError> {
        Ok(Self::with_body(serde_json::to_string(records)?))
    }

    /// Fail every query with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(FixtureResponse::Failure(message.into()))
    }

    /// Serve the contents of a file for every query.
    ///
    /// # Errors
    ///
    /// Returns [`BreweryError::Io`] if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, BreweryError> {
        Ok(Self::with_body(std::fs::read_to_string(path)?))
    }

    const fn new(response: FixtureResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every query received so far, oldest first.
    pub fn requests(&self) -> Vec<BreweryQuery> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    fn fetch(&self, query: &BreweryQuery) -> Result<String, BreweryError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(query.clone());
        }

        match &self.response {
            FixtureResponse::Failure(message) => Err(BreweryError::Transport(message.clone())),
            FixtureResponse::Body(body) => Ok(narrow_body(body, query)),
        }
    }
}

/// Apply the directory's server-side filters to a canned JSON array.
fn narrow_body(body: &str, query: &BreweryQuery) -> String {
    let Ok(entries) = serde_json::from_str::<Vec<serde_json::Value>>(body) else {
        return body.to_owned();
    };

    let wanted_state = query.region.replace('_', " ");
    let kept: Vec<serde_json::Value> = entries
        .into_iter()
        .filter(|entry| {
            query.brewery_type.is_none_or(|t| {
                entry.get("brewery_type").and_then(serde_json::Value::as_str) == Some(t.as_str())
            })
        })
        .filter(|entry| {
            entry
                .get("state")
                .and_then(serde_json::Value::as_str)
                .is_none_or(|state| state.eq_ignore_ascii_case(&wanted_state))
        })
        .collect();

    serde_json::Value::Array(kept).to_string()
}

/// Intermediate shape for one listing as the directory sends it.
///
/// Every field may be `null` or missing on the wire. A malformed listing
/// is carried through with blanks instead of failing the whole search.
#[derive(Debug, serde::Deserialize)]
struct RawBrewery {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    brewery_type: Option<BreweryType>,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    website_url: Option<String>,
}

impl From<RawBrewery> for BreweryRecord {
    fn from(raw: RawBrewery) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            brewery_type: raw.brewery_type.unwrap_or(BreweryType::Unknown),
            street: raw.street,
            city: raw.city.unwrap_or_default(),
            postal_code: raw.postal_code.unwrap_or_default(),
            phone: raw.phone,
            website_url: raw.website_url,
        }
    }
}

/// Parse a directory response body into brewery records.
///
/// Null fields inside a listing do not fail the parse: a null type reads
/// as [`BreweryType::Unknown`] and null text fields read as empty.
///
/// # Errors
///
/// Returns [`BreweryError::Decode`] if the body is not a JSON array of
/// listing objects.
pub fn decode_breweries(body: &str) -> Result<Vec<BreweryRecord>, BreweryError> {
    let raw: Vec<RawBrewery> = serde_json::from_str(body)?;
    Ok(raw.into_iter().map(BreweryRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(region: &str, brewery_type: Option<BreweryType>) -> BreweryQuery {
        BreweryQuery {
            region: region.to_owned(),
            brewery_type,
        }
    }

    #[test]
    fn search_url_without_type() {
        let directory = HttpDirectory::new("https://api.openbrewerydb.org/");
        assert!(directory.is_ok());
        let Ok(directory) = directory else { return };
        assert_eq!(
            directory.search_url(&query("ohio", None)).as_str(),
            "https://api.openbrewerydb.org/breweries?by_state=ohio"
        );
    }

    #[test]
    fn search_url_with_type_and_escaping() {
        let Ok(directory) = HttpDirectory::new("http://localhost:9000") else {
            return;
        };
        assert_eq!(
            directory
                .search_url(&query("new york", Some(BreweryType::Brewpub)))
                .as_str(),
            "http://localhost:9000/breweries?by_state=new+york&by_type=brewpub"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpDirectory::new("not a url"),
            Err(BreweryError::Config(_))
        ));
    }

    #[test]
    fn fixture_records_queries() {
        let directory = FixtureDirectory::with_body("[]");
        assert_eq!(directory.fetch(&query("OH", None)).ok().as_deref(), Some("[]"));
        assert_eq!(directory.requests(), vec![query("OH", None)]);
    }

    #[test]
    fn fixture_failure_is_transport_error() {
        let directory = FixtureDirectory::failing("connection reset");
        let result = directory.fetch(&query("OH", None));
        assert!(matches!(result, Err(BreweryError::Transport(ref m)) if m == "connection reset"));
    }

    #[test]
    fn fixture_narrows_by_type_and_state() {
        let body = serde_json::json!([
            {"name": "A", "brewery_type": "micro", "state": "Ohio"},
            {"name": "B", "brewery_type": "brewpub", "state": "Ohio"},
            {"name": "C", "brewery_type": "micro", "state": "New York"},
            {"name": "D", "brewery_type": "micro"}
        ])
        .to_string();
        let directory = FixtureDirectory::with_body(body);

        let narrowed = directory
            .fetch(&query("ohio", Some(BreweryType::Micro)))
            .unwrap_or_default();
        let names: Vec<String> = serde_json::from_str::<Vec<serde_json::Value>>(&narrowed)
            .unwrap_or_default()
            .iter()
            .filter_map(|e| e.get("name").and_then(serde_json::Value::as_str))
            .map(ToOwned::to_owned)
            .collect();
        assert_eq!(names, ["A", "D"]);

        let new_york = directory
            .fetch(&query("new_york", None))
            .unwrap_or_default();
        assert!(new_york.contains("\"C\""));
        assert!(!new_york.contains("\"A\""));
    }

    #[test]
    fn fixture_serves_non_json_verbatim() {
        let directory = FixtureDirectory::with_body("<html>oops</html>");
        assert_eq!(
            directory.fetch(&query("OH", None)).ok().as_deref(),
            Some("<html>oops</html>")
        );
    }

    #[test]
    fn decode_rejects_html() {
        assert!(matches!(
            decode_breweries("<html>oops</html>"),
            Err(BreweryError::Decode(_))
        ));
    }

    #[test]
    fn decode_reads_array() {
        let body = serde_json::json!([{
            "name": "Great Lakes Brewing Co",
            "brewery_type": "brewpub",
            "street": "2516 Market Ave",
            "city": "Cleveland",
            "postal_code": "44113-3434",
            "phone": "2167714404",
            "website_url": "http://www.greatlakesbrewing.com"
        }])
        .to_string();
        let records = decode_breweries(&body).unwrap_or_default();
        assert_eq!(records.len(), 1);
        assert_eq!(records.first().map(|r| r.city.as_str()), Some("Cleveland"));
    }

    #[test]
    fn decode_tolerates_null_fields() {
        let body = serde_json::json!([
            {"name": "Planned Co", "brewery_type": "planning", "street": null,
             "city": "Dayton", "postal_code": null, "phone": null, "website_url": null},
            {"name": "Typeless", "brewery_type": null, "city": null, "postal_code": "45402"}
        ])
        .to_string();
        let records = decode_breweries(&body);
        assert!(records.is_ok());
        let records = records.unwrap_or_default();
        assert_eq!(records.len(), 2);
        assert_eq!(records.first().map(|r| r.postal_code.as_str()), Some(""));
        assert_eq!(
            records.last().map(|r| r.brewery_type),
            Some(BreweryType::Unknown)
        );
        assert_eq!(records.last().map(|r| r.city.as_str()), Some(""));
    }

    #[test]
    fn decode_rejects_non_object_entries() {
        assert!(matches!(
            decode_breweries("[1, 2, 3]"),
            Err(BreweryError::Decode(_))
        ));
    }
}
