//! Error types for the brewery finder.
//!
//! Uses `thiserror` for typed errors that surface through the search
//! pipeline and the command loop. Fetch failures never escape the
//! pipeline: they become a [`StatusValue::FetchError`] carrying the
//! rendered message.
//!
//! [`StatusValue::FetchError`]: brewery_types::StatusValue::FetchError

/// Errors that can occur while configuring or running the finder.
#[derive(Debug, thiserror::Error)]
pub enum BreweryError {
    /// The directory was unreachable or answered with a non-success status.
    #[error("request failed: {0}")]
    Transport(String),

    /// The directory's response was not a JSON list of breweries.
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Reading input or a fixture file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A user command could not be understood.
    #[error("invalid command: {0}")]
    Command(String),
}
