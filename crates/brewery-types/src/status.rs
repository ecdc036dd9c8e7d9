//! Pipeline status values shown in the status banner.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The stage the search pipeline most recently reached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "message")]
#[ts(export, export_to = "bindings/")]
pub enum StatusValue {
    /// No region selected, nothing to fetch.
    #[default]
    Idle,
    /// The page is starting up.
    Initialising,
    /// Waiting on the directory.
    Fetching,
    /// A response arrived and is being read.
    Receiving,
    /// Breweries were found.
    Done,
    /// The search succeeded but nothing matched.
    NoData,
    /// The request or its decoding failed.
    FetchError(String),
}

impl StatusValue {
    /// Banner text for this stage, without counts.
    pub fn label(&self) -> String {
        match self {
            Self::Idle => "Idle".to_owned(),
            Self::Initialising => "Initialising...".to_owned(),
            Self::Fetching => "Fetching breweries...".to_owned(),
            Self::Receiving => "Receiving data...".to_owned(),
            Self::Done => "Done".to_owned(),
            Self::NoData => "No breweries found".to_owned(),
            Self::FetchError(message) => format!("Error: {message}"),
        }
    }

    /// Banner style for this stage.
    pub const fn style(&self) -> StatusStyle {
        match self {
            Self::FetchError(_) => StatusStyle::Error,
            Self::NoData => StatusStyle::NoData,
            Self::Done => StatusStyle::Done,
            Self::Idle | Self::Initialising | Self::Fetching | Self::Receiving => {
                StatusStyle::Neutral
            }
        }
    }

    /// Whether a search has finished successfully (with or without results).
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Done | Self::NoData)
    }
}

/// Visual treatment of the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum StatusStyle {
    /// In-progress or idle stages.
    Neutral,
    /// Results are on screen.
    Done,
    /// The search came back empty.
    NoData,
    /// The search failed.
    Error,
}

impl StatusStyle {
    /// CSS class applied to the status element.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Neutral => "status-neutral",
            Self::Done => "status-done",
            Self::NoData => "status-no-data",
            Self::Error => "status-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_maps_to_a_style() {
        assert_eq!(StatusValue::Idle.style(), StatusStyle::Neutral);
        assert_eq!(StatusValue::Initialising.style(), StatusStyle::Neutral);
        assert_eq!(StatusValue::Fetching.style(), StatusStyle::Neutral);
        assert_eq!(StatusValue::Receiving.style(), StatusStyle::Neutral);
        assert_eq!(StatusValue::Done.style(), StatusStyle::Done);
        assert_eq!(StatusValue::NoData.style(), StatusStyle::NoData);
        assert_eq!(
            StatusValue::FetchError("boom".to_owned()).style(),
            StatusStyle::Error
        );
    }

    #[test]
    fn error_label_carries_message() {
        let status = StatusValue::FetchError("connection refused".to_owned());
        assert_eq!(status.label(), "Error: connection refused");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(StatusValue::FetchError("x".to_owned()))
            .unwrap_or_default();
        assert_eq!(json, serde_json::json!({"kind": "FetchError", "message": "x"}));
        let idle = serde_json::to_value(StatusValue::Idle).unwrap_or_default();
        assert_eq!(idle, serde_json::json!({"kind": "Idle"}));
    }
}
