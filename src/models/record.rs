//! Parsed station status record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Operating status of a station, as announced on its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DriftState {
    #[serde(rename = "Åben")]
    Open,
    #[serde(rename = "Lukket")]
    Closed,
    #[serde(rename = "Midlertidigt lukket")]
    TemporarilyClosed,
}

impl DriftState {
    /// Canonical Danish label used on the station pages.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftState::Open => "Åben",
            DriftState::Closed => "Lukket",
            DriftState::TemporarilyClosed => "Midlertidigt lukket",
        }
    }

    /// Map any casing of a known state word to its variant.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "åben" => Some(DriftState::Open),
            "lukket" => Some(DriftState::Closed),
            "midlertidigt lukket" => Some(DriftState::TemporarilyClosed),
            _ => None,
        }
    }
}

impl fmt::Display for DriftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one station page, produced by a single successful fetch.
///
/// Only the parser builds these; every field is read through an accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRecord {
    drift_state: Option<DriftState>,
    message: Option<String>,
    address: Option<String>,
    opening_hours: Vec<String>,
    source_url: String,
    fetched_at: DateTime<Utc>,
}

impl StationRecord {
    pub(crate) fn new(
        drift_state: Option<DriftState>,
        message: Option<String>,
        address: Option<String>,
        opening_hours: Vec<String>,
        source_url: String,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            drift_state,
            message,
            address,
            opening_hours,
            source_url,
            fetched_at,
        }
    }

    pub fn drift_state(&self) -> Option<DriftState> {
        self.drift_state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn opening_hours(&self) -> &[String] {
        &self.opening_hours
    }

    /// URL the page was fetched from.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// When the fetch completed.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}
