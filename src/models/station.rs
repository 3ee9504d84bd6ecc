//! Monitored station definitions.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::url::{normalize_station_url, station_slug};

/// One monitored station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Display name (e.g., "Odense")
    pub name: String,

    /// Status page URL, normalized to end with `/`
    pub url: String,
}

impl StationConfig {
    /// Create a station with a trimmed name and a validated, normalized URL.
    pub fn new(name: impl AsRef<str>, url: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(AppError::validation("station name is empty"));
        }
        Ok(Self {
            name: name.to_string(),
            url: normalize_station_url(url.as_ref())?,
        })
    }

    /// Stable identifier derived from the URL.
    pub fn slug(&self) -> String {
        station_slug(&self.url, &self.name)
    }
}

/// Ordered list of stations being configured, unique by normalized URL.
#[derive(Debug, Clone, Default)]
pub struct StationList {
    stations: Vec<StationConfig>,
}

impl StationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a station.
    ///
    /// Malformed URLs yield `InvalidStationUrl`, an already listed URL
    /// yields `DuplicateStation`.
    pub fn add(&mut self, name: &str, url: &str) -> Result<&StationConfig> {
        let station = StationConfig::new(name, url)?;
        if self.contains(&station.url) {
            return Err(AppError::duplicate(station.url));
        }
        self.stations.push(station);
        Ok(&self.stations[self.stations.len() - 1])
    }

    pub fn contains(&self, url: &str) -> bool {
        self.stations.iter().any(|s| s.url == url)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationConfig> {
        self.stations.iter()
    }

    /// Human-readable list of the stations added so far.
    pub fn summary(&self) -> String {
        if self.stations.is_empty() {
            return "-".to_string();
        }
        self.stations
            .iter()
            .map(|s| format!("• {}", s.name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_vec(self) -> Vec<StationConfig> {
        self.stations
    }
}
