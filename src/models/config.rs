//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{StationConfig, StationList};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and polling behavior settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Monitored stations
    #[serde(default)]
    pub stations: Vec<StationConfig>,

    /// Legacy single-station name, used when `stations` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Legacy single-station URL, used when `stations` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.scan_interval_secs == 0 {
            return Err(AppError::validation(
                "fetcher.scan_interval_secs must be > 0",
            ));
        }
        if self.stations()?.is_empty() {
            return Err(AppError::validation("No stations defined"));
        }
        Ok(())
    }

    /// Configured stations, validated and normalized.
    ///
    /// Falls back to the legacy top-level `name`/`url` pair when no
    /// `[[stations]]` entries are present.
    pub fn stations(&self) -> Result<Vec<StationConfig>> {
        let mut list = StationList::new();

        if self.stations.is_empty() {
            if let (Some(name), Some(url)) = (&self.name, &self.url) {
                list.add(name, url)?;
            }
            return Ok(list.into_vec());
        }

        for station in &self.stations {
            list.add(&station.name, &station.url)?;
        }
        Ok(list.into_vec())
    }
}

/// HTTP client and polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between scheduled fetches of one station, in seconds
    #[serde(default = "defaults::scan_interval")]
    pub scan_interval_secs: u64,
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            scan_interval_secs: defaults::scan_interval(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; pantstation/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn scan_interval() -> u64 {
        5 * 60
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"
[fetcher]
timeout_secs = 10

[[stations]]
name = "Odense"
url = "https://danskretursystem.dk/pantstation/odense"

[[stations]]
name = "Aarhus"
url = "https://danskretursystem.dk/pantstation/aarhus/"
"#;

    fn sample_config() -> Config {
        toml::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn defaults_match_polling_contract() {
        let fetcher = FetcherConfig::default();
        assert_eq!(fetcher.timeout(), Duration::from_secs(30));
        assert_eq!(fetcher.scan_interval(), Duration::from_secs(300));
    }

    #[test]
    fn parse_fills_missing_fetcher_fields() {
        let config = sample_config();
        assert_eq!(config.fetcher.timeout_secs, 10);
        assert_eq!(config.fetcher.scan_interval_secs, 300);
        assert!(!config.fetcher.user_agent.is_empty());
    }

    #[test]
    fn stations_are_normalized() {
        let stations = sample_config().stations().unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(
            stations[0].url,
            "https://danskretursystem.dk/pantstation/odense/"
        );
    }

    #[test]
    fn validate_accepts_sample() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_default_without_stations() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = sample_config();
        config.fetcher.scan_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_station() {
        let mut config = sample_config();
        config.stations.push(StationConfig {
            name: "Odense 2".into(),
            url: "https://danskretursystem.dk/pantstation/odense/".into(),
        });
        assert!(matches!(
            config.validate(),
            Err(AppError::DuplicateStation { .. })
        ));
    }

    #[test]
    fn legacy_single_station_is_read() {
        let config: Config = toml::from_str(
            r#"
name = "Vejle"
url = "https://danskretursystem.dk/pantstation/vejle"
"#,
        )
        .unwrap();

        let stations = config.stations().unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Vejle");
        assert_eq!(
            stations[0].url,
            "https://danskretursystem.dk/pantstation/vejle/"
        );
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.stations.len(), 2);
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml"));
        assert!(config.stations.is_empty());
        assert_eq!(config.fetcher.timeout_secs, 30);
    }
}
