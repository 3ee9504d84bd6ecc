// src/services/coordinator.rs

//! Per-station fetch cycle and cached state.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};

use crate::error::{AppError, Result};
use crate::models::{StationConfig, StationRecord};
use crate::parser::parse_station_page;
use crate::services::PageFetcher;

/// What consumers see for one station.
#[derive(Debug, Clone, Default)]
pub struct StationSnapshot {
    /// Latest successfully parsed record, `None` before the first success
    pub record: Option<Arc<StationRecord>>,

    /// When the latest successful cycle completed
    pub last_success: Option<DateTime<Utc>>,

    /// Whether the most recent cycle failed
    pub last_cycle_failed: bool,

    /// Error of the most recent cycle, if it failed
    pub last_error: Option<String>,
}

impl StationSnapshot {
    pub fn has_data(&self) -> bool {
        self.record.is_some()
    }
}

/// Runs fetch cycles for one station and holds its latest record.
///
/// Cycles of one coordinator never overlap. The snapshot is swapped in one
/// step, so readers see either the old or the new state.
pub struct StationCoordinator {
    station: StationConfig,
    fetcher: Arc<dyn PageFetcher>,
    timeout: Duration,
    state: watch::Sender<StationSnapshot>,
    cycle: Mutex<()>,
}

impl StationCoordinator {
    pub fn new(station: StationConfig, fetcher: Arc<dyn PageFetcher>, timeout: Duration) -> Self {
        let (state, _) = watch::channel(StationSnapshot::default());
        Self {
            station,
            fetcher,
            timeout,
            state,
            cycle: Mutex::new(()),
        }
    }

    pub fn station(&self) -> &StationConfig {
        &self.station
    }

    pub fn url(&self) -> &str {
        &self.station.url
    }

    /// Current state of the station.
    pub fn snapshot(&self) -> StationSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified after every completed cycle.
    pub fn subscribe(&self) -> watch::Receiver<StationSnapshot> {
        self.state.subscribe()
    }

    /// Run one fetch cycle.
    ///
    /// On success the new record replaces the cached one. On failure the
    /// cached record is kept, the cycle is marked failed and the error is
    /// returned for the scheduler to report.
    pub async fn refresh(&self) -> Result<Arc<StationRecord>> {
        let _cycle = self.cycle.lock().await;
        let url = self.url();
        log::debug!("Fetching station page '{}'", url);

        let fetched = tokio::time::timeout(self.timeout, self.fetcher.fetch(url))
            .await
            .unwrap_or_else(|_| {
                Err(AppError::Timeout {
                    url: url.to_string(),
                    secs: self.timeout.as_secs(),
                })
            });

        match fetched {
            Ok(html) => {
                let record = Arc::new(parse_station_page(url, &html, Utc::now()));
                let fetched_at = record.fetched_at();
                self.state.send_modify(|state| {
                    state.record = Some(Arc::clone(&record));
                    state.last_success = Some(fetched_at);
                    state.last_cycle_failed = false;
                    state.last_error = None;
                });

                log::info!(
                    "{}: {}",
                    self.station.name,
                    record.drift_state().map_or("ukendt", |s| s.as_str())
                );
                Ok(record)
            }
            Err(error) => {
                log::error!("Failed fetching station page '{}': {}", url, error);
                let message = error.to_string();
                self.state.send_modify(|state| {
                    state.last_cycle_failed = true;
                    state.last_error = Some(message);
                });
                Err(error)
            }
        }
    }
}
