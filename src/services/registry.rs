// src/services/registry.rs

//! Station registry and polling scheduler.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, Result};
use crate::models::{Config, FetcherConfig, StationConfig, StationRecord};
use crate::services::{HttpFetcher, PageFetcher, StationCoordinator, StationSnapshot};
use crate::utils::url::normalize_station_url;

struct StationEntry {
    coordinator: Arc<StationCoordinator>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns one coordinator and one polling task per station.
///
/// Must be used inside a tokio runtime: adding a station spawns its
/// polling task, which fetches immediately and then once per interval.
pub struct StationRegistry {
    fetcher: Arc<dyn PageFetcher>,
    scan_interval: Duration,
    timeout: Duration,
    shutdown: CancellationToken,
    stations: Vec<StationEntry>,
}

impl StationRegistry {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &FetcherConfig) -> Self {
        Self {
            fetcher,
            scan_interval: config.scan_interval(),
            timeout: config.timeout(),
            shutdown: CancellationToken::new(),
            stations: Vec::new(),
        }
    }

    /// Build a registry polling every configured station over HTTP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let stations = config.stations()?;
        let fetcher = Arc::new(HttpFetcher::new(&config.fetcher)?);
        let mut registry = Self::new(fetcher, &config.fetcher);
        for station in stations {
            registry.add(station)?;
        }
        Ok(registry)
    }

    /// Start polling a station.
    pub fn add(&mut self, station: StationConfig) -> Result<Arc<StationCoordinator>> {
        let station = StationConfig::new(&station.name, &station.url)?;
        if self.find(&station.url).is_some() {
            return Err(AppError::duplicate(station.url));
        }

        let coordinator = Arc::new(StationCoordinator::new(
            station,
            Arc::clone(&self.fetcher),
            self.timeout,
        ));
        let cancel = self.shutdown.child_token();
        let task = tokio::spawn(run_schedule(
            Arc::clone(&coordinator),
            self.scan_interval,
            cancel.clone(),
        ));

        log::info!(
            "Polling '{}' every {}s",
            coordinator.url(),
            self.scan_interval.as_secs()
        );
        self.stations.push(StationEntry {
            coordinator: Arc::clone(&coordinator),
            cancel,
            task,
        });
        Ok(coordinator)
    }

    /// Stop polling a station and drop it from the registry.
    pub async fn remove(&mut self, url: &str) -> Result<()> {
        let url = lookup_key(url);
        let index = self
            .stations
            .iter()
            .position(|entry| entry.coordinator.url() == url)
            .ok_or_else(|| AppError::UnknownStation { url: url.clone() })?;

        let entry = self.stations.remove(index);
        entry.cancel.cancel();
        if let Err(e) = entry.task.await {
            log::warn!("Polling task for '{}' ended abnormally: {}", url, e);
        }
        log::info!("Stopped polling '{}'", url);
        Ok(())
    }

    pub fn get(&self, url: &str) -> Option<Arc<StationCoordinator>> {
        self.find(&lookup_key(url)).map(|entry| Arc::clone(&entry.coordinator))
    }

    pub fn coordinators(&self) -> impl Iterator<Item = &Arc<StationCoordinator>> {
        self.stations.iter().map(|entry| &entry.coordinator)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Run one cycle now for every station, or only the one at `url`.
    ///
    /// Cycles run concurrently. Polling schedules are left as they are.
    pub async fn refresh(
        &self,
        url: Option<&str>,
    ) -> Vec<(String, Result<Arc<StationRecord>>)> {
        let filter = url.map(lookup_key);
        let cycles = self
            .coordinators()
            .filter(|c| filter.as_deref().is_none_or(|url| c.url() == url))
            .map(|c| async move { (c.url().to_string(), c.refresh().await) });

        join_all(cycles).await
    }

    pub fn snapshot(&self, url: &str) -> Option<StationSnapshot> {
        self.get(url).map(|c| c.snapshot())
    }

    /// Station and snapshot pairs in the order stations were added.
    pub fn snapshots(&self) -> Vec<(StationConfig, StationSnapshot)> {
        self.coordinators()
            .map(|c| (c.station().clone(), c.snapshot()))
            .collect()
    }

    /// Cancel every polling task and wait for them to finish.
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        let stations = std::mem::take(&mut self.stations);
        let (urls, tasks): (Vec<_>, Vec<_>) = stations
            .into_iter()
            .map(|entry| (entry.coordinator.url().to_string(), entry.task))
            .unzip();

        for (url, result) in urls.iter().zip(join_all(tasks).await) {
            if let Err(e) = result {
                log::warn!("Polling task for '{}' ended abnormally: {}", url, e);
            }
        }
        log::info!("All station polling stopped");
    }

    fn find(&self, url: &str) -> Option<&StationEntry> {
        self.stations
            .iter()
            .find(|entry| entry.coordinator.url() == url)
    }
}

impl Drop for StationRegistry {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Compare by normalized URL when possible, raw otherwise.
fn lookup_key(url: &str) -> String {
    normalize_station_url(url).unwrap_or_else(|_| url.to_string())
}

async fn run_schedule(
    coordinator: Arc<StationCoordinator>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            result = coordinator.refresh() => {
                if let Err(e) = result {
                    log::debug!("Cycle for '{}' failed, retrying next tick: {}", coordinator.url(), e);
                }
            }
        }
    }
}
