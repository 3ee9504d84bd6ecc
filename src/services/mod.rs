//! Service layer for the station monitor.
//!
//! This module contains the runtime side of the pipeline:
//! - Page fetching (`PageFetcher`, `HttpFetcher`)
//! - Per-station fetch cycles and cached state (`StationCoordinator`)
//! - Station bookkeeping and polling schedules (`StationRegistry`)

mod coordinator;
mod fetcher;
mod registry;

pub use coordinator::{StationCoordinator, StationSnapshot};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use registry::StationRegistry;
