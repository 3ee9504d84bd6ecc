// src/models/mod.rs

//! Domain models for the station monitor.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod record;
mod station;

// Re-export all public types
pub use config::{Config, FetcherConfig};
pub use record::{DriftState, StationRecord};
pub use station::{StationConfig, StationList};
