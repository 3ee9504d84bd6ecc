// src/lib.rs

//! Dansk Retursystem pantstation status monitor.
//!
//! Fetches station status pages on a schedule, parses them into
//! [`models::StationRecord`]s and keeps the latest record per station.

pub mod error;
pub mod models;
pub mod parser;
pub mod sensors;
pub mod services;
pub mod utils;
