//! Netatmo weather station client
//!
//! Fetches favorite-station telemetry from the Netatmo cloud API using the
//! OAuth2 password/refresh-token flow and reshapes the vendor's nested
//! device/module tree into a flat, consumer-friendly schema.

pub mod client;
pub mod error;
pub mod report;
pub mod types;

pub use client::{Credentials, NetatmoClient};
pub use error::NetatmoError;
pub use report::{massage, StationReport};
pub use types::{DashboardData, Module, ModuleKind, Place, Station};
