//! Client for the Japan Meteorological Agency (JMA) forecast service.
//!
//! Loads the catalog of forecast regions, fetches raw forecast documents and
//! extracts a short multi-day forecast from them.

pub mod catalog;
pub mod client;
pub mod dump;
pub mod error;
pub mod extract;
pub mod types;

pub use catalog::{Region, RegionCatalog};
pub use client::{JmaClient, JmaEndpoints};
pub use dump::write_dump;
pub use error::{FailureKind, JmaError};
pub use extract::{extract, extract_report};
pub use types::*;
