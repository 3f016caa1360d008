//! IPL Dashboard
//!
//! Loads a ball-by-ball deliveries CSV and derives the summary tables behind the
//! IPL 2024 analysis dashboard.
//!
//! This library provides:
//! - `deliveries`: CSV loading and schema checks
//! - `aggregate`: team, player and venue aggregation pipeline
//! - `selection`: team/venue filtering and top-N slicing
//! - `chart`, `report`, `workbook`: presentation adapters over the same tables
//!
//! Binaries:
//! - `ipl-report`: command-line report and workbook export
//! - `ipl-dashboard`: desktop dashboard

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod deliveries;
pub mod error;
pub mod report;
pub mod selection;
pub mod workbook;

pub use aggregate::{aggregate, Aggregates};
pub use deliveries::{load_deliveries, Delivery};
pub use error::{DashboardError, DashboardResult};
pub use selection::{FilteredView, Selection, TopN};

use std::path::Path;

/// Load the dataset and run the pipeline in one step.
pub fn load_aggregates(path: &Path, top_n: usize) -> DashboardResult<Aggregates> {
    let deliveries = load_deliveries(path)?;
    Ok(aggregate(&deliveries, top_n))
}
