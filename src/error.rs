//! Error types for loading and validating the deliveries dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for dataset operations
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Fatal dataset errors. Either one ends the session; there is no partial dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Input file missing, unreadable or not parseable as CSV
    #[error("could not load '{}': {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// A required column is absent or holds the wrong kind of value
    #[error("schema error: {message}")]
    Schema { message: String },
}

impl DashboardError {
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DashboardError::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        DashboardError::Schema {
            message: message.into(),
        }
    }

    /// True for header/value-kind problems, false for I/O and CSV syntax problems.
    pub fn is_schema(&self) -> bool {
        matches!(self, DashboardError::Schema { .. })
    }
}
