//! Error types shared by every engine and problem constructor.

use thiserror::Error;

/// Errors raised while building problem instances or engines.
///
/// Degenerate numeric situations that the algorithms can absorb (coincident
/// cities during ant construction, a zero knapsack target in the ratio
/// fitness) are handled locally and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The problem description cannot be searched (empty, malformed, ...).
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// Random instance generation gave up after a bounded number of retries.
    #[error("instance generation exhausted after {attempts} attempts")]
    GenerationExhausted {
        /// Number of draws made for the item that could not be placed.
        attempts: usize,
    },

    /// A configuration knob is outside its documented range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The exact DP table would exceed the allocation cap.
    #[error("dp table of {cells} cells exceeds the allocation limit")]
    TableTooLarge {
        /// Requested `(items + 1) * (target + 1)` cell count.
        cells: u128,
    },
}

impl SearchError {
    /// Creates an [`InvalidInstance`](Self::InvalidInstance) error.
    pub fn instance(message: impl Into<String>) -> Self {
        SearchError::InvalidInstance(message.into())
    }

    /// Creates an [`InvalidConfig`](Self::InvalidConfig) error.
    pub fn config(message: impl Into<String>) -> Self {
        SearchError::InvalidConfig(message.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SearchError>;
