//! Error types for configuration, finalization and input.

use thiserror::Error;

/// Result type alias for summarizer operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("quantile values must be in (0, 1); got {0}")]
    InvalidQuantile(f64),

    #[error("cannot parse quantile {0:?}")]
    UnparsableQuantile(String),

    #[error("at least one quantile is required")]
    EmptyQuantiles,

    #[error("{0} is an invalid number of buckets")]
    InvalidBucketCount(usize),

    #[error("no numbers given")]
    NoData,

    #[error("traversal ended before quantile {q} (rank {rank}) was reached")]
    UnresolvedQuantile { q: f64, rank: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SummaryError {
    /// Whether this error stems from invalid configuration rather than data.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuantile(_)
                | Self::UnparsableQuantile(_)
                | Self::EmptyQuantiles
                | Self::InvalidBucketCount(_)
        )
    }
}
