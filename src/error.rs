//! Error types for broadgrid operations.

use thiserror::Error;

/// Convenience alias for fallible broadgrid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors surfaced by grid construction and mutation.
///
/// Queries never fail: hostile query input yields an empty result instead
/// (see [`crate::SpatialHash`]).
#[derive(Debug, Error)]
pub enum GridError {
    /// Mutation input was rejected (non-finite position or extent).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Completing the mutation would grow the index past its configured
    /// cell limit. The index is left in its pre-call state.
    #[error("Cell capacity exceeded: {current} cells live, limit is {limit}")]
    CapacityExceeded {
        /// Number of cells currently materialized.
        current: usize,
        /// Configured `max_cells` bound.
        limit: usize,
    },
}
