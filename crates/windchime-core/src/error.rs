//! Error types for the wind simulation.

use thiserror::Error;

/// Result type alias for simulation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the simulation core.
///
/// None of these are fatal to a running simulation; the worst outcome is a
/// dropped particle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The particle arena is full; the spawn request was dropped
    #[error("particle pool exhausted (capacity {capacity})")]
    PoolExhausted { capacity: usize },

    /// A configuration value is out of its valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Emission toward a target was requested but no targets are present
    #[error("no targets available for emission")]
    NoTargets,
}
