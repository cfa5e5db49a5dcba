//! Error types shared by the kernel and the packing engine.

use thiserror::Error;

/// Errors reported at the engine boundary or by the geometry kernel.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The input polygon violates an invariant (too few vertices,
    /// zero-area boundary, self-intersection the kernel tripped over).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The sheet or container description is unusable.
    #[error("invalid boundary: {0}")]
    InvalidBoundary(String),

    /// A coordinate could not be promoted to the exact kernel.
    #[error("coordinate cannot be represented exactly: {0}")]
    NonFiniteCoordinate(f64),

    /// A kernel operation reached a state it cannot recover from.
    /// These are fatal and abort the packing call.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
