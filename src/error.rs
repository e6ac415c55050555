//! Error types for the multires-reshape crate.

use thiserror::Error;

/// Main error type for multires-reshape operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The mesh carries no displacement grid layer at all. A reshape
    /// context cannot be built without one.
    #[error("Mesh has no displacement grid layer")]
    MissingDisplacementLayer,

    /// Invalid base-mesh topology.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
