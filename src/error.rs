//! Error type shared by the distortion engine.
//!
//! Every failure is a property of the input geometry, so nothing here is
//! retryable: a complex that fails any stage yields no parameters.

use thiserror::Error;

/// Errors raised while building a complex or computing its parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistortionError {
    /// The complex does not hold the expected number of positions.
    #[error("Input shape error: expected {expected} positions, got {found}")]
    InputShape {
        /// Number of entries required
        expected: usize,
        /// Number of entries supplied
        found: usize,
    },
    /// A zero-length vector reached an angle or projection computation.
    #[error("Degenerate vector: {0}")]
    DegenerateVector(String),
    /// Three points used to define a plane are collinear.
    #[error("Degenerate plane: {0}")]
    DegeneratePlane(String),
    /// An octahedron could not be extracted from a full structure.
    #[error("Extraction error: {0}")]
    Extraction(String),
}

/// Type alias for engine results
pub type Result<T> = std::result::Result<T, DistortionError>;
