use thiserror::Error;

/// Top-level error type for the drafting kernel.
///
/// Only malformed input is reported through this type. Degenerate geometry
/// (parallel lines, collapsed radii, points inside a circle) is answered with
/// `None` or an empty list by the operation itself.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    #[error("local frame axes are not orthonormal: {0}")]
    NotOrthonormal(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to curve construction and editing.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("arc-through point at index {index} has no {side} neighbour")]
    DanglingArcThrough { index: usize, side: &'static str },

    #[error("consecutive arc-through points at indices {first} and {second}")]
    ConsecutiveArcThrough { first: usize, second: usize },
}

/// Convenience type alias for results using [`DraftError`].
pub type Result<T> = std::result::Result<T, DraftError>;
