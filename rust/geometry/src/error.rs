use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the geometry core.
///
/// Empty clip results and missing materials are not errors; they are
/// signaled through `Option`/empty collections by the operations concerned.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Invalid extrusion parameters: {0}")]
    InvalidExtrusion(String),

    #[error("Boundary invariant violated: {0}")]
    Boundary(#[from] crate::path::BoundaryError),

    #[error("Path buffer marshalling failed: {0}")]
    Marshal(#[from] crate::native_paths::MarshalError),
}
