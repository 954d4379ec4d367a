//! View error types
//!
//! Deriving a view from a snapshot cannot fail; only rendering it into an
//! export format can.

use thiserror::Error;

/// Errors raised while rendering a view
#[derive(Error, Debug)]
pub enum ViewError {
    /// CSV writer failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Rendered bytes could not be turned into text
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for view rendering
pub type ViewResult<T> = Result<T, ViewError>;
