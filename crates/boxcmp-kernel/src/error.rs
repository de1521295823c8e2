//! Error types for the kernel.

use thiserror::Error;

/// Errors that can occur while fitting a view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    /// Lens parameters cannot produce a finite projection.
    #[error("invalid lens: {0}")]
    InvalidLens(String),
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, ViewError>;
