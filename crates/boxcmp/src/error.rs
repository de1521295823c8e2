//! Error types for the object store and viewer settings.

use boxcmp_kernel::ViewError;
use thiserror::Error;

use crate::object::BoxId;

/// Errors returned by [`ObjectStore`](crate::ObjectStore) operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Another box already uses this id.
    #[error("an object with id {0:?} already exists")]
    DuplicateId(BoxId),

    /// A dimension is negative, NaN or above the layout limit.
    #[error(
        "dimensions must be between 0 and {max}, got {width} x {height} x {length}",
        max = boxcmp_kernel::MAX_DIMENSION
    )]
    InvalidDimensions {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
        /// Requested length.
        length: f64,
    },

    /// The viewport cannot be projected.
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Errors loading or validating [`ViewerSettings`](crate::ViewerSettings).
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for the schema.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Camera parameters are out of range.
    #[error(transparent)]
    View(#[from] ViewError),
}
