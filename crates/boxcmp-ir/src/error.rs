//! Error types for the state codec.

use thiserror::Error;

/// Reasons a persisted config cannot be restored.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The slot value is not valid percent-encoded UTF-8.
    #[error("config is not valid UTF-8 after percent-decoding: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The decoded text is not a valid config document.
    #[error("config is not a valid document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document was written by a newer schema.
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
}
