//! Persisted state for boxcmp.
//!
//! This crate defines the schema written into the shareable URL fragment
//! and the codec that moves it in and out of a query-string-shaped hash.
//!
//! Only the user-supplied attributes of each box are persisted. Positions
//! are derived by the layout kernel and never stored.

use serde::{Deserialize, Serialize};

pub mod error;
pub mod fragment;

pub use error::CodecError;
pub use fragment::{decode, encode, read_config, write_config, Fragment, CONFIG_KEY};

/// Current schema version written by [`Config`].
pub const CONFIG_VERSION: u32 = 1;

/// Name given to boxes persisted without one.
pub const DEFAULT_NAME: &str = "Object";

/// Color given to boxes persisted without one.
pub const DEFAULT_COLOR: &str = "#00ff00";

/// The persisted attributes of one box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Stable identifier. `None` asks the store to generate one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Extent along x.
    pub width: f64,
    /// Extent along y (up).
    pub height: f64,
    /// Extent along z.
    pub length: f64,
    /// Opaque color token, e.g. `"#ff8800"`.
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl BoxSpec {
    /// Create a spec without an id.
    pub fn new(
        name: impl Into<String>,
        width: f64,
        height: f64,
        length: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            width,
            height,
            length,
            color: color.into(),
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// The document stored in the fragment's config slot.
///
/// Documents written before versioning carry no `version` field and are
/// read as version 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Boxes in display and layout order.
    pub objects: Vec<BoxSpec>,
}

impl Config {
    /// Create a current-version config holding `objects`.
    pub fn new(objects: Vec<BoxSpec>) -> Self {
        Self {
            version: CONFIG_VERSION,
            objects,
        }
    }

    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string, rejecting unknown future versions.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let config: Config = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(CodecError::UnsupportedVersion(config.version));
        }
        Ok(config)
    }
}
