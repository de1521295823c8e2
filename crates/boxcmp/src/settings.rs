//! Runtime viewer settings.
//!
//! ```toml
//! fov_degrees = 60.0
//! aspect = 1.5
//! viewpoint = "isometric"
//! alignment = "side"
//! ```

use std::path::Path;

use boxcmp_kernel::{Alignment, Lens, Viewpoint};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Viewport widths at or below this are laid out in portrait.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Aspect ratio of the canvas for a given viewport width: 9:16 portrait on
/// narrow screens, 16:9 landscape otherwise.
pub fn aspect_for_viewport_width(width: f64) -> f64 {
    if width <= MOBILE_BREAKPOINT {
        9.0 / 16.0
    } else {
        16.0 / 9.0
    }
}

/// Camera and initial layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Viewport width / height.
    pub aspect: f64,
    /// Initial viewpoint.
    pub viewpoint: Viewpoint,
    /// Initial alignment.
    pub alignment: Alignment,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
            viewpoint: Viewpoint::Front,
            alignment: Alignment::Front,
        }
    }
}

impl ViewerSettings {
    /// The lens described by these settings.
    pub fn lens(&self) -> Result<Lens, SettingsError> {
        Ok(Lens::new(self.fov_degrees, self.aspect)?)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.lens().map(|_| ())
    }

    /// Parse and validate settings from TOML. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
