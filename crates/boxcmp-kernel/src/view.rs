//! Camera placement that frames a bounding box from canonical directions.
//!
//! Given the scene's [`BoundingBox`], a perspective [`Lens`] and a
//! [`Viewpoint`], [`fit_view`] picks the distance at which the box fills
//! [`SCREEN_COVERAGE`] of the binding field of view, and places the camera
//! on the viewpoint's direction from the box center.
//!
//! The computation is stateless: the same inputs always yield the same
//! [`CameraPose`].

use boxcmp_math::{Axis, Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{Result, ViewError};

/// Fraction of the field of view the framed extent should occupy.
pub const SCREEN_COVERAGE: f64 = 0.6;

/// Distance multiplier applied to isometric framing.
///
/// The diagonal overestimates the projected silhouette, so the camera is
/// pulled in a little.
pub const ISOMETRIC_CORRECTION: f64 = 0.8;

/// Smallest extent used when computing distances.
pub const MIN_EXTENT: f64 = 1e-3;

/// Canonical camera direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewpoint {
    /// Looking down `-z`; sees width and height.
    #[default]
    Front,
    /// Looking down `-y`; sees width and length.
    Top,
    /// Looking down `-x`; sees length and height.
    Side,
    /// Looking along `-(1, 1, 1)`.
    Isometric,
    /// Fallback framing on the largest extent, from the front.
    Default,
}

impl Viewpoint {
    /// Parse a viewpoint tag. Unrecognized tags map to [`Viewpoint::Default`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "front" => Viewpoint::Front,
            "top" => Viewpoint::Top,
            "side" => Viewpoint::Side,
            "isometric" | "iso" => Viewpoint::Isometric,
            _ => Viewpoint::Default,
        }
    }

    /// The lowercase tag for this viewpoint.
    pub fn tag(self) -> &'static str {
        match self {
            Viewpoint::Front => "front",
            Viewpoint::Top => "top",
            Viewpoint::Side => "side",
            Viewpoint::Isometric => "isometric",
            Viewpoint::Default => "default",
        }
    }

    /// Unit vector from the target toward the camera.
    pub fn direction(self) -> Vec3 {
        match self {
            Viewpoint::Front | Viewpoint::Default => Axis::Z.unit(),
            Viewpoint::Top => Axis::Y.unit(),
            Viewpoint::Side => Axis::X.unit(),
            Viewpoint::Isometric => Vec3::new(1.0, 1.0, 1.0).normalize(),
        }
    }
}

impl std::fmt::Display for Viewpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Perspective lens parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    fov_y: f64,
    aspect: f64,
}

impl Lens {
    /// Create a lens from a vertical field of view in degrees and an aspect
    /// ratio (viewport width / height).
    pub fn new(fov_y_degrees: f64, aspect: f64) -> Result<Self> {
        if !(fov_y_degrees.is_finite() && fov_y_degrees > 0.0 && fov_y_degrees < 180.0) {
            return Err(ViewError::InvalidLens(format!(
                "vertical field of view must be in (0, 180) degrees, got {fov_y_degrees}"
            )));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(ViewError::InvalidLens(format!(
                "aspect ratio must be positive, got {aspect}"
            )));
        }
        Ok(Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
        })
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f64 {
        self.fov_y
    }

    /// Horizontal field of view in radians.
    pub fn fov_x(&self) -> f64 {
        2.0 * ((self.fov_y / 2.0).tan() * self.aspect).atan()
    }

    /// Viewport aspect ratio.
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// The same field of view on a viewport with a different aspect ratio.
    pub fn with_aspect(&self, aspect: f64) -> Result<Self> {
        Self::new(self.fov_y.to_degrees(), aspect)
    }
}

/// Camera position and look-at target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Point3,
    /// Look-at point (the bounding box center).
    pub target: Point3,
}

impl CameraPose {
    /// Distance from the eye to the target.
    pub fn distance(&self) -> f64 {
        (self.position - self.target).norm()
    }
}

/// Smallest screen coverage used when computing distances.
pub const MIN_COVERAGE: f64 = 1e-3;

/// Distance at which `extent` fills `coverage` of a field of view `fov`.
fn required_distance(extent: f64, fov: f64, coverage: f64) -> f64 {
    extent.max(MIN_EXTENT) / (2.0 * (fov / 2.0).tan() * coverage)
}

/// Camera distance that frames `bbox` from `viewpoint`.
///
/// `coverage` is clamped to at least [`MIN_COVERAGE`]; a NaN coverage falls
/// back to [`SCREEN_COVERAGE`].
pub fn fit_distance(bbox: &BoundingBox, lens: &Lens, viewpoint: Viewpoint, coverage: f64) -> f64 {
    let coverage = if coverage.is_nan() {
        SCREEN_COVERAGE
    } else {
        coverage.max(MIN_COVERAGE)
    };
    let (fov_x, fov_y) = (lens.fov_x(), lens.fov_y());
    let size = bbox.size;
    // (extent across the screen, extent up the screen)
    let fit = |across: f64, up: f64| {
        required_distance(across, fov_x, coverage).max(required_distance(up, fov_y, coverage))
    };

    match viewpoint {
        Viewpoint::Front => fit(size.x, size.y),
        Viewpoint::Top => fit(size.x, size.z),
        Viewpoint::Side => fit(size.z, size.y),
        Viewpoint::Isometric => {
            let diagonal = bbox.diagonal();
            fit(diagonal, diagonal) * ISOMETRIC_CORRECTION
        }
        Viewpoint::Default => {
            let largest = bbox.max_extent();
            fit(largest, largest)
        }
    }
}

/// Frame `bbox` from `viewpoint` at the default [`SCREEN_COVERAGE`].
pub fn fit_view(bbox: &BoundingBox, lens: &Lens, viewpoint: Viewpoint) -> CameraPose {
    fit_view_with_coverage(bbox, lens, viewpoint, SCREEN_COVERAGE)
}

/// Frame `bbox` from `viewpoint` so it fills `coverage` of the view.
///
/// Values above 1 crop the box; see [`fit_distance`] for the lower clamp.
pub fn fit_view_with_coverage(
    bbox: &BoundingBox,
    lens: &Lens,
    viewpoint: Viewpoint,
    coverage: f64,
) -> CameraPose {
    let distance = fit_distance(bbox, lens, viewpoint, coverage);
    CameraPose {
        position: bbox.center + viewpoint.direction() * distance,
        target: bbox.center,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [Viewpoint; 5] = [
        Viewpoint::Front,
        Viewpoint::Top,
        Viewpoint::Side,
        Viewpoint::Isometric,
        Viewpoint::Default,
    ];

    fn square_lens() -> Lens {
        // tan(45°) = 1 on both axes
        Lens::new(90.0, 1.0).unwrap()
    }

    fn sized(x: f64, y: f64, z: f64) -> BoundingBox {
        BoundingBox::new(Point3::origin(), Point3::new(x, y, z))
    }

    #[test]
    fn test_horizontal_fov() {
        let lens = Lens::new(90.0, 1.0).unwrap();
        assert_relative_eq!(lens.fov_x(), lens.fov_y(), epsilon = 1e-12);

        let wide = Lens::new(75.0, 16.0 / 9.0).unwrap();
        assert!(wide.fov_x() > wide.fov_y());
        let tall = Lens::new(75.0, 9.0 / 16.0).unwrap();
        assert!(tall.fov_x() < tall.fov_y());
    }

    #[test]
    fn test_with_aspect_keeps_fov() {
        let lens = Lens::new(60.0, 1.0).unwrap();
        let wide = lens.with_aspect(2.0).unwrap();
        assert_relative_eq!(wide.fov_y(), lens.fov_y(), epsilon = 1e-12);
        assert_eq!(wide.aspect(), 2.0);
        assert!(lens.with_aspect(-1.0).is_err());
    }

    #[test]
    fn test_invalid_lens() {
        assert!(Lens::new(0.0, 1.0).is_err());
        assert!(Lens::new(180.0, 1.0).is_err());
        assert!(Lens::new(f64::NAN, 1.0).is_err());
        assert!(Lens::new(75.0, 0.0).is_err());
        assert!(Lens::new(75.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_front_binding_constraint() {
        let bbox = sized(6.0, 3.0, 100.0);
        let pose = fit_view(&bbox, &square_lens(), Viewpoint::Front);
        // width binds: 6 / (2 * 1 * 0.6)
        assert_relative_eq!(pose.distance(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(pose.target, bbox.center);
        assert_relative_eq!(pose.position, Point3::new(3.0, 1.5, 55.0), epsilon = 1e-9);
    }

    #[test]
    fn test_top_and_side_extents() {
        let bbox = sized(1.0, 2.0, 12.0);
        let lens = square_lens();
        assert_relative_eq!(
            fit_view(&bbox, &lens, Viewpoint::Top).distance(),
            10.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            fit_view(&bbox, &lens, Viewpoint::Side).distance(),
            10.0,
            epsilon = 1e-9
        );
        let top = fit_view(&bbox, &lens, Viewpoint::Top);
        assert_relative_eq!(top.position.y - top.target.y, 10.0, epsilon = 1e-9);
        let side = fit_view(&bbox, &lens, Viewpoint::Side);
        assert_relative_eq!(side.position.x - side.target.x, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_isometric_uses_diagonal_with_correction() {
        let bbox = sized(2.0, 3.0, 6.0);
        let pose = fit_view(&bbox, &square_lens(), Viewpoint::Isometric);
        assert_relative_eq!(pose.distance(), 7.0 / 1.2 * 0.8, epsilon = 1e-9);

        let dir = (pose.position - pose.target).normalize();
        let expected = 1.0 / 3.0_f64.sqrt();
        assert_relative_eq!(dir, Vec3::new(expected, expected, expected), epsilon = 1e-12);
    }

    #[test]
    fn test_default_uses_largest_extent() {
        let bbox = sized(2.0, 9.0, 3.0);
        let pose = fit_view(&bbox, &square_lens(), Viewpoint::Default);
        assert_relative_eq!(pose.distance(), 9.0 / 1.2, epsilon = 1e-9);
        assert!(pose.position.z > pose.target.z);
    }

    #[test]
    fn test_distance_monotonic_in_every_extent() {
        let lens = Lens::new(75.0, 16.0 / 9.0).unwrap();
        let base = Vec3::new(3.0, 2.0, 4.0);
        for viewpoint in ALL {
            let d0 = fit_distance(&sized(base.x, base.y, base.z), &lens, viewpoint, SCREEN_COVERAGE);
            for axis in Axis::ALL {
                let mut grown = base;
                grown[axis.index()] *= 3.0;
                let d1 = fit_distance(
                    &sized(grown.x, grown.y, grown.z),
                    &lens,
                    viewpoint,
                    SCREEN_COVERAGE,
                );
                assert!(d1 >= d0, "{viewpoint} shrank when growing {axis:?}");
            }
        }
    }

    #[test]
    fn test_degenerate_box_is_finite() {
        let bbox = BoundingBox::zero();
        let lens = Lens::new(75.0, 16.0 / 9.0).unwrap();
        for viewpoint in ALL {
            let pose = fit_view(&bbox, &lens, viewpoint);
            let d = pose.distance();
            assert!(d.is_finite() && d > 0.0, "{viewpoint}: {d}");
            assert!(pose.position.coords.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_idempotent() {
        let bbox = sized(4.0, 1.0, 2.0);
        let lens = Lens::new(75.0, 1.5).unwrap();
        let a = fit_view(&bbox, &lens, Viewpoint::Front);
        let b = fit_view(&bbox, &lens, Viewpoint::Front);
        assert_eq!(a, b);
    }

    #[test]
    fn test_nonpositive_coverage_is_clamped() {
        let bbox = sized(4.0, 4.0, 4.0);
        let lens = square_lens();
        let floor = fit_view_with_coverage(&bbox, &lens, Viewpoint::Front, MIN_COVERAGE);
        for coverage in [0.0, -1.0, f64::NEG_INFINITY] {
            let pose = fit_view_with_coverage(&bbox, &lens, Viewpoint::Front, coverage);
            assert!(pose.distance().is_finite());
            assert_eq!(pose, floor);
        }
        let nan = fit_view_with_coverage(&bbox, &lens, Viewpoint::Front, f64::NAN);
        assert_eq!(nan, fit_view(&bbox, &lens, Viewpoint::Front));
    }

    #[test]
    fn test_lower_coverage_moves_camera_back() {
        let bbox = sized(4.0, 4.0, 4.0);
        let lens = square_lens();
        let tight = fit_view_with_coverage(&bbox, &lens, Viewpoint::Front, 0.9);
        let loose = fit_view_with_coverage(&bbox, &lens, Viewpoint::Front, 0.3);
        assert!(loose.distance() > tight.distance());
    }

    #[test]
    fn test_viewpoint_tags() {
        for viewpoint in ALL {
            assert_eq!(Viewpoint::from_tag(viewpoint.tag()), viewpoint);
        }
        assert_eq!(Viewpoint::from_tag("Front"), Viewpoint::Front);
        assert_eq!(Viewpoint::from_tag("bird's eye"), Viewpoint::Default);
    }
}
