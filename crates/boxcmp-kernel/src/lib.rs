#![warn(missing_docs)]

//! Layout kernel for boxcmp.
//!
//! Pure functions over a set of axis-aligned boxes:
//!
//! - [`bbox`] - bounding box of the current arrangement
//! - [`layout`] - non-overlapping linear packing along a chosen axis
//! - [`view`] - camera pose that frames the arrangement from a viewpoint
//!
//! None of these keep state between calls; the caller owns the boxes and
//! re-runs them after every change.
//!
//! # Example
//!
//! ```
//! use boxcmp_kernel::{bounding_box, fit_view, layout, Alignment, Lens, Placed, Viewpoint};
//! use boxcmp_math::{Point3, Vec3};
//!
//! struct Crate {
//!     size: Vec3,
//!     position: Point3,
//! }
//!
//! impl Placed for Crate {
//!     fn size(&self) -> Vec3 {
//!         self.size
//!     }
//!     fn position(&self) -> Point3 {
//!         self.position
//!     }
//!     fn set_position(&mut self, position: Point3) {
//!         self.position = position;
//!     }
//! }
//!
//! let mut crates = vec![
//!     Crate { size: Vec3::new(2.0, 2.0, 2.0), position: Point3::origin() },
//!     Crate { size: Vec3::new(4.0, 4.0, 4.0), position: Point3::origin() },
//! ];
//! layout(&mut crates, Alignment::Front);
//! let bbox = bounding_box(&crates);
//! assert_eq!(bbox.size.x, 7.0);
//!
//! let lens = Lens::new(75.0, 16.0 / 9.0).unwrap();
//! let pose = fit_view(&bbox, &lens, Viewpoint::Isometric);
//! assert_eq!(pose.target, bbox.center);
//! ```

pub mod bbox;
pub mod error;
pub mod layout;
pub mod view;

pub use bbox::{bounding_box, BoundingBox};
pub use error::{Result, ViewError};
pub use layout::{layout, packed_length, Alignment, MAX_DIMENSION, PACKING_GAP};
pub use view::{
    fit_distance, fit_view, fit_view_with_coverage, CameraPose, Lens, Viewpoint,
    ISOMETRIC_CORRECTION, MIN_COVERAGE, MIN_EXTENT, SCREEN_COVERAGE,
};

use boxcmp_math::{Point3, Vec3};

/// An axis-aligned box with a size and a center position.
///
/// Size components are (width, height, length) along (x, y, z).
pub trait Placed {
    /// Extent along each axis.
    fn size(&self) -> Vec3;

    /// Center of the box.
    fn position(&self) -> Point3;

    /// Move the box so its center is at `position`.
    fn set_position(&mut self, position: Point3);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    pub struct TestBox {
        pub size: Vec3,
        pub position: Point3,
    }

    impl TestBox {
        pub fn new(width: f64, height: f64, length: f64) -> Self {
            Self::at(width, height, length, Point3::origin())
        }

        pub fn at(width: f64, height: f64, length: f64, position: Point3) -> Self {
            Self {
                size: Vec3::new(width, height, length),
                position,
            }
        }
    }

    impl Placed for TestBox {
        fn size(&self) -> Vec3 {
            self.size
        }

        fn position(&self) -> Point3 {
            self.position
        }

        fn set_position(&mut self, position: Point3) {
            self.position = position;
        }
    }
}
