//! Axis-aligned bounding box over a set of placed boxes.
//!
//! The box is derived state: callers recompute it after every change to
//! the collection instead of caching it.

use boxcmp_math::{point_max, point_min, Point3, Vec3};

use crate::Placed;

/// Axis-aligned bounding box in 3D, with derived center and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
    /// Midpoint of `min` and `max`.
    pub center: Point3,
    /// Extent along each axis (`max - min`).
    pub size: Vec3,
}

impl BoundingBox {
    /// Create a bounding box from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self {
            min,
            max,
            center: Point3::from((min.coords + max.coords) / 2.0),
            size: max - min,
        }
    }

    /// The all-zero box reported for an empty collection.
    pub fn zero() -> Self {
        Self::new(Point3::origin(), Point3::origin())
    }

    /// Length of the 3D diagonal.
    pub fn diagonal(&self) -> f64 {
        self.size.norm()
    }

    /// Largest extent along any single axis.
    pub fn max_extent(&self) -> f64 {
        self.size.x.max(self.size.y).max(self.size.z)
    }

    /// Test whether a point lies inside or on the boundary.
    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Min and max corners of a single placed box.
pub fn corners<T: Placed + ?Sized>(item: &T) -> (Point3, Point3) {
    let half = item.size() / 2.0;
    let p = item.position();
    (p - half, p + half)
}

/// Compute the bounding box enclosing every item's full extent.
///
/// Each item spans `position ± size / 2`. An empty slice yields
/// [`BoundingBox::zero`], never an inverted or infinite box.
pub fn bounding_box<T: Placed>(items: &[T]) -> BoundingBox {
    let mut iter = items.iter().map(corners::<T>);
    let Some((mut min, mut max)) = iter.next() else {
        return BoundingBox::zero();
    };
    for (lo, hi) in iter {
        min = point_min(&min, &lo);
        max = point_max(&max, &hi);
    }
    BoundingBox::new(min, max)
}
