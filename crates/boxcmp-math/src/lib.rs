#![warn(missing_docs)]

//! Math types for the boxcmp layout kernel.
//!
//! Thin wrappers around nalgebra providing the handful of types the
//! layout and view-fitting code shares: points, vectors, and the three
//! world axes. The world is right-handed with `+y` up.

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// One of the three world axes.
///
/// Box dimensions map onto axes as width → [`Axis::X`], height →
/// [`Axis::Y`] (up), length → [`Axis::Z`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis, spanned by box width.
    X,
    /// Gravity ("up") axis, spanned by box height.
    Y,
    /// Depth axis, spanned by box length.
    Z,
}

impl Axis {
    /// All axes in component order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The fixed up axis every object rests along.
    pub const UP: Axis = Axis::Y;

    /// Component index of this axis (0, 1 or 2).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector pointing along `+self`.
    pub fn unit(self) -> Vec3 {
        let mut v = Vec3::zeros();
        v[self.index()] = 1.0;
        v
    }
}

/// Read the component of `v` along `axis`.
pub fn component(v: &Vec3, axis: Axis) -> f64 {
    v[axis.index()]
}

/// Component-wise minimum of two points.
pub fn point_min(a: &Point3, b: &Point3) -> Point3 {
    Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

/// Component-wise maximum of two points.
pub fn point_max(a: &Point3, b: &Point3) -> Point3 {
    Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}
