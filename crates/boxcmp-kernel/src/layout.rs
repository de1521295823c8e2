//! Deterministic linear packing of boxes along one axis.

use boxcmp_math::{component, Axis, Point3};
use serde::{Deserialize, Serialize};

use crate::Placed;

/// Spacing between consecutive boxes along the packing axis.
pub const PACKING_GAP: f64 = 1.0;

/// Largest box extent the layout accepts.
///
/// Keeps the packing cursor and the bounding box finite for any realistic
/// number of boxes; callers reject larger dimensions before layout.
pub const MAX_DIMENSION: f64 = 1e12;

/// Which horizontal axis boxes are lined up along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Side by side along `x`, as seen from the front.
    #[default]
    Front,
    /// One behind the other along `z`, as seen from the side.
    Side,
}

impl Alignment {
    /// The axis boxes are packed along.
    pub fn packing_axis(self) -> Axis {
        match self {
            Alignment::Front => Axis::X,
            Alignment::Side => Axis::Z,
        }
    }

    /// The horizontal axis that is neither packing nor gravity.
    pub fn cross_axis(self) -> Axis {
        match self {
            Alignment::Front => Axis::Z,
            Alignment::Side => Axis::X,
        }
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alignment::Front => f.write_str("front"),
            Alignment::Side => f.write_str("side"),
        }
    }
}

/// Assign every item a position, in slice order.
///
/// Along the packing axis each box starts where the previous one ended
/// plus [`PACKING_GAP`]; the first box starts at 0. Every box rests on the
/// `y = 0` ground plane, and its near face on the cross axis sits at 0.
/// Positions are recomputed from scratch, so switching alignment never
/// accumulates drift.
pub fn layout<T: Placed>(items: &mut [T], alignment: Alignment) {
    let packing = alignment.packing_axis();
    let cross = alignment.cross_axis();
    let mut cursor = 0.0;

    for item in items.iter_mut() {
        let size = item.size();
        let extent = component(&size, packing);

        let mut coords = [0.0; 3];
        coords[packing.index()] = cursor + extent / 2.0;
        coords[Axis::UP.index()] = component(&size, Axis::UP) / 2.0;
        coords[cross.index()] = component(&size, cross) / 2.0;
        item.set_position(Point3::new(coords[0], coords[1], coords[2]));

        cursor += extent + PACKING_GAP;
    }
}

/// Total length occupied along the packing axis, gaps included.
pub fn packed_length<T: Placed>(items: &[T], alignment: Alignment) -> f64 {
    let axis = alignment.packing_axis();
    let extents: f64 = items.iter().map(|i| component(&i.size(), axis)).sum();
    let gaps = items.len().saturating_sub(1) as f64 * PACKING_GAP;
    extents + gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::{bounding_box, corners};
    use crate::testing::TestBox;
    use approx::assert_relative_eq;

    fn sample() -> Vec<TestBox> {
        vec![
            TestBox::new(2.0, 2.0, 2.0),
            TestBox::new(4.0, 4.0, 4.0),
            TestBox::new(0.5, 3.0, 7.0),
        ]
    }

    #[test]
    fn test_front_positions() {
        let mut items = sample();
        layout(&mut items, Alignment::Front);
        assert_relative_eq!(items[0].position, Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(items[1].position, Point3::new(5.0, 2.0, 2.0));
        assert_relative_eq!(items[2].position, Point3::new(8.25, 1.5, 3.5));
    }

    #[test]
    fn test_side_positions() {
        let mut items = sample();
        layout(&mut items, Alignment::Side);
        assert_relative_eq!(items[0].position, Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(items[1].position, Point3::new(2.0, 2.0, 5.0));
        assert_relative_eq!(items[2].position, Point3::new(0.25, 1.5, 11.5));
    }

    #[test]
    fn test_consecutive_gap_is_exact() {
        for alignment in [Alignment::Front, Alignment::Side] {
            let mut items = sample();
            layout(&mut items, alignment);
            let i = alignment.packing_axis().index();
            for pair in items.windows(2) {
                let (_, prev_max) = corners(&pair[0]);
                let (next_min, _) = corners(&pair[1]);
                assert_relative_eq!(next_min[i] - prev_max[i], PACKING_GAP);
            }
        }
    }

    #[test]
    fn test_all_rest_on_ground() {
        let mut items = sample();
        layout(&mut items, Alignment::Front);
        for item in &items {
            let (min, _) = corners(item);
            assert_relative_eq!(min.y, 0.0);
            assert_relative_eq!(min.z, 0.0);
        }
    }

    #[test]
    fn test_bbox_matches_packed_length() {
        let mut items = vec![TestBox::new(2.0, 2.0, 2.0), TestBox::new(4.0, 4.0, 4.0)];
        layout(&mut items, Alignment::Front);
        let bbox = bounding_box(&items);
        assert_relative_eq!(bbox.size.x, 7.0);
        assert_relative_eq!(bbox.size.x, packed_length(&items, Alignment::Front));
        assert_relative_eq!(bbox.size.y, 4.0);
        assert_relative_eq!(bbox.size.z, 4.0);
    }

    #[test]
    fn test_switching_alignment_recomputes() {
        let mut items = sample();
        layout(&mut items, Alignment::Front);
        let front: Vec<_> = items.iter().map(|i| i.position).collect();
        layout(&mut items, Alignment::Side);
        layout(&mut items, Alignment::Front);
        let again: Vec<_> = items.iter().map(|i| i.position).collect();
        assert_eq!(front, again);
    }

    #[test]
    fn test_largest_boxes_stay_finite() {
        let mut items = vec![TestBox::new(MAX_DIMENSION, MAX_DIMENSION, MAX_DIMENSION); 1000];
        layout(&mut items, Alignment::Front);
        let bbox = bounding_box(&items);
        assert!(bbox.size.iter().all(|c| c.is_finite()));
        assert!(bbox.center.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_empty_layout() {
        let mut items: Vec<TestBox> = Vec::new();
        layout(&mut items, Alignment::Side);
        assert_eq!(packed_length(&items, Alignment::Side), 0.0);
    }

    #[test]
    fn test_alignment_display() {
        assert_eq!(Alignment::Front.to_string(), "front");
        assert_eq!(Alignment::Side.to_string(), "side");
        assert_eq!(Alignment::default(), Alignment::Front);
    }
}
