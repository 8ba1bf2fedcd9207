//! Collision helpers.

use crate::math::Vec2;

/// Overlap test for axis-aligned boxes given by center and full size.
///
/// Touching edges do not count as overlap.
pub fn boxes_overlap(pos_a: Vec2, size_a: Vec2, pos_b: Vec2, size_b: Vec2) -> bool {
    (pos_a.x - pos_b.x).abs() * 2.0 < size_a.x + size_b.x
        && (pos_a.y - pos_b.y).abs() * 2.0 < size_a.y + size_b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes() {
        assert!(boxes_overlap(Vec2::ZERO, Vec2::ONE, Vec2::new(0.5, 0.5), Vec2::ONE));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        assert!(!boxes_overlap(Vec2::ZERO, Vec2::ONE, Vec2::new(1.0, 0.0), Vec2::ONE));
    }

    #[test]
    fn separated_on_one_axis_is_enough() {
        assert!(!boxes_overlap(Vec2::ZERO, Vec2::new(4.0, 1.0), Vec2::new(0.0, 3.0), Vec2::ONE));
    }
}
