//! Layout geometry and the angle-based direction classifier.
//!
//! Slots sit on a triangular lattice: advancing `row` moves one spacing to the
//! right, advancing `col` moves half a spacing right and one row-height up.
//! The classifier buckets the angle between two slot positions into six 60°
//! sectors with inclusive lower bounds.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::types::{Coord, Direction, SlotId};

/// Distance between adjacent peg centers.
pub const DEFAULT_SPACING: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Vertical distance between bands for a given spacing.
pub fn row_height(spacing: f64) -> f64 {
    spacing * 3f64.sqrt() / 2.0
}

pub fn slot_position(coord: Coord, spacing: f64) -> Point {
    Point {
        x: (coord.row as f64 + coord.col as f64 / 2.0) * spacing,
        y: coord.col as f64 * row_height(spacing),
    }
}

/// Counter-clockwise angle of `to - from` against the +x axis, in degrees.
pub fn signed_angle_deg(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// Bucket an angle into a direction.
///
/// [-30,30) right, [30,90) top-right, [90,150) top-left, [150,180] and
/// (-180,-150) left, [-150,-90) bottom-left, [-90,-30) bottom-right.
pub fn classify_angle(deg: f64) -> Direction {
    if !deg.is_finite() {
        return Direction::Invalid;
    }
    let mut a = deg.rem_euclid(360.0);
    if a >= 180.0 {
        a -= 360.0;
    }
    match a {
        a if (-30.0..30.0).contains(&a) => Direction::Right,
        a if (30.0..90.0).contains(&a) => Direction::TopRight,
        a if (90.0..150.0).contains(&a) => Direction::TopLeft,
        a if (-150.0..-90.0).contains(&a) => Direction::BottomLeft,
        a if (-90.0..-30.0).contains(&a) => Direction::BottomRight,
        _ => Direction::Left,
    }
}

/// Direction from one point toward another. Coincident points are `Invalid`.
pub fn classify(from: Point, to: Point) -> Direction {
    if from == to {
        return Direction::Invalid;
    }
    classify_angle(signed_angle_deg(from, to))
}

/// Direction between two slots of `board` by their layout positions.
pub fn classify_slots(board: &Board, from: SlotId, to: SlotId) -> Direction {
    match (board.coord(from), board.coord(to)) {
        (Some(a), Some(b)) => classify(
            slot_position(a, DEFAULT_SPACING),
            slot_position(b, DEFAULT_SPACING),
        ),
        _ => Direction::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_lower_bounds_are_inclusive() {
        assert_eq!(classify_angle(-30.0), Direction::Right);
        assert_eq!(classify_angle(30.0), Direction::TopRight);
        assert_eq!(classify_angle(90.0), Direction::TopLeft);
        assert_eq!(classify_angle(150.0), Direction::Left);
        assert_eq!(classify_angle(-150.0), Direction::BottomLeft);
        assert_eq!(classify_angle(-90.0), Direction::BottomRight);
    }

    #[test]
    fn test_sector_upper_bounds_are_exclusive() {
        assert_eq!(classify_angle(29.999), Direction::Right);
        assert_eq!(classify_angle(89.999), Direction::TopRight);
        assert_eq!(classify_angle(149.999), Direction::TopLeft);
        assert_eq!(classify_angle(-150.001), Direction::Left);
        assert_eq!(classify_angle(-90.001), Direction::BottomLeft);
        assert_eq!(classify_angle(-30.001), Direction::BottomRight);
    }

    #[test]
    fn test_top_right_sector() {
        for deg in [30.0, 45.0, 60.0, 75.0, 89.9] {
            assert_eq!(classify_angle(deg), Direction::TopRight, "angle {deg}");
        }
    }

    #[test]
    fn test_left_wraps_through_180() {
        assert_eq!(classify_angle(180.0), Direction::Left);
        assert_eq!(classify_angle(-180.0), Direction::Left);
        assert_eq!(classify_angle(-179.0), Direction::Left);
        assert_eq!(classify_angle(170.0), Direction::Left);
    }

    #[test]
    fn test_angles_outside_half_turn_are_normalized() {
        assert_eq!(classify_angle(420.0), Direction::TopRight);
        assert_eq!(classify_angle(-300.0), Direction::TopRight);
        assert_eq!(classify_angle(360.0), Direction::Right);
    }

    #[test]
    fn test_non_finite_and_zero_length_are_invalid() {
        assert_eq!(classify_angle(f64::NAN), Direction::Invalid);
        assert_eq!(classify_angle(f64::INFINITY), Direction::Invalid);
        let p = Point { x: 1.0, y: 2.0 };
        assert_eq!(classify(p, p), Direction::Invalid);
    }

    #[test]
    fn test_lattice_neighbors_classify_to_their_direction() {
        let board = Board::new(6).unwrap();
        for (id, slot) in board.slots().iter().enumerate() {
            for (d, n) in slot.neighbors() {
                assert_eq!(classify_slots(&board, id, n), d, "slot {id} toward {n}");
            }
        }
    }

    #[test]
    fn test_positions() {
        let p = slot_position(Coord::new(0, 2), 2.0);
        assert!((p.x - 2.0).abs() < 1e-9);
        assert!((p.y - 2.0 * 3f64.sqrt()).abs() < 1e-9);
    }
}
