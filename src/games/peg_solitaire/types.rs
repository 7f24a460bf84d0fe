//! Domain types for peg solitaire.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::error::ValueError;

/// Index of a slot in the board arena.
pub type SlotId = usize;

/// The six hex headings used for neighbor lookup, plus the `Invalid` sentinel.
///
/// Discriminants double as neighbor-table indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i8)]
pub enum Direction {
    Invalid = -1,
    Right = 0,
    BottomRight = 1,
    BottomLeft = 2,
    Left = 3,
    TopLeft = 4,
    TopRight = 5,
}

impl Direction {
    /// The six valid directions in index order.
    pub const ALL: [Direction; 6] = [
        Direction::Right,
        Direction::BottomRight,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
        Direction::TopRight,
    ];

    /// Neighbor-table index, `None` for `Invalid`.
    pub fn index(self) -> Option<usize> {
        match self {
            Direction::Invalid => None,
            d => Some(d as i8 as usize),
        }
    }

    /// Opposite heading. `Invalid` has no opposite.
    pub fn opposite(self) -> Option<Direction> {
        match self {
            Direction::Right => Some(Direction::Left),
            Direction::Left => Some(Direction::Right),
            Direction::TopLeft => Some(Direction::BottomRight),
            Direction::BottomRight => Some(Direction::TopLeft),
            Direction::TopRight => Some(Direction::BottomLeft),
            Direction::BottomLeft => Some(Direction::TopRight),
            Direction::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        self != Direction::Invalid
    }
}

impl TryFrom<i8> for Direction {
    type Error = ValueError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Invalid),
            0 => Ok(Direction::Right),
            1 => Ok(Direction::BottomRight),
            2 => Ok(Direction::BottomLeft),
            3 => Ok(Direction::Left),
            4 => Ok(Direction::TopLeft),
            5 => Ok(Direction::TopRight),
            other => Err(ValueError::DirectionIndex(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Invalid => "invalid",
            Direction::Right => "right",
            Direction::BottomRight => "bottom-right",
            Direction::BottomLeft => "bottom-left",
            Direction::Left => "left",
            Direction::TopLeft => "top-left",
            Direction::TopRight => "top-right",
        };
        f.write_str(name)
    }
}

/// Position of a slot in the triangular layout.
///
/// Row `i` holds `N - i` slots. Advancing `row` heads right, advancing `col`
/// heads up and to the right; the apex is `(0, N - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Peg payload. Serialized as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PegColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PegColor {
    pub const BLUE: PegColor = PegColor::rgb(0, 0, 255);
    pub const RED: PegColor = PegColor::rgb(255, 0, 0);
    pub const WHITE: PegColor = PegColor::rgb(255, 255, 255);
    pub const GREEN: PegColor = PegColor::rgb(0, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for PegColor {
    fn default() -> Self {
        PegColor::WHITE
    }
}

impl TryFrom<String> for PegColor {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !value.starts_with('#') {
            return Err(ValueError::ColorPrefix(value));
        }
        let hex = &value[1..];
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ValueError::ColorDigits(value));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ValueError::ColorDigits(value.clone()))
        };
        Ok(PegColor::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<PegColor> for String {
    fn from(color: PegColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for PegColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A resolved jump: `from` hops over `over` and lands on `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jump {
    pub from: SlotId,
    pub over: SlotId,
    pub to: SlotId,
    pub direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for d in Direction::ALL {
            let opp = d.opposite().unwrap();
            assert_ne!(opp, d);
            assert_eq!(opp.opposite(), Some(d));
        }
    }

    #[test]
    fn test_invalid_has_no_opposite_or_index() {
        assert_eq!(Direction::Invalid.opposite(), None);
        assert_eq!(Direction::Invalid.index(), None);
        assert!(!Direction::Invalid.is_valid());
    }

    #[test]
    fn test_indices_match_table_order() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), Some(i));
            assert_eq!(Direction::try_from(i as i8), Ok(*d));
        }
        assert_eq!(Direction::try_from(-1), Ok(Direction::Invalid));
        assert_eq!(Direction::try_from(6), Err(ValueError::DirectionIndex(6)));
        assert_eq!(
            Direction::try_from(-2).unwrap_err().to_string(),
            "no direction with index -2"
        );
    }

    #[test]
    fn test_color_hex_parsing() {
        let c = PegColor::try_from("#0a0B0c".to_string()).unwrap();
        assert_eq!(c, PegColor::rgb(10, 11, 12));
        assert_eq!(c.to_hex(), "#0a0b0c");
        assert_eq!(
            PegColor::try_from("0a0b0c".to_string()),
            Err(ValueError::ColorPrefix("0a0b0c".to_string()))
        );
        assert_eq!(
            PegColor::try_from("#0a0b".to_string()),
            Err(ValueError::ColorDigits("#0a0b".to_string()))
        );
        assert!(matches!(
            PegColor::try_from("#zz0000".to_string()),
            Err(ValueError::ColorDigits(_))
        ));
    }

    #[test]
    fn test_color_serde_as_string() {
        let json = serde_json::to_string(&PegColor::BLUE).unwrap();
        assert_eq!(json, "\"#0000ff\"");
        let back: PegColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PegColor::BLUE);
    }
}
