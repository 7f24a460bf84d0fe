//! Error types for board construction and preset loading.
//!
//! Illegal jumps are not errors: they come back as `None` / `false` from the
//! board. These types cover bad ids from callers, broken construction and
//! configuration problems.

use std::path::PathBuf;

use thiserror::Error;

use crate::games::peg_solitaire::types::{Coord, Direction, SlotId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("base row size must be at least 1, got {0}")]
    InvalidSize(usize),

    #[error("slot {slot} is not on this board ({len} slots)")]
    SlotOutOfRange { slot: SlotId, len: usize },

    #[error("coordinate {coord} is not on a board of base row size {base_row_size}")]
    CoordOutOfRange { coord: Coord, base_row_size: usize },

    #[error("snapshot holds {got} slots, board has {expected}")]
    SnapshotLength { expected: usize, got: usize },

    #[error("neighbor wiring broken: slot {slot} -> {direction} -> {neighbor} has no way back")]
    BrokenWiring {
        slot: SlotId,
        direction: Direction,
        neighbor: SlotId,
    },
}

/// Rejected raw values for domain types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("no direction with index {0}")]
    DirectionIndex(i8),

    #[error("color '{0}' must start with '#'")]
    ColorPrefix(String),

    #[error("color '{0}' must have six hex digits")]
    ColorDigits(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("preset '{preset}': base row size {size} outside {min}..={max}")]
    BaseRowSizeOutOfRange {
        preset: String,
        size: usize,
        min: usize,
        max: usize,
    },

    #[error("preset '{0}' not found")]
    UnknownPreset(String),

    #[error("preset '{preset}': start hole {coord} is not on the board")]
    StartHoleOutOfRange { preset: String, coord: Coord },

    #[error(transparent)]
    Board(#[from] BoardError),
}
