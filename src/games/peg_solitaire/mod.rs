//! Triangular peg solitaire ("Cracker Barrel").
//!
//! The board is an arena of slots wired into a hex neighbor graph. A jump
//! moves a peg over an occupied neighbor into the empty slot beyond it and
//! removes the jumped peg; the game ends when no peg can jump.

pub mod board;
pub mod coloring;
pub mod controller;
pub mod game;
pub mod geometry;
pub mod slot;
pub mod types;

pub use board::{Board, BoardSnapshot};
pub use game::{Game, GameSettings, StartHole};
pub use types::{Coord, Direction, Jump, PegColor, SlotId};
