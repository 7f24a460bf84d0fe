//! Board state management for peg solitaire.
//!
//! Owns every slot, wires the triangular neighbor graph, validates and applies
//! jumps, and answers the whole-board terminal queries.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::slot::Slot;
use super::types::{Coord, Direction, Jump, PegColor, SlotId};
use crate::engine::error::BoardError;
use crate::engine::models::GameEvent;

/// The triangular board: an arena of slots addressed by [`SlotId`].
///
/// Slots are stored row by row; row `i` holds `N - i` slots.
#[derive(Debug, Clone)]
pub struct Board {
    base_row_size: usize,
    slots: Vec<Slot>,
    row_offsets: Vec<usize>,
    events: Vec<GameEvent>,
    dirty: bool,
}

/// Serializable view of the board: size plus one occupancy entry per slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub base_row_size: usize,
    pub pegs: Vec<Option<PegColor>>,
}

/// Total slots on a board with the given base row size.
pub fn slot_count(base_row_size: usize) -> usize {
    base_row_size * (base_row_size + 1) / 2
}

impl Board {
    /// Build a fully occupied board and wire all neighbor pairs.
    pub fn new(base_row_size: usize) -> Result<Self, BoardError> {
        if base_row_size == 0 {
            return Err(BoardError::InvalidSize(base_row_size));
        }

        let mut slots = Vec::with_capacity(slot_count(base_row_size));
        let mut row_offsets = Vec::with_capacity(base_row_size);
        for row in 0..base_row_size {
            row_offsets.push(slots.len());
            for col in 0..base_row_size - row {
                slots.push(Slot::new(Coord::new(row, col), Some(PegColor::default())));
            }
        }

        let mut board = Self {
            base_row_size,
            slots,
            row_offsets,
            events: Vec::new(),
            dirty: false,
        };
        board.wire_neighbors();
        board.verify_wiring()?;
        Ok(board)
    }

    /// Rebuild a board from a snapshot, keeping its occupancy.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Self, BoardError> {
        let mut board = Self::new(snapshot.base_row_size)?;
        if snapshot.pegs.len() != board.len() {
            return Err(BoardError::SnapshotLength {
                expected: board.len(),
                got: snapshot.pegs.len(),
            });
        }
        for (slot, peg) in board.slots.iter_mut().zip(&snapshot.pegs) {
            slot.replace_peg(*peg);
        }
        Ok(board)
    }

    pub fn to_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            base_row_size: self.base_row_size,
            pegs: self.slots.iter().map(Slot::peg).collect(),
        }
    }

    // Every pair is connected from its lower-left member: (i,j) to (i,j+1)
    // and (i+1,j), then (i,j+1) to (i+1,j).
    fn wire_neighbors(&mut self) {
        let n = self.base_row_size;
        for row in 0..n.saturating_sub(1) {
            for col in 0..n - row - 1 {
                let here = self.row_offsets[row] + col;
                let up = here + 1;
                let right = self.row_offsets[row + 1] + col;
                self.connect(here, Direction::TopRight, up);
                self.connect(here, Direction::Right, right);
                self.connect(up, Direction::BottomRight, right);
            }
        }
    }

    fn connect(&mut self, a: SlotId, direction: Direction, b: SlotId) {
        self.slots[a].set_neighbor(direction, b);
        if let Some(back) = direction.opposite() {
            self.slots[b].set_neighbor(back, a);
        }
    }

    fn verify_wiring(&self) -> Result<(), BoardError> {
        for (id, slot) in self.slots.iter().enumerate() {
            for (direction, neighbor) in slot.neighbors() {
                let back = direction.opposite().and_then(|d| self.slots[neighbor].neighbor(d));
                if back != Some(id) {
                    return Err(BoardError::BrokenWiring {
                        slot: id,
                        direction,
                        neighbor,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn base_row_size(&self) -> usize {
        self.base_row_size
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id)
    }

    pub fn coord(&self, id: SlotId) -> Option<Coord> {
        self.slot(id).map(Slot::coord)
    }

    pub fn slot_id(&self, coord: Coord) -> Option<SlotId> {
        if coord.row < self.base_row_size && coord.col < self.base_row_size - coord.row {
            Some(self.row_offsets[coord.row] + coord.col)
        } else {
            None
        }
    }

    pub fn try_slot_id(&self, coord: Coord) -> Result<SlotId, BoardError> {
        self.slot_id(coord).ok_or(BoardError::CoordOutOfRange {
            coord,
            base_row_size: self.base_row_size,
        })
    }

    /// Slot ids of row `row`, empty past the last row.
    pub fn row(&self, row: usize) -> Range<SlotId> {
        match self.row_offsets.get(row) {
            Some(&start) => start..start + (self.base_row_size - row),
            None => 0..0,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = Range<SlotId>> + '_ {
        (0..self.base_row_size).map(|r| self.row(r))
    }

    /// The single top slot of the triangle.
    pub fn apex(&self) -> SlotId {
        self.row_offsets[0] + self.base_row_size - 1
    }

    /// Bottom-left, bottom-right and top corners. They coincide on a 1-slot board.
    pub fn corners(&self) -> [SlotId; 3] {
        [0, self.row_offsets[self.base_row_size - 1], self.apex()]
    }

    fn check(&self, id: SlotId) -> Result<&Slot, BoardError> {
        self.slots.get(id).ok_or(BoardError::SlotOutOfRange {
            slot: id,
            len: self.slots.len(),
        })
    }

    /// Whether `id` holds a peg. Unknown ids hold nothing.
    pub fn has_peg(&self, id: SlotId) -> bool {
        self.slot(id).is_some_and(Slot::has_peg)
    }

    pub fn peg(&self, id: SlotId) -> Option<PegColor> {
        self.slot(id).and_then(Slot::peg)
    }

    pub fn neighbor(&self, id: SlotId, direction: Direction) -> Option<SlotId> {
        self.slot(id).and_then(|s| s.neighbor(direction))
    }

    /// False without a neighbor in `direction`, else whether that neighbor holds a peg.
    pub fn has_peg_in_direction(&self, id: SlotId, direction: Direction) -> bool {
        self.neighbor(id, direction)
            .is_some_and(|n| self.has_peg(n))
    }

    /// Landing slot of a legal jump from `id` toward `direction`.
    ///
    /// Legal iff `id` holds a peg, its neighbor in `direction` holds a peg and
    /// that neighbor's own neighbor in `direction` exists and is empty.
    pub fn can_jump_in_direction(&self, id: SlotId, direction: Direction) -> Option<SlotId> {
        self.resolve_jump(id, direction).map(|j| j.to)
    }

    fn resolve_jump(&self, id: SlotId, direction: Direction) -> Option<Jump> {
        if !self.has_peg(id) || !self.has_peg_in_direction(id, direction) {
            return None;
        }
        let over = self.neighbor(id, direction)?;
        let to = self.neighbor(over, direction)?;
        if self.has_peg(to) {
            return None;
        }
        Some(Jump {
            from: id,
            over,
            to,
            direction,
        })
    }

    pub fn can_jump_any_direction(&self, id: SlotId) -> bool {
        Direction::ALL
            .into_iter()
            .any(|d| self.resolve_jump(id, d).is_some())
    }

    /// Every legal jump starting at `id`, in direction order.
    pub fn jumps_from(&self, id: SlotId) -> impl Iterator<Item = Jump> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.resolve_jump(id, d))
    }

    /// Perform a jump if legal. Illegal requests change nothing.
    pub fn jump_in_direction(&mut self, id: SlotId, direction: Direction) -> bool {
        self.apply_jump(id, direction).is_some()
    }

    /// Like [`Board::jump_in_direction`], returning the resolved jump.
    pub fn apply_jump(&mut self, id: SlotId, direction: Direction) -> Option<Jump> {
        let jump = self.resolve_jump(id, direction)?;
        let peg = self.slots[jump.from].peg();
        self.write_peg(jump.to, peg);
        self.write_peg(jump.from, None);
        self.write_peg(jump.over, None);
        self.dirty = true;
        Some(jump)
    }

    /// Replace a slot's occupancy and queue the occupancy-changed event.
    pub fn set_occupancy(&mut self, id: SlotId, peg: Option<PegColor>) -> Result<(), BoardError> {
        self.check(id)?;
        self.write_peg(id, peg);
        Ok(())
    }

    /// Recolor every occupied slot with `paint`. Empty slots stay empty.
    pub(super) fn repaint(&mut self, mut paint: impl FnMut(Coord) -> Option<PegColor>) {
        for id in 0..self.slots.len() {
            if !self.slots[id].has_peg() {
                continue;
            }
            if let Some(color) = paint(self.slots[id].coord()) {
                self.write_peg(id, Some(color));
            }
        }
    }

    fn write_peg(&mut self, id: SlotId, peg: Option<PegColor>) {
        self.slots[id].replace_peg(peg);
        self.events.push(GameEvent::occupancy(id, peg));
    }

    /// Empty `id` to create the single starting hole.
    pub fn choose_start_hole(&mut self, id: SlotId) -> Result<(), BoardError> {
        self.set_occupancy(id, None)
    }

    /// Whether any occupied slot still has a legal jump.
    pub fn can_any_peg_move(&self) -> bool {
        (0..self.slots.len()).any(|id| self.can_jump_any_direction(id))
    }

    pub fn remaining_peg_count(&self) -> usize {
        self.slots.iter().filter(|s| s.has_peg()).count()
    }

    /// Whether a jump happened since the last call. Clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drain queued occupancy events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Heading from `from` toward `to` through the neighbor graph.
    ///
    /// `to` may be the adjacent slot or the slot two steps away in a straight
    /// line. Anything else is `Invalid`.
    pub fn direction_between(&self, from: SlotId, to: SlotId) -> Direction {
        for d in Direction::ALL {
            if let Some(next) = self.neighbor(from, d) {
                if next == to || self.neighbor(next, d) == Some(to) {
                    return d;
                }
            }
        }
        Direction::Invalid
    }
}

impl fmt::Display for Board {
    /// Draws the triangle apex-up: `o` for a peg, `.` for a hole.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.base_row_size;
        for col in (0..n).rev() {
            let cells: Vec<&str> = (0..n - col)
                .map(|row| {
                    let id = self.row_offsets[row] + col;
                    if self.slots[id].has_peg() { "o" } else { "." }
                })
                .collect();
            writeln!(f, "{}{}", " ".repeat(col), cells.join(" "))?;
        }
        Ok(())
    }
}
