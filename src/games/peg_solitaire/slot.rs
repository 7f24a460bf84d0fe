//! A single hole on the board.

use super::types::{Coord, Direction, PegColor, SlotId};

/// One hole: its occupancy and the ids of its six neighbors.
///
/// Neighbor entries are non-owning ids into the board arena. `None` marks the
/// board edge. Wiring is done once by [`super::Board`] and never changes.
#[derive(Debug, Clone)]
pub struct Slot {
    coord: Coord,
    occupancy: Option<PegColor>,
    neighbors: [Option<SlotId>; 6],
}

impl Slot {
    pub(super) fn new(coord: Coord, occupancy: Option<PegColor>) -> Self {
        Self {
            coord,
            occupancy,
            neighbors: [None; 6],
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn has_peg(&self) -> bool {
        self.occupancy.is_some()
    }

    pub fn peg(&self) -> Option<PegColor> {
        self.occupancy
    }

    /// Neighbor in `direction`, or `None` at the edge or for `Invalid`.
    pub fn neighbor(&self, direction: Direction) -> Option<SlotId> {
        direction.index().and_then(|i| self.neighbors[i])
    }

    /// Valid directions that have a neighbor, with that neighbor's id.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, SlotId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.neighbor(d).map(|id| (d, id)))
    }

    pub(super) fn set_neighbor(&mut self, direction: Direction, neighbor: SlotId) {
        if let Some(i) = direction.index() {
            self.neighbors[i] = Some(neighbor);
        }
    }

    /// Replace occupancy, returning the previous payload.
    pub(super) fn replace_peg(&mut self, peg: Option<PegColor>) -> Option<PegColor> {
        std::mem::replace(&mut self.occupancy, peg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_slot_has_no_neighbors() {
        let slot = Slot::new(Coord::new(0, 0), None);
        assert!(!slot.has_peg());
        for d in Direction::ALL {
            assert_eq!(slot.neighbor(d), None);
        }
        assert_eq!(slot.neighbors().count(), 0);
    }

    #[test]
    fn test_invalid_direction_never_resolves() {
        let mut slot = Slot::new(Coord::new(0, 0), Some(PegColor::RED));
        for (i, d) in Direction::ALL.into_iter().enumerate() {
            slot.set_neighbor(d, i + 1);
        }
        slot.set_neighbor(Direction::Invalid, 99);
        assert_eq!(slot.neighbor(Direction::Invalid), None);
        assert_eq!(slot.neighbor(Direction::TopRight), Some(6));
    }

    #[test]
    fn test_replace_peg_returns_previous() {
        let mut slot = Slot::new(Coord::new(1, 2), Some(PegColor::BLUE));
        assert_eq!(slot.replace_peg(None), Some(PegColor::BLUE));
        assert!(!slot.has_peg());
        assert_eq!(slot.replace_peg(Some(PegColor::RED)), None);
        assert_eq!(slot.peg(), Some(PegColor::RED));
    }
}
