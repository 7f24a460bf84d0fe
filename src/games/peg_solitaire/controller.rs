//! Selection state machine: turns slot selections into jumps.
//!
//! One slot is held at a time. Selecting the landing slot of a legal jump
//! performs it. Click-click keeps the held peg after a bad target; drag-drop
//! drops it.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::geometry;
use super::types::{Direction, Jump, SlotId};
use crate::engine::models::{GameEvent, Verdict};

/// How selections are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Click a peg to hold it, click an empty slot to jump there.
    #[default]
    ClickClick,
    /// Pick a peg up and drop it; any drop that is not a legal landing puts it back.
    DragDrop,
}

/// How the heading between the held slot and the target is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionResolver {
    /// Reverse lookup through the neighbor table.
    #[default]
    Graph,
    /// Angle between layout positions, bucketed into 60° sectors.
    Geometric,
}

impl DirectionResolver {
    pub fn resolve(self, board: &Board, from: SlotId, to: SlotId) -> Direction {
        match self {
            DirectionResolver::Graph => board.direction_between(from, to),
            DirectionResolver::Geometric => geometry::classify_slots(board, from, to),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "slot", rename_all = "snake_case")]
pub enum Selection {
    /// The player still has to pick the starting hole.
    AwaitingStartHole,
    Idle,
    Active(SlotId),
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnknownSlot,
    /// The target is not in a straight line from the held peg.
    NoDirection,
    /// The target is in line but is not the landing slot of a legal jump.
    IllegalJump,
}

/// Result of one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectOutcome {
    StartHoleChosen { slot: SlotId },
    Activated { slot: SlotId },
    Released { slot: SlotId },
    Jumped { jump: Jump },
    Rejected { reason: RejectReason },
    Ignored,
    GameOver { jump: Option<Jump>, remaining: usize, verdict: Verdict },
}

#[derive(Debug, Clone)]
pub struct Controller {
    mode: InputMode,
    resolver: DirectionResolver,
    selection: Selection,
    events: Vec<GameEvent>,
}

impl Controller {
    pub fn new(mode: InputMode, resolver: DirectionResolver, awaiting_start_hole: bool) -> Self {
        Self {
            mode,
            resolver,
            selection: if awaiting_start_hole {
                Selection::AwaitingStartHole
            } else {
                Selection::Idle
            },
            events: Vec::new(),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn resolver(&self) -> DirectionResolver {
        self.resolver
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Held slot, if any.
    pub fn active(&self) -> Option<SlotId> {
        match self.selection {
            Selection::Active(slot) => Some(slot),
            _ => None,
        }
    }

    /// Drain queued selection events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stop accepting selections until a new controller is built.
    pub fn finish(&mut self) {
        if let Selection::Active(held) = self.selection {
            self.events.push(GameEvent::PegDeselected { slot: held });
        }
        self.selection = Selection::GameOver;
    }

    pub fn try_select(&mut self, board: &mut Board, slot: SlotId) -> SelectOutcome {
        if board.slot(slot).is_none() {
            return SelectOutcome::Rejected {
                reason: RejectReason::UnknownSlot,
            };
        }
        match self.selection {
            Selection::GameOver => SelectOutcome::Ignored,
            Selection::AwaitingStartHole => {
                if !board.has_peg(slot) {
                    return SelectOutcome::Ignored;
                }
                match board.choose_start_hole(slot) {
                    Ok(()) => {
                        self.selection = Selection::Idle;
                        SelectOutcome::StartHoleChosen { slot }
                    }
                    Err(_) => SelectOutcome::Rejected {
                        reason: RejectReason::UnknownSlot,
                    },
                }
            }
            Selection::Idle => {
                if board.has_peg(slot) {
                    self.activate(slot)
                } else {
                    SelectOutcome::Ignored
                }
            }
            Selection::Active(held) => match self.mode {
                InputMode::ClickClick => self.click(board, held, slot),
                InputMode::DragDrop => self.drop_on(board, held, slot),
            },
        }
    }

    fn click(&mut self, board: &mut Board, held: SlotId, slot: SlotId) -> SelectOutcome {
        if board.has_peg(slot) {
            self.events.push(GameEvent::PegDeselected { slot: held });
            return self.activate(slot);
        }
        match self.attempt(board, held, slot) {
            Ok(jump) => {
                self.release(held);
                SelectOutcome::Jumped { jump }
            }
            Err(reason) => SelectOutcome::Rejected { reason },
        }
    }

    fn drop_on(&mut self, board: &mut Board, held: SlotId, slot: SlotId) -> SelectOutcome {
        if slot == held {
            self.release(held);
            return SelectOutcome::Released { slot: held };
        }
        let result = self.attempt(board, held, slot);
        self.release(held);
        match result {
            Ok(jump) => SelectOutcome::Jumped { jump },
            Err(reason) => SelectOutcome::Rejected { reason },
        }
    }

    fn activate(&mut self, slot: SlotId) -> SelectOutcome {
        self.selection = Selection::Active(slot);
        self.events.push(GameEvent::PegSelected { slot });
        SelectOutcome::Activated { slot }
    }

    fn release(&mut self, held: SlotId) {
        self.selection = Selection::Idle;
        self.events.push(GameEvent::PegDeselected { slot: held });
    }

    fn attempt(&self, board: &mut Board, held: SlotId, target: SlotId) -> Result<Jump, RejectReason> {
        let direction = self.resolver.resolve(board, held, target);
        if !direction.is_valid() {
            return Err(RejectReason::NoDirection);
        }
        if board.can_jump_in_direction(held, direction) != Some(target) {
            return Err(RejectReason::IllegalJump);
        }
        board
            .apply_jump(held, direction)
            .ok_or(RejectReason::IllegalJump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::peg_solitaire::types::Coord;

    fn classic() -> Board {
        let mut board = Board::new(5).unwrap();
        board.choose_start_hole(board.apex()).unwrap();
        board.take_events();
        board
    }

    fn id(board: &Board, row: usize, col: usize) -> SlotId {
        board.slot_id(Coord::new(row, col)).unwrap()
    }

    #[test]
    fn test_idle_ignores_empty_slot() {
        let mut board = classic();
        let mut c = Controller::new(InputMode::ClickClick, DirectionResolver::Graph, false);
        let apex = board.apex();
        assert_eq!(c.try_select(&mut board, apex), SelectOutcome::Ignored);
        assert_eq!(c.selection(), Selection::Idle);
        assert!(c.take_events().is_empty());
    }

    #[test]
    fn test_click_click_jump() {
        let mut board = classic();
        let mut c = Controller::new(InputMode::ClickClick, DirectionResolver::Graph, false);
        let from = id(&board, 0, 2);
        assert_eq!(c.try_select(&mut board, from), SelectOutcome::Activated { slot: from });
        assert_eq!(c.active(), Some(from));

        let apex = board.apex();
        let outcome = c.try_select(&mut board, apex);
        let SelectOutcome::Jumped { jump } = outcome else {
            panic!("expected a jump, got {outcome:?}");
        };
        assert_eq!(jump.direction, Direction::TopRight);
        assert_eq!(jump.over, id(&board, 0, 3));
        assert_eq!(c.selection(), Selection::Idle);
        assert_eq!(
            c.take_events(),
            vec![
                GameEvent::PegSelected { slot: from },
                GameEvent::PegDeselected { slot: from },
            ]
        );
        assert_eq!(board.remaining_peg_count(), 13);
    }

    #[test]
    fn test_click_click_switches_held_peg() {
        let mut board = classic();
        let mut c = Controller::new(InputMode::ClickClick, DirectionResolver::Graph, false);
        c.try_select(&mut board, 0);
        assert_eq!(c.try_select(&mut board, 1), SelectOutcome::Activated { slot: 1 });
        assert_eq!(c.selection(), Selection::Active(1));
    }

    #[test]
    fn test_click_click_bad_target_keeps_peg() {
        let mut board = Board::new(5).unwrap();
        let hole = id(&board, 2, 0);
        board.choose_start_hole(hole).unwrap();
        let mut c = Controller::new(InputMode::ClickClick, DirectionResolver::Graph, false);
        let far = id(&board, 0, 4);
        c.try_select(&mut board, far);
        // (2,0) is empty but not in line with the apex.
        assert_eq!(
            c.try_select(&mut board, hole),
            SelectOutcome::Rejected { reason: RejectReason::NoDirection }
        );
        assert_eq!(c.selection(), Selection::Active(far));
        assert_eq!(board.remaining_peg_count(), 14);
    }

    #[test]
    fn test_in_line_but_illegal_is_rejected() {
        let mut board = Board::new(5).unwrap();
        // Empty the landing and the middle: in line, but nothing to jump over.
        let hole = id(&board, 2, 0);
        board.choose_start_hole(hole).unwrap();
        board.set_occupancy(id(&board, 1, 0), None).unwrap();
        let mut c = Controller::new(InputMode::ClickClick, DirectionResolver::Graph, false);
        c.try_select(&mut board, 0);
        assert_eq!(
            c.try_select(&mut board, hole),
            SelectOutcome::Rejected { reason: RejectReason::IllegalJump }
        );
        assert_eq!(c.selection(), Selection::Active(0));
    }

    #[test]
    fn test_drag_drop_bad_drop_releases() {
        let mut board = Board::new(5).unwrap();
        let hole = id(&board, 2, 0);
        board.choose_start_hole(hole).unwrap();
        let mut c = Controller::new(InputMode::DragDrop, DirectionResolver::Graph, false);
        let apex = board.apex();
        c.try_select(&mut board, apex);
        assert_eq!(
            c.try_select(&mut board, hole),
            SelectOutcome::Rejected { reason: RejectReason::NoDirection }
        );
        assert_eq!(c.selection(), Selection::Idle);
    }

    #[test]
    fn test_drag_drop_onto_occupied_releases() {
        let mut board = classic();
        let mut c = Controller::new(InputMode::DragDrop, DirectionResolver::Graph, false);
        c.try_select(&mut board, 0);
        assert!(matches!(c.try_select(&mut board, 1), SelectOutcome::Rejected { .. }));
        assert_eq!(c.selection(), Selection::Idle);
    }

    #[test]
    fn test_drag_drop_on_self_releases() {
        let mut board = classic();
        let mut c = Controller::new(InputMode::DragDrop, DirectionResolver::Graph, false);
        c.try_select(&mut board, 0);
        assert_eq!(c.try_select(&mut board, 0), SelectOutcome::Released { slot: 0 });
        assert_eq!(c.selection(), Selection::Idle);
    }

    #[test]
    fn test_drag_drop_jump() {
        let mut board = classic();
        let mut c = Controller::new(InputMode::DragDrop, DirectionResolver::Geometric, false);
        let from = id(&board, 2, 2);
        c.try_select(&mut board, from);
        let apex = board.apex();
        let outcome = c.try_select(&mut board, apex);
        assert!(matches!(outcome, SelectOutcome::Jumped { jump } if jump.direction == Direction::TopLeft));
        assert_eq!(c.selection(), Selection::Idle);
    }

    #[test]
    fn test_awaiting_start_hole() {
        let mut board = Board::new(5).unwrap();
        let mut c = Controller::new(InputMode::ClickClick, DirectionResolver::Graph, true);
        assert_eq!(c.selection(), Selection::AwaitingStartHole);
        assert_eq!(c.try_select(&mut board, 7), SelectOutcome::StartHoleChosen { slot: 7 });
        assert!(!board.has_peg(7));
        assert_eq!(c.selection(), Selection::Idle);
    }

    #[test]
    fn test_unknown_slot_and_game_over() {
        let mut board = classic();
        let mut c = Controller::new(InputMode::ClickClick, DirectionResolver::Graph, false);
        assert_eq!(
            c.try_select(&mut board, 99),
            SelectOutcome::Rejected { reason: RejectReason::UnknownSlot }
        );
        c.try_select(&mut board, 0);
        c.finish();
        assert_eq!(c.selection(), Selection::GameOver);
        assert_eq!(c.try_select(&mut board, 1), SelectOutcome::Ignored);
        assert_eq!(c.take_events().last(), Some(&GameEvent::PegDeselected { slot: 0 }));
    }

    #[test]
    fn test_resolvers_agree_on_every_legal_jump() {
        let mut board = Board::new(7).unwrap();
        for hole in [3, 10, 20] {
            board.set_occupancy(hole, None).unwrap();
        }
        for from in 0..board.len() {
            for jump in board.jumps_from(from).collect::<Vec<_>>() {
                assert_eq!(DirectionResolver::Graph.resolve(&board, from, jump.to), jump.direction);
                assert_eq!(DirectionResolver::Geometric.resolve(&board, from, jump.to), jump.direction);
            }
        }
    }
}
