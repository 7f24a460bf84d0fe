//! Synchronous playout of a single board: jump until no peg can move.
//! Used by the playout runner and the benchmarks.

use rand::RngCore;
use serde::Serialize;

use crate::engine::models::Verdict;
use crate::engine::strategy::MoveStrategy;
use crate::games::peg_solitaire::board::Board;
use crate::games::peg_solitaire::types::Jump;

/// Every legal jump on the board, by source slot then direction order.
pub fn legal_jumps(board: &Board) -> Vec<Jump> {
    (0..board.len()).flat_map(|id| board.jumps_from(id)).collect()
}

/// Outcome of one finished playout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayoutRecord {
    pub jumps: Vec<Jump>,
    pub remaining: usize,
    pub verdict: Verdict,
}

/// Play `board` to a terminal state with `strategy`.
///
/// Every jump removes one peg, so the loop ends after at most `len - 1` jumps.
/// A strategy that declines to choose, or picks an illegal jump, ends the
/// playout early.
pub fn play_out(board: &mut Board, strategy: &dyn MoveStrategy, rng: &mut dyn RngCore) -> PlayoutRecord {
    let mut jumps = Vec::new();
    loop {
        let legal = legal_jumps(board);
        if legal.is_empty() {
            break;
        }
        let Some(choice) = strategy.choose_jump(board, &legal, rng) else {
            tracing::debug!(strategy = strategy.name(), "strategy passed with jumps left");
            break;
        };
        match board.apply_jump(choice.from, choice.direction) {
            Some(jump) => jumps.push(jump),
            None => {
                tracing::warn!(strategy = strategy.name(), from = choice.from, "strategy chose an illegal jump");
                break;
            }
        }
    }
    board.take_events();
    board.take_dirty();
    let remaining = board.remaining_peg_count();
    PlayoutRecord {
        jumps,
        remaining,
        verdict: Verdict::from_remaining(remaining),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::strategy::{FirstJumpStrategy, RandomStrategy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn classic() -> Board {
        let mut board = Board::new(5).unwrap();
        board.choose_start_hole(board.apex()).unwrap();
        board
    }

    #[test]
    fn test_classic_opening_has_two_jumps() {
        let legal = legal_jumps(&classic());
        assert_eq!(legal.len(), 2);
        assert!(legal.iter().all(|j| j.to == classic().apex()));
    }

    #[test]
    fn test_full_board_has_no_jumps() {
        assert!(legal_jumps(&Board::new(5).unwrap()).is_empty());
    }

    #[test]
    fn test_playout_ends_in_terminal_state() {
        let mut board = classic();
        let mut rng = StdRng::seed_from_u64(9);
        let record = play_out(&mut board, &RandomStrategy, &mut rng);
        assert!(!board.can_any_peg_move());
        assert_eq!(record.remaining, board.remaining_peg_count());
        assert_eq!(record.remaining + record.jumps.len(), 14);
        assert_eq!(record.verdict, Verdict::from_remaining(record.remaining));
        assert!(board.take_events().is_empty());
    }

    #[test]
    fn test_first_jump_playout_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = play_out(&mut classic(), &FirstJumpStrategy, &mut rng);
        let b = play_out(&mut classic(), &FirstJumpStrategy, &mut rng);
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_seed_same_playout() {
        let a = play_out(&mut classic(), &RandomStrategy, &mut StdRng::seed_from_u64(5));
        let b = play_out(&mut classic(), &RandomStrategy, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
