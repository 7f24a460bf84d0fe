//! Move strategies for self-play.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::games::peg_solitaire::board::Board;
use crate::games::peg_solitaire::types::Jump;

/// Picks the next jump out of the legal ones.
pub trait MoveStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// `legal` is never empty when called from the simulator.
    fn choose_jump(&self, board: &Board, legal: &[Jump], rng: &mut dyn RngCore) -> Option<Jump>;
}

/// Picks a uniformly random legal jump.
pub struct RandomStrategy;

impl MoveStrategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_jump(&self, _board: &Board, legal: &[Jump], rng: &mut dyn RngCore) -> Option<Jump> {
        legal.choose(rng).copied()
    }
}

/// Always takes the first legal jump: lowest source slot, then direction order.
pub struct FirstJumpStrategy;

impl MoveStrategy for FirstJumpStrategy {
    fn name(&self) -> &str {
        "first"
    }

    fn choose_jump(&self, _board: &Board, legal: &[Jump], _rng: &mut dyn RngCore) -> Option<Jump> {
        legal.first().copied()
    }
}

/// Strategy by CLI name.
pub fn strategy_by_name(name: &str) -> Option<Box<dyn MoveStrategy>> {
    match name {
        "random" => Some(Box::new(RandomStrategy)),
        "first" => Some(Box::new(FirstJumpStrategy)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simulator::legal_jumps;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_jump_is_lowest_source() {
        let mut board = Board::new(5).unwrap();
        board.choose_start_hole(board.apex()).unwrap();
        let legal = legal_jumps(&board);
        let mut rng = StdRng::seed_from_u64(0);
        let jump = FirstJumpStrategy.choose_jump(&board, &legal, &mut rng).unwrap();
        assert!(legal.iter().all(|j| j.from >= jump.from));
    }

    #[test]
    fn test_random_picks_a_legal_jump() {
        let mut board = Board::new(6).unwrap();
        board.choose_start_hole(3).unwrap();
        let legal = legal_jumps(&board);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let jump = RandomStrategy.choose_jump(&board, &legal, &mut rng).unwrap();
            assert!(legal.contains(&jump));
        }
        assert_eq!(RandomStrategy.choose_jump(&board, &[], &mut rng), None);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(strategy_by_name("random").map(|s| s.name().to_string()), Some("random".into()));
        assert_eq!(strategy_by_name("first").map(|s| s.name().to_string()), Some("first".into()));
        assert!(strategy_by_name("mcts").is_none());
    }
}
