//! Batch self-play runner.
//!
//! Plays many independent boards with one strategy on rayon's pool and
//! aggregates how many pegs each game left behind.

use std::collections::BTreeMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::engine::error::BoardError;
use crate::engine::models::Verdict;
use crate::engine::simulator::{play_out, PlayoutRecord};
use crate::engine::strategy::MoveStrategy;
use crate::games::peg_solitaire::board::Board;
use crate::games::peg_solitaire::game::StartHole;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayoutConfig {
    pub base_row_size: usize,
    /// `Choose` is played as `Random`: nobody is there to pick.
    pub start_hole: StartHole,
    pub num_games: usize,
    pub base_seed: u64,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            base_row_size: 5,
            start_hole: StartHole::Apex,
            num_games: 100,
            base_seed: 0,
        }
    }
}

/// Aggregated results from a playout batch.
#[derive(Debug, Clone, Serialize)]
pub struct PlayoutReport {
    pub strategy: String,
    pub base_row_size: usize,
    pub num_games: usize,
    pub wins: usize,
    /// Remaining peg count per game, in game order.
    pub remaining: Vec<usize>,
    pub game_durations_ms: Vec<f64>,
    pub total_ms: f64,
}

impl PlayoutReport {
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_remaining(&self) -> f64 {
        if self.remaining.is_empty() {
            return 0.0;
        }
        self.remaining.iter().sum::<usize>() as f64 / self.remaining.len() as f64
    }

    pub fn remaining_stddev(&self) -> f64 {
        if self.remaining.len() < 2 {
            return 0.0;
        }
        let avg = self.avg_remaining();
        let variance = self
            .remaining
            .iter()
            .map(|&r| (r as f64 - avg).powi(2))
            .sum::<f64>()
            / (self.remaining.len() - 1) as f64;
        variance.sqrt()
    }

    /// Wilson score interval on the win rate.
    pub fn confidence_interval_95(&self) -> (f64, f64) {
        let n = self.num_games;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate();
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    /// Number of games per remaining peg count.
    pub fn histogram(&self) -> BTreeMap<usize, usize> {
        let mut hist = BTreeMap::new();
        for &r in &self.remaining {
            *hist.entry(r).or_insert(0) += 1;
        }
        hist
    }

    pub fn best(&self) -> Option<usize> {
        self.remaining.iter().copied().min()
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Playout Results: {} on base row {} ({} games)",
            self.strategy, self.base_row_size, self.num_games
        )];
        lines.push("=".repeat(60));
        let (ci_lo, ci_hi) = self.confidence_interval_95();
        lines.push(format!(
            "  {:>12}: {:3} ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]",
            "Wins",
            self.wins,
            self.win_rate() * 100.0,
            ci_lo * 100.0,
            ci_hi * 100.0,
        ));
        lines.push(format!(
            "  {:>12}: avg={:5.2} +/- {:4.2}  best={}",
            "Remaining",
            self.avg_remaining(),
            self.remaining_stddev(),
            self.best().map_or("-".to_string(), |b| b.to_string()),
        ));
        for (pegs, count) in self.histogram() {
            let pct = count as f64 / self.num_games.max(1) as f64 * 100.0;
            lines.push(format!("  {:>10} pegs: {:5} ({:5.1}%)", pegs, count, pct));
        }
        if !self.game_durations_ms.is_empty() {
            let avg_ms = self.game_durations_ms.iter().sum::<f64>() / self.game_durations_ms.len() as f64;
            lines.push(format!(
                "  Avg game: {:.3}ms  |  Total: {:.1}s",
                avg_ms,
                self.total_ms / 1000.0
            ));
        }
        lines.join("\n")
    }
}

/// Play one game with its own seed.
pub fn play_seeded(
    base_row_size: usize,
    start_hole: StartHole,
    strategy: &dyn MoveStrategy,
    seed: u64,
) -> Result<PlayoutRecord, BoardError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new(base_row_size)?;
    let policy = match start_hole {
        StartHole::Choose => StartHole::Random,
        other => other,
    };
    if let Some(slot) = policy.resolve(&board, &mut rng)? {
        board.choose_start_hole(slot)?;
    }
    Ok(play_out(&mut board, strategy, &mut rng))
}

/// Run `config.num_games` playouts in parallel. Game `i` is seeded with `base_seed + i`.
pub fn run_playouts(config: &PlayoutConfig, strategy: &dyn MoveStrategy) -> Result<PlayoutReport, BoardError> {
    let t0 = Instant::now();
    let results: Vec<(PlayoutRecord, f64)> = (0..config.num_games)
        .into_par_iter()
        .map(|game_idx| {
            let g0 = Instant::now();
            let seed = config.base_seed.wrapping_add(game_idx as u64);
            let record = play_seeded(config.base_row_size, config.start_hole, strategy, seed)?;
            Ok::<_, BoardError>((record, g0.elapsed().as_secs_f64() * 1000.0))
        })
        .collect::<Result<_, BoardError>>()?;
    let total_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let wins = results
        .iter()
        .filter(|(r, _)| r.verdict == Verdict::Win)
        .count();
    let report = PlayoutReport {
        strategy: strategy.name().to_string(),
        base_row_size: config.base_row_size,
        num_games: config.num_games,
        wins,
        remaining: results.iter().map(|(r, _)| r.remaining).collect(),
        game_durations_ms: results.iter().map(|(_, ms)| *ms).collect(),
        total_ms,
    };
    tracing::info!(
        strategy = %report.strategy,
        games = report.num_games,
        wins = report.wins,
        avg_remaining = report.avg_remaining(),
        "playout batch finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::strategy::{FirstJumpStrategy, RandomStrategy};

    fn report(remaining: Vec<usize>) -> PlayoutReport {
        PlayoutReport {
            strategy: "test".into(),
            base_row_size: 5,
            num_games: remaining.len(),
            wins: remaining.iter().filter(|&&r| r == 1).count(),
            remaining,
            game_durations_ms: vec![],
            total_ms: 0.0,
        }
    }

    #[test]
    fn test_stats() {
        let r = report(vec![1, 2, 3, 2]);
        assert_eq!(r.win_rate(), 0.25);
        assert_eq!(r.avg_remaining(), 2.0);
        assert!((r.remaining_stddev() - (2.0f64 / 3.0).sqrt()).abs() < 1e-9);
        assert_eq!(r.best(), Some(1));
        let hist: Vec<_> = r.histogram().into_iter().collect();
        assert_eq!(hist, vec![(1, 1), (2, 2), (3, 1)]);
    }

    #[test]
    fn test_confidence_interval_bounds() {
        let none = report(vec![]);
        assert_eq!(none.confidence_interval_95(), (0.0, 0.0));
        let all = report(vec![1; 50]);
        let (lo, hi) = all.confidence_interval_95();
        assert!(lo > 0.9 && lo < 1.0);
        assert!(hi > 0.999 && hi <= 1.0);
    }

    #[test]
    fn test_summary_lists_histogram() {
        let text = report(vec![1, 4]).summary();
        assert!(text.contains("(2 games)"));
        assert!(text.contains("1 pegs"));
        assert!(text.contains("4 pegs"));
    }

    #[test]
    fn test_batch_is_reproducible() {
        let config = PlayoutConfig {
            num_games: 16,
            base_seed: 11,
            start_hole: StartHole::Random,
            ..Default::default()
        };
        let a = run_playouts(&config, &RandomStrategy).unwrap();
        let b = run_playouts(&config, &RandomStrategy).unwrap();
        assert_eq!(a.remaining, b.remaining);
        assert_eq!(a.wins, b.wins);
        assert!(a.remaining.iter().all(|&r| (1..=14).contains(&r)));
    }

    #[test]
    fn test_deterministic_strategy_gives_identical_games() {
        let config = PlayoutConfig {
            num_games: 4,
            ..Default::default()
        };
        let report = run_playouts(&config, &FirstJumpStrategy).unwrap();
        assert!(report.remaining.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_bad_size_is_an_error() {
        let config = PlayoutConfig {
            base_row_size: 0,
            num_games: 2,
            ..Default::default()
        };
        assert!(matches!(
            run_playouts(&config, &RandomStrategy),
            Err(BoardError::InvalidSize(0))
        ));
    }
}
