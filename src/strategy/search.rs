//! Bounded exhaustive search: minimax with alpha-beta pruning.
//!
//! The search walks the full game tree below each candidate move, scoring
//! terminal positions +1 for a win by the acting marker, -1 for a loss
//! and 0 for a tie. Already-scored positions are memoized on a canonical
//! serialization of (board, side to move); the table lives for a single
//! decision and is dropped with it. A wall-clock budget bounds the walk:
//! when it runs out mid-evaluation the search abandons the tree and falls
//! back to a uniformly random pick among the candidates it had not yet
//! finished scoring. The fallback is an approximation, not an error.

use super::{blocking_move, winning_move, StrategyError};
use crate::board::{Board, Coord};
use crate::moves::apply_move;
use crate::rules::check_winner;
use crate::types::Marker;
use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Internal signal: the wall-clock budget ran out mid-evaluation.
struct SearchTimedOut;

pub(super) fn decide<R: Rng>(
    board: &Board,
    marker: Marker,
    budget: Duration,
    rng: &mut R,
) -> Result<Coord, StrategyError> {
    if let Some(at) = winning_move(board, marker) {
        return Ok(at);
    }
    if let Some(at) = blocking_move(board, marker) {
        return Ok(at);
    }

    let candidates: Vec<Coord> = board.empty_coords().collect();
    if candidates.is_empty() {
        return Err(StrategyError::NoLegalMoves);
    }

    let mut searcher = Searcher::new(marker, budget);
    let mut best: Option<(Coord, i32)> = None;
    for (evaluated, &at) in candidates.iter().enumerate() {
        let next = apply_move(board, at, marker).expect("candidate cell is empty");
        // Each candidate gets a full window so its score is exact.
        match searcher.score(&next, marker.opponent(), i32::MIN, i32::MAX) {
            Ok(score) => {
                if best.is_none_or(|(_, top)| score > top) {
                    best = Some((at, score));
                }
            }
            Err(SearchTimedOut) => {
                let remaining = &candidates[evaluated..];
                warn!(
                    evaluated,
                    remaining = remaining.len(),
                    "search budget exhausted, degrading to a random remaining candidate",
                );
                return Ok(remaining[rng.gen_range(0..remaining.len())]);
            }
        }
    }
    let (at, score) = best.expect("at least one candidate was scored");
    debug!(nodes = searcher.nodes, score, "exhaustive search complete");
    Ok(at)
}

struct Searcher {
    root: Marker,
    deadline: Instant,
    memo: HashMap<String, i32>,
    nodes: u64,
}

impl Searcher {
    fn new(root: Marker, budget: Duration) -> Self {
        Self {
            root,
            deadline: Instant::now() + budget,
            memo: HashMap::new(),
            nodes: 0,
        }
    }

    /// Scores a position from the root marker's perspective: the root
    /// side maximizes, the opponent minimizes, alpha-beta bounds prune.
    fn score(
        &mut self,
        board: &Board,
        to_move: Marker,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, SearchTimedOut> {
        if Instant::now() >= self.deadline {
            return Err(SearchTimedOut);
        }
        self.nodes += 1;

        if let Some(winner) = check_winner(board) {
            return Ok(if winner == self.root { 1 } else { -1 });
        }
        if board.is_full() {
            return Ok(0);
        }

        let key = memo_key(board, to_move);
        if let Some(&score) = self.memo.get(&key) {
            return Ok(score);
        }

        let (alpha_in, beta_in) = (alpha, beta);
        let maximizing = to_move == self.root;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for at in board.empty_coords().collect::<Vec<_>>() {
            let next = apply_move(board, at, to_move).expect("enumerated cell is empty");
            let score = self.score(&next, to_move.opponent(), alpha, beta)?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        // Only exact scores are safe to reuse under other windows; a
        // value at or outside the entry window is a pruning bound.
        if alpha_in < best && best < beta_in {
            self.memo.insert(key, best);
        }
        Ok(best)
    }
}

/// Canonical memo key for a position with a given side to move.
fn memo_key(board: &Board, to_move: Marker) -> String {
    serde_json::to_string(&(board, to_move)).expect("board serialization is infallible")
}
