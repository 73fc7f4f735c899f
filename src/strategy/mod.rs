//! Computer-opponent decision policies.
//!
//! A strategy is a pure function from (board, acting marker) to a
//! coordinate, selected through [`StrategyConfig`](crate::StrategyConfig).
//! The two search strategies share a pair of shortcuts checked before any
//! search: take an immediately winning cell, else block the opponent's
//! immediately winning cell. All randomness flows through a PCG generator
//! that tests can seed.

mod mcts;
mod search;

use crate::board::{Board, Coord};
use crate::config::StrategyConfig;
use crate::moves::apply_move;
use crate::rules::check_winner;
use crate::types::Marker;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// Available decision policies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StrategyKind {
    /// First empty cell in traversal order.
    FirstEmpty,
    /// Uniformly random empty cell.
    Random,
    /// Minimax with alpha-beta pruning, memoization and a wall-clock budget.
    Exhaustive,
    /// Monte Carlo Tree Search with a fixed iteration count.
    MonteCarlo,
}

/// Errors from decision policies.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum StrategyError {
    /// The board has no empty cell left to play.
    #[display("no legal moves remain")]
    NoLegalMoves,
    /// The caller's deadline expired before the decision finished.
    #[display("decision deadline expired")]
    DeadlineExpired,
    /// The background decision task failed.
    #[display("decision worker failed: {}", _0)]
    WorkerFailed(String),
}

impl std::error::Error for StrategyError {}

/// Decides the acting marker's next move on the given board.
///
/// Dispatches to the configured policy. Search budgets, iteration counts
/// and RNG seeding all come from the config so tests can substitute
/// deterministic variants.
///
/// # Errors
///
/// [`StrategyError::NoLegalMoves`] when the board is full.
#[instrument(skip(board, config), fields(kind = %config.kind(), player = %marker))]
pub fn decide(
    board: &Board,
    marker: Marker,
    config: &StrategyConfig,
) -> Result<Coord, StrategyError> {
    let mut rng = config.rng();
    match config.kind() {
        StrategyKind::FirstEmpty => first_empty(board),
        StrategyKind::Random => uniform_random(board, &mut rng),
        StrategyKind::Exhaustive => search::decide(
            board,
            marker,
            Duration::from_millis(*config.search_budget_ms()),
            &mut rng,
        ),
        StrategyKind::MonteCarlo => mcts::decide(board, marker, *config.simulations(), &mut rng),
    }
}

/// First empty cell in row-major traversal order.
fn first_empty(board: &Board) -> Result<Coord, StrategyError> {
    board.empty_coords().next().ok_or(StrategyError::NoLegalMoves)
}

/// Uniformly random empty cell.
fn uniform_random<R: Rng>(board: &Board, rng: &mut R) -> Result<Coord, StrategyError> {
    let open: Vec<Coord> = board.empty_coords().collect();
    if open.is_empty() {
        return Err(StrategyError::NoLegalMoves);
    }
    Ok(open[rng.gen_range(0..open.len())])
}

/// Finds a cell that wins the game for `marker` immediately, if any.
///
/// Probes every empty cell with a hypothetical placement and keeps the
/// first that completes a line.
pub(crate) fn winning_move(board: &Board, marker: Marker) -> Option<Coord> {
    board.empty_coords().find(|&at| {
        apply_move(board, at, marker)
            .map(|probe| check_winner(&probe) == Some(marker))
            .unwrap_or(false)
    })
}

/// Finds the cell the opponent of `marker` would win with, if any.
///
/// Playing it first denies the win.
pub(crate) fn blocking_move(board: &Board, marker: Marker) -> Option<Coord> {
    winning_move(board, marker.opponent())
}
