//! Off-thread execution of CPU-bound decision strategies.
//!
//! Exhaustive search and Monte Carlo playouts can run for hundreds of
//! milliseconds to seconds. The runner moves them onto tokio's blocking
//! pool so unrelated game operations keep flowing, and bounds the wait
//! with an optional caller deadline.

use crate::board::{Board, Coord};
use crate::config::StrategyConfig;
use crate::strategy::{self, StrategyError};
use crate::types::Marker;
use std::time::Duration;
use tokio::time;
use tracing::instrument;

/// Decides the acting marker's next move on a blocking worker thread.
///
/// With a `deadline`, the wait is abandoned when it expires. The worker
/// itself cannot be interrupted; it winds down on its own once the
/// strategy's internal budget or iteration count is spent.
///
/// # Errors
///
/// Any [`StrategyError`] from the decision, plus
/// [`StrategyError::DeadlineExpired`] when the deadline elapses first
/// and [`StrategyError::WorkerFailed`] when the worker panics.
#[instrument(skip(board, config), fields(kind = %config.kind(), player = %marker))]
pub async fn decide_detached(
    board: Board,
    marker: Marker,
    config: StrategyConfig,
    deadline: Option<Duration>,
) -> Result<Coord, StrategyError> {
    let task = tokio::task::spawn_blocking(move || strategy::decide(&board, marker, &config));
    let joined = match deadline {
        Some(limit) => match time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => return Err(StrategyError::DeadlineExpired),
        },
        None => task.await,
    };
    joined.map_err(|e| StrategyError::WorkerFailed(e.to_string()))?
}
