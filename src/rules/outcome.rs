//! Outcome evaluation: win, tie, or still in progress.

use super::win::check_winner;
use crate::board::Board;
use crate::types::Outcome;

/// Evaluates a board snapshot.
///
/// Returns [`Outcome::Won`] when some line is complete, [`Outcome::Tie`]
/// when no empty cell remains and no line is complete, otherwise
/// [`Outcome::InProgress`]. Resignation is recorded by the state machine,
/// never derived from the grid.
pub fn evaluate_outcome(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        return Outcome::Won(winner);
    }
    if board.is_full() {
        return Outcome::Tie;
    }
    Outcome::InProgress
}
