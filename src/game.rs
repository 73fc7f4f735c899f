//! Turn/outcome state machine for one game instance.
//!
//! The machine owns the board, the move log and the turn marker, and is
//! driven once per move submission; it never polls or blocks. Once the
//! outcome leaves [`Outcome::InProgress`] every further submission is
//! rejected.

use crate::board::{Board, Coord};
use crate::moves::{self, IllegalMove, MoveAction, MoveLog, MoveRecord};
use crate::rules;
use crate::types::{Dimension, Marker, Outcome};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Errors returned when driving a game forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// The game has already reached a terminal outcome.
    #[display("game is already finished")]
    AlreadyFinished,
    /// The submitting marker is not the one to move.
    #[display("it is not {}'s turn", _0)]
    NotYourTurn(Marker),
    /// The placement itself was rejected.
    #[display("{}", _0)]
    #[from]
    Illegal(IllegalMove),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Illegal(inner) => Some(inner),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  State machine
// ─────────────────────────────────────────────────────────────

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    log: MoveLog,
    to_move: Marker,
    outcome: Outcome,
}

impl Game {
    /// Creates a game with X to move, the default opening side.
    #[instrument]
    pub fn new(dimension: Dimension) -> Self {
        Self::starting(dimension, Marker::X)
    }

    /// Creates a game with a configured starting actor, which may be the
    /// computer's marker.
    #[instrument]
    pub fn starting(dimension: Dimension, first: Marker) -> Self {
        Self {
            board: Board::new(dimension),
            log: MoveLog::new(),
            to_move: first,
            outcome: Outcome::InProgress,
        }
    }

    /// The current board snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board variant this game is played on.
    pub fn dimension(&self) -> Dimension {
        self.board.dimension()
    }

    /// The append-only move history.
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// The marker expected to move next. Meaningless once finished.
    pub fn to_move(&self) -> Marker {
        self.to_move
    }

    /// The game's current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Submits a placement for `marker` at `at`.
    ///
    /// On success the move is logged and the outcome advances: to
    /// [`Outcome::Won`] when the move completes a line, to
    /// [`Outcome::Tie`] when it fills the last cell without one, and
    /// otherwise the turn passes to the opponent.
    ///
    /// # Errors
    ///
    /// [`GameError::AlreadyFinished`] once the outcome is terminal,
    /// [`GameError::NotYourTurn`] for an out-of-turn marker, and
    /// [`GameError::Illegal`] for a rejected placement.
    #[instrument(skip(self), fields(player = %marker, position = %at))]
    pub fn submit(&mut self, marker: Marker, at: Coord) -> Result<Outcome, GameError> {
        if self.outcome.is_finished() {
            return Err(GameError::AlreadyFinished);
        }
        if marker != self.to_move {
            return Err(GameError::NotYourTurn(marker));
        }
        let next = moves::apply_move(&self.board, at, marker)?;
        debug_assert_eq!(
            next.cells()
                .iter()
                .zip(self.board.cells())
                .filter(|(a, b)| a != b)
                .count(),
            1,
            "a placement must change exactly one cell",
        );
        self.board = next;
        self.log.push(MoveRecord::place(marker, at));
        self.outcome = rules::evaluate_outcome(&self.board);
        if self.outcome == Outcome::InProgress {
            self.to_move = marker.opponent();
        }
        Ok(self.outcome)
    }

    /// Concedes the game for `marker`.
    ///
    /// Either participant may resign at any point while the game is in
    /// progress, regardless of whose turn it is. The grid is left
    /// untouched; the log records the concession. Crediting the other
    /// participant with the win is the caller's concern.
    ///
    /// # Errors
    ///
    /// [`GameError::AlreadyFinished`] once the outcome is terminal.
    #[instrument(skip(self), fields(player = %marker))]
    pub fn resign(&mut self, marker: Marker) -> Result<Outcome, GameError> {
        if self.outcome.is_finished() {
            return Err(GameError::AlreadyFinished);
        }
        self.log.push(MoveRecord::resign(marker));
        self.outcome = Outcome::Resigned(marker);
        Ok(self.outcome)
    }

    /// Rebuilds a game from a stored move log, revalidating every entry.
    ///
    /// The first placement's actor is taken as the starting side, so logs
    /// from games the computer opened replay correctly. Original records
    /// are preserved verbatim, timestamps included.
    ///
    /// # Errors
    ///
    /// Any error the original submissions could have produced; a clean
    /// log replays without error.
    #[instrument(skip(log), fields(moves = log.len()))]
    pub fn replay(dimension: Dimension, log: &MoveLog) -> Result<Self, GameError> {
        let first = log
            .entries()
            .iter()
            .find_map(|record| match record.position() {
                MoveAction::Place(_) => Some(record.player()),
                MoveAction::Resign => None,
            })
            .unwrap_or(Marker::X);
        let mut game = Game::starting(dimension, first);
        for record in log.entries() {
            if game.outcome.is_finished() {
                return Err(GameError::AlreadyFinished);
            }
            match record.position() {
                MoveAction::Place(at) => {
                    let marker = record.player();
                    if marker != game.to_move {
                        return Err(GameError::NotYourTurn(marker));
                    }
                    game.board = moves::apply_move(&game.board, at, marker)?;
                    game.outcome = rules::evaluate_outcome(&game.board);
                    if game.outcome == Outcome::InProgress {
                        game.to_move = marker.opponent();
                    }
                }
                MoveAction::Resign => {
                    game.outcome = Outcome::Resigned(record.player());
                }
            }
            game.log.push(*record);
        }
        Ok(game)
    }
}
