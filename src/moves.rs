//! Move application and the append-only move log.
//!
//! Moves are domain events: they can be validated before application,
//! serialized for storage, and replayed to reconstruct a board. Applying
//! a move never touches the input board; the caller receives a fresh
//! snapshot with exactly one cell changed.

use crate::board::{Board, Coord};
use crate::types::{Cell, Dimension, Marker};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Why a requested placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// Some coordinate component falls outside the board.
    #[display("move is out of bounds")]
    OutOfBounds,
    /// The targeted cell already holds a marker.
    #[display("cell is already occupied by {}", _0)]
    CellOccupied(Marker),
}

impl std::error::Error for IllegalMove {}

/// Applies a placement, returning a new board snapshot.
///
/// Legal iff the coordinate is in bounds and the targeted cell is empty.
/// All other cells are carried over unchanged.
///
/// # Errors
///
/// [`IllegalMove::OutOfBounds`] or [`IllegalMove::CellOccupied`].
pub fn apply_move(board: &Board, at: Coord, marker: Marker) -> Result<Board, IllegalMove> {
    match board.get(at) {
        None => Err(IllegalMove::OutOfBounds),
        Some(Cell::Mark(occupant)) => Err(IllegalMove::CellOccupied(occupant)),
        Some(Cell::Empty) => {
            let mut next = board.clone();
            next.set(at, Cell::Mark(marker));
            Ok(next)
        }
    }
}

/// A player's intent: occupy a cell, or concede the game.
///
/// Serializes the way game records store it: a coordinate array for a
/// placement, the string `"RESIGN"` for a concession.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAction {
    /// Place the actor's marker at a coordinate.
    Place(Coord),
    /// Concede the game.
    Resign,
}

impl Serialize for MoveAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MoveAction::Place(at) => at.serialize(serializer),
            MoveAction::Resign => serializer.serialize_str("RESIGN"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActionRepr {
    Text(String),
    At(Coord),
}

impl<'de> Deserialize<'de> for MoveAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ActionRepr::deserialize(deserializer)? {
            ActionRepr::At(at) => Ok(MoveAction::Place(at)),
            ActionRepr::Text(text) if text == "RESIGN" => Ok(MoveAction::Resign),
            ActionRepr::Text(text) => Err(serde::de::Error::custom(format!(
                "unknown move action {text:?}"
            ))),
        }
    }
}

/// One entry of a game's move log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    player: Marker,
    position: MoveAction,
    timestamp: DateTime<Utc>,
}

impl MoveRecord {
    /// Records a placement, stamped with the current time.
    pub fn place(player: Marker, at: Coord) -> Self {
        Self {
            player,
            position: MoveAction::Place(at),
            timestamp: Utc::now(),
        }
    }

    /// Records a concession, stamped with the current time.
    pub fn resign(player: Marker) -> Self {
        Self {
            player,
            position: MoveAction::Resign,
            timestamp: Utc::now(),
        }
    }

    /// The acting marker.
    pub fn player(&self) -> Marker {
        self.player
    }

    /// What the actor did.
    pub fn position(&self) -> MoveAction {
        self.position
    }

    /// When the move was applied.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Append-only, insertion-ordered record of a game's moves.
///
/// The log is the canonical history: folding it over a fresh board of
/// the same dimension reproduces the board snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveLog {
    entries: Vec<MoveRecord>,
}

impl MoveLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in play order.
    pub fn entries(&self) -> &[MoveRecord] {
        &self.entries
    }

    /// Number of recorded moves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been played.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, record: MoveRecord) {
        self.entries.push(record);
    }

    /// Folds the log's placements over a fresh board of the given
    /// dimension, reproducing the board they led to. Resignations carry
    /// no grid change and are skipped.
    ///
    /// # Errors
    ///
    /// [`IllegalMove`] when a recorded placement does not fit the board,
    /// which indicates a log stored against the wrong dimension.
    pub fn replay(&self, dimension: Dimension) -> Result<Board, IllegalMove> {
        let mut board = Board::new(dimension);
        for record in &self.entries {
            if let MoveAction::Place(at) = record.position {
                board = apply_move(&board, at, record.player)?;
            }
        }
        Ok(board)
    }
}

impl FromIterator<MoveRecord> for MoveLog {
    fn from_iter<I: IntoIterator<Item = MoveRecord>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimension;

    #[test]
    fn test_apply_changes_only_the_target() {
        let board = Board::new(Dimension::ThreeD);
        let at = Coord::cube(1, 2, 3);
        let next = apply_move(&board, at, Marker::X).unwrap();
        assert_eq!(next.get(at), Some(Cell::Mark(Marker::X)));
        let changed = next
            .cells()
            .iter()
            .zip(board.cells())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 1);
        // The input snapshot is untouched.
        assert_eq!(board.get(at), Some(Cell::Empty));
    }

    #[test]
    fn test_apply_rejects_occupied_cell() {
        let board = Board::new(Dimension::TwoD);
        let at = Coord::plane(1, 1);
        let board = apply_move(&board, at, Marker::X).unwrap();
        assert_eq!(
            apply_move(&board, at, Marker::O),
            Err(IllegalMove::CellOccupied(Marker::X))
        );
    }

    #[test]
    fn test_apply_rejects_out_of_bounds() {
        let board = Board::new(Dimension::TwoD);
        assert_eq!(
            apply_move(&board, Coord::plane(0, 3), Marker::X),
            Err(IllegalMove::OutOfBounds)
        );
    }

    #[test]
    fn test_move_action_wire_format() {
        let place = MoveAction::Place(Coord::cube(0, 1, 2));
        assert_eq!(serde_json::to_string(&place).unwrap(), "[0,1,2]");
        assert_eq!(serde_json::to_string(&MoveAction::Resign).unwrap(), "\"RESIGN\"");
        let back: MoveAction = serde_json::from_str("\"RESIGN\"").unwrap();
        assert_eq!(back, MoveAction::Resign);
        assert!(serde_json::from_str::<MoveAction>("\"FORFEIT\"").is_err());
    }

    #[test]
    fn test_replay_reproduces_board() {
        let mut board = Board::new(Dimension::TwoD);
        let mut log = MoveLog::new();
        for (at, marker) in [
            (Coord::plane(1, 1), Marker::X),
            (Coord::plane(0, 0), Marker::O),
            (Coord::plane(2, 2), Marker::X),
        ] {
            board = apply_move(&board, at, marker).unwrap();
            log.push(MoveRecord::place(marker, at));
        }
        assert_eq!(log.replay(Dimension::TwoD).unwrap(), board);
    }

    #[test]
    fn test_replay_skips_resignations() {
        let mut log = MoveLog::new();
        log.push(MoveRecord::place(Marker::X, Coord::plane(0, 0)));
        log.push(MoveRecord::resign(Marker::O));
        let board = log.replay(Dimension::TwoD).unwrap();
        assert_eq!(board.empty_coords().count(), 8);
    }
}
