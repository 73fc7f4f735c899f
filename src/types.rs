//! Core domain types shared across the engine.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Marker owned by a participant in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// First marker (opens the game by default).
    X,
    /// Second marker.
    O,
}

impl Marker {
    /// Returns the opposing marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Marker::X => write!(f, "X"),
            Marker::O => write!(f, "O"),
        }
    }
}

/// One cell of a board grid.
///
/// Serializes as `"X"`, `"O"`, or `null`, the wire format game records
/// are stored and exported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Marker>", into = "Option<Marker>")]
pub enum Cell {
    /// Unoccupied cell.
    Empty,
    /// Cell occupied by a marker. Occupation is permanent.
    Mark(Marker),
}

impl Cell {
    /// Returns the occupying marker, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            Cell::Empty => None,
            Cell::Mark(marker) => Some(marker),
        }
    }

    /// True when the cell is unoccupied.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Option<Marker>> for Cell {
    fn from(value: Option<Marker>) -> Self {
        match value {
            None => Cell::Empty,
            Some(marker) => Cell::Mark(marker),
        }
    }
}

impl From<Cell> for Option<Marker> {
    fn from(value: Cell) -> Self {
        value.marker()
    }
}

/// Board variant: a 3×3 plane or a 4×4×4 cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Two-dimensional 3×3 board.
    #[serde(rename = "2d")]
    TwoD,
    /// Three-dimensional 4×4×4 board.
    #[serde(rename = "3d")]
    ThreeD,
}

impl Dimension {
    /// Edge length of the board along every axis.
    pub fn size(self) -> usize {
        match self {
            Dimension::TwoD => 3,
            Dimension::ThreeD => 4,
        }
    }

    /// Number of components in a coordinate for this board.
    pub fn rank(self) -> usize {
        match self {
            Dimension::TwoD => 2,
            Dimension::ThreeD => 3,
        }
    }

    /// Total number of cells on the board.
    pub fn cell_count(self) -> usize {
        self.size().pow(self.rank() as u32)
    }

    /// Builds a dimension from its rank (number of axes).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDimension`] for any rank other than 2 or 3.
    pub fn from_rank(rank: usize) -> Result<Self, InvalidDimension> {
        match rank {
            2 => Ok(Dimension::TwoD),
            3 => Ok(Dimension::ThreeD),
            _ => Err(InvalidDimension),
        }
    }
}

impl FromStr for Dimension {
    type Err = InvalidDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "2d" => Ok(Dimension::TwoD),
            "3d" => Ok(Dimension::ThreeD),
            _ => Err(InvalidDimension),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::TwoD => write!(f, "2d"),
            Dimension::ThreeD => write!(f, "3d"),
        }
    }
}

/// Requested board dimensionality is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("invalid board dimension, use \"2d\" or \"3d\"")]
pub struct InvalidDimension;

/// Terminal or ongoing status of a game.
///
/// Transitions only move forward: once a game leaves [`Outcome::InProgress`]
/// no further moves are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The game accepts further moves.
    InProgress,
    /// A marker completed a line.
    Won(Marker),
    /// The board filled up with no completed line.
    Tie,
    /// A participant conceded.
    Resigned(Marker),
}

impl Outcome {
    /// True once the game no longer accepts moves.
    pub fn is_finished(self) -> bool {
        self != Outcome::InProgress
    }
}
