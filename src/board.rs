//! Dimension-agnostic board grid and coordinates.
//!
//! The board stores cells in a flat row-major vector; all reads go through
//! bounds-checked coordinate lookups. Mutation is crate-private so that a
//! cell can only change through the move engine in [`crate::moves`].

use crate::types::{Cell, Dimension, Marker};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A cell address on a board: two components on a plane, three on a cube.
///
/// For the cube, `x` indexes the level, `y` the row within the level and
/// `z` the column. Serializes as `[x, y]` / `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coord {
    /// Address on a 3×3 plane.
    Plane {
        /// Row index.
        x: usize,
        /// Column index.
        y: usize,
    },
    /// Address in a 4×4×4 cube.
    Cube {
        /// Level index.
        x: usize,
        /// Row index within the level.
        y: usize,
        /// Column index within the level.
        z: usize,
    },
}

impl Coord {
    /// Builds a plane coordinate.
    pub fn plane(x: usize, y: usize) -> Self {
        Coord::Plane { x, y }
    }

    /// Builds a cube coordinate.
    pub fn cube(x: usize, y: usize, z: usize) -> Self {
        Coord::Cube { x, y, z }
    }

    /// Number of components.
    pub fn rank(self) -> usize {
        match self {
            Coord::Plane { .. } => 2,
            Coord::Cube { .. } => 3,
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coord::Plane { x, y } => write!(f, "({x}, {y})"),
            Coord::Cube { x, y, z } => write!(f, "({x}, {y}, {z})"),
        }
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Coord::Plane { x, y } => [x, y].serialize(serializer),
            Coord::Cube { x, y, z } => [x, y, z].serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let components = Vec::<usize>::deserialize(deserializer)?;
        match components[..] {
            [x, y] => Ok(Coord::plane(x, y)),
            [x, y, z] => Ok(Coord::cube(x, y, z)),
            _ => Err(D::Error::invalid_length(
                components.len(),
                &"a coordinate with 2 or 3 components",
            )),
        }
    }
}

/// Uniform grid of cells for one game.
///
/// Dimension and size are fixed at creation. Boards are cheap to clone
/// (at most 64 cells), and the move engine returns a fresh snapshot per
/// applied move rather than aliasing the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dimension: Dimension,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board with every cell empty.
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            cells: vec![Cell::Empty; dimension.cell_count()],
        }
    }

    /// Returns the board variant.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Edge length along every axis.
    pub fn size(&self) -> usize {
        self.dimension.size()
    }

    /// Returns the cell at the given coordinate, or `None` when any
    /// component falls outside `[0, size)`.
    ///
    /// Out of bounds is a distinct signal from [`Cell::Empty`].
    ///
    /// # Panics
    ///
    /// Panics when the coordinate arity does not match the board
    /// dimension; mixing a cube coordinate into a plane game is a
    /// programming error, not a rejected move.
    pub fn get(&self, at: Coord) -> Option<Cell> {
        self.offset(at).map(|idx| self.cells[idx])
    }

    /// True only when the coordinate is in bounds and the cell is empty.
    pub fn is_empty_at(&self, at: Coord) -> bool {
        self.get(at) == Some(Cell::Empty)
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Lazily enumerates every empty cell in row-major order.
    ///
    /// The traversal order is fixed so that strategies picking "the first"
    /// empty cell are reproducible.
    pub fn empty_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| self.coord_at(idx))
    }

    /// Sets a cell. Callers must have validated the coordinate.
    pub(crate) fn set(&mut self, at: Coord, cell: Cell) {
        let idx = self
            .offset(at)
            .unwrap_or_else(|| panic!("coordinate {at} out of bounds for {} board", self.dimension));
        self.cells[idx] = cell;
    }

    /// Flat row-major view of the grid.
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Converts a flat index back into a coordinate.
    pub(crate) fn coord_at(&self, idx: usize) -> Coord {
        let size = self.size();
        match self.dimension {
            Dimension::TwoD => Coord::plane(idx / size, idx % size),
            Dimension::ThreeD => {
                Coord::cube(idx / (size * size), (idx / size) % size, idx % size)
            }
        }
    }

    /// Flat index of a coordinate, or `None` when out of bounds.
    fn offset(&self, at: Coord) -> Option<usize> {
        assert_eq!(
            at.rank(),
            self.dimension.rank(),
            "coordinate arity {} does not match {} board",
            at.rank(),
            self.dimension,
        );
        let size = self.size();
        match at {
            Coord::Plane { x, y } => (x < size && y < size).then(|| x * size + y),
            Coord::Cube { x, y, z } => {
                (x < size && y < size && z < size).then(|| x * size * size + y * size + z)
            }
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.size();
        let symbol = |cell: Cell| match cell.marker() {
            Some(Marker::X) => "X",
            Some(Marker::O) => "O",
            None => ".",
        };
        match self.dimension {
            Dimension::TwoD => {
                for x in 0..size {
                    if x > 0 {
                        writeln!(f, "{}", vec!["-"; size].join("+"))?;
                    }
                    let row: Vec<&str> = (0..size)
                        .map(|y| symbol(self.cells[x * size + y]))
                        .collect();
                    writeln!(f, "{}", row.join("|"))?;
                }
            }
            Dimension::ThreeD => {
                for x in 0..size {
                    writeln!(f, "level {x}:")?;
                    for y in 0..size {
                        let row: Vec<&str> = (0..size)
                            .map(|z| symbol(self.cells[x * size * size + y * size + z]))
                            .collect();
                        writeln!(f, "{}", row.join("|"))?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let size = self.size();
        match self.dimension {
            Dimension::TwoD => {
                let rows: Vec<Vec<Cell>> = self.cells.chunks(size).map(|row| row.to_vec()).collect();
                rows.serialize(serializer)
            }
            Dimension::ThreeD => {
                let levels: Vec<Vec<Vec<Cell>>> = self
                    .cells
                    .chunks(size * size)
                    .map(|level| level.chunks(size).map(|row| row.to_vec()).collect())
                    .collect();
                levels.serialize(serializer)
            }
        }
    }
}

/// Nested-array wire shapes a stored board can arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum Grid {
    Plane(Vec<Vec<Cell>>),
    Cube(Vec<Vec<Vec<Cell>>>),
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Grid::deserialize(deserializer)? {
            Grid::Plane(rows) => {
                let dimension = Dimension::TwoD;
                let size = dimension.size();
                if rows.len() != size || rows.iter().any(|row| row.len() != size) {
                    return Err(D::Error::custom("malformed 2d board, expected 3x3"));
                }
                Ok(Board {
                    dimension,
                    cells: rows.into_iter().flatten().collect(),
                })
            }
            Grid::Cube(levels) => {
                let dimension = Dimension::ThreeD;
                let size = dimension.size();
                let well_formed = levels.len() == size
                    && levels
                        .iter()
                        .all(|level| {
                            level.len() == size && level.iter().all(|row| row.len() == size)
                        });
                if !well_formed {
                    return Err(D::Error::custom("malformed 3d board, expected 4x4x4"));
                }
                Ok(Board {
                    dimension,
                    cells: levels.into_iter().flatten().flatten().collect(),
                })
            }
        }
    }
}
