//! Win detection.

use super::lines::lines;
use crate::board::Board;
use crate::types::{Cell, Marker};

/// Checks if there is a winner on the board.
///
/// A line wins when every cell in it holds the same non-empty marker;
/// the first winning line in table order decides. A line containing any
/// empty cell never wins.
pub fn check_winner(board: &Board) -> Option<Marker> {
    let cells = board.cells();
    for line in lines(board.dimension()) {
        let first = cells[line[0]];
        let Cell::Mark(marker) = first else {
            continue;
        };
        if line[1..].iter().all(|&idx| cells[idx] == first) {
            return Some(marker);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::types::Dimension;

    fn mark(board: &mut Board, at: Coord, marker: Marker) {
        board.set(at, Cell::Mark(marker));
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new(Dimension::TwoD)), None);
        assert_eq!(check_winner(&Board::new(Dimension::ThreeD)), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new(Dimension::TwoD);
        mark(&mut board, Coord::plane(0, 0), Marker::X);
        mark(&mut board, Coord::plane(0, 1), Marker::X);
        mark(&mut board, Coord::plane(0, 2), Marker::X);
        assert_eq!(check_winner(&board), Some(Marker::X));
    }

    #[test]
    fn test_winner_column() {
        let mut board = Board::new(Dimension::TwoD);
        mark(&mut board, Coord::plane(0, 1), Marker::O);
        mark(&mut board, Coord::plane(1, 1), Marker::O);
        mark(&mut board, Coord::plane(2, 1), Marker::O);
        assert_eq!(check_winner(&board), Some(Marker::O));
    }

    #[test]
    fn test_winner_diagonal() {
        let mut board = Board::new(Dimension::TwoD);
        mark(&mut board, Coord::plane(0, 0), Marker::O);
        mark(&mut board, Coord::plane(1, 1), Marker::O);
        mark(&mut board, Coord::plane(2, 2), Marker::O);
        assert_eq!(check_winner(&board), Some(Marker::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new(Dimension::TwoD);
        mark(&mut board, Coord::plane(0, 0), Marker::X);
        mark(&mut board, Coord::plane(0, 1), Marker::X);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_never_wins() {
        let mut board = Board::new(Dimension::TwoD);
        mark(&mut board, Coord::plane(0, 0), Marker::X);
        mark(&mut board, Coord::plane(0, 1), Marker::O);
        mark(&mut board, Coord::plane(0, 2), Marker::X);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_cube_slab_row() {
        let mut board = Board::new(Dimension::ThreeD);
        for z in 0..4 {
            mark(&mut board, Coord::cube(2, 1, z), Marker::X);
        }
        assert_eq!(check_winner(&board), Some(Marker::X));
    }

    #[test]
    fn test_winner_cube_diagonal_pillar() {
        let mut board = Board::new(Dimension::ThreeD);
        for x in 0..4 {
            mark(&mut board, Coord::cube(x, 2, 2), Marker::O);
        }
        assert_eq!(check_winner(&board), Some(Marker::O));
    }

    #[test]
    fn test_cube_off_diagonal_pillar_does_not_win() {
        // Historical rule set: a pillar through (row 0, col 1) is unscored.
        let mut board = Board::new(Dimension::ThreeD);
        for x in 0..4 {
            mark(&mut board, Coord::cube(x, 0, 1), Marker::X);
        }
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_cube_space_diagonal() {
        let mut board = Board::new(Dimension::ThreeD);
        for i in 0..4 {
            mark(&mut board, Coord::cube(i, i, 3 - i), Marker::X);
        }
        assert_eq!(check_winner(&board), Some(Marker::X));
    }
}
