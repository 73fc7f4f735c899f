//! Scoring-line tables for each board variant.
//!
//! Lines are stored as flat row-major indices and generated once per
//! variant. The cube table reproduces the historical rule set verbatim:
//! per level it scores that level's rows, columns and two slab diagonals;
//! across levels it scores only the pillars through the slab-diagonal
//! cells `(i, i)` and `(i, size-1-i)` plus the four space diagonals.
//! Off-diagonal pillars (fixed row/column, varying level, row ≠ column
//! and row + column ≠ size-1) are deliberately NOT scoring lines.

use crate::types::Dimension;
use std::sync::LazyLock;

pub(crate) type Line = Vec<usize>;

static PLANE_LINES: LazyLock<Vec<Line>> = LazyLock::new(|| plane_lines(Dimension::TwoD.size()));
static CUBE_LINES: LazyLock<Vec<Line>> = LazyLock::new(|| cube_lines(Dimension::ThreeD.size()));

/// All scoring lines for the given board variant.
pub(crate) fn lines(dimension: Dimension) -> &'static [Line] {
    match dimension {
        Dimension::TwoD => &PLANE_LINES,
        Dimension::ThreeD => &CUBE_LINES,
    }
}

fn plane_lines(size: usize) -> Vec<Line> {
    let at = |x: usize, y: usize| x * size + y;
    let mut lines = Vec::new();
    for x in 0..size {
        lines.push((0..size).map(|y| at(x, y)).collect());
    }
    for y in 0..size {
        lines.push((0..size).map(|x| at(x, y)).collect());
    }
    lines.push((0..size).map(|i| at(i, i)).collect());
    lines.push((0..size).map(|i| at(i, size - 1 - i)).collect());
    lines
}

fn cube_lines(size: usize) -> Vec<Line> {
    let at = |x: usize, y: usize, z: usize| x * size * size + y * size + z;
    let mut lines = Vec::new();
    for x in 0..size {
        for y in 0..size {
            lines.push((0..size).map(|z| at(x, y, z)).collect());
        }
        for z in 0..size {
            lines.push((0..size).map(|y| at(x, y, z)).collect());
        }
    }
    for x in 0..size {
        lines.push((0..size).map(|i| at(x, i, i)).collect());
        lines.push((0..size).map(|i| at(x, i, size - 1 - i)).collect());
    }
    for i in 0..size {
        lines.push((0..size).map(|x| at(x, i, i)).collect());
        lines.push((0..size).map(|x| at(x, i, size - 1 - i)).collect());
    }
    lines.push((0..size).map(|i| at(i, i, i)).collect());
    lines.push((0..size).map(|i| at(i, i, size - 1 - i)).collect());
    lines.push((0..size).map(|i| at(i, size - 1 - i, i)).collect());
    lines.push((0..size).map(|i| at(i, size - 1 - i, size - 1 - i)).collect());
    lines
}
