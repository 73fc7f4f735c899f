//! Monte Carlo Tree Search over an arena-allocated tree.
//!
//! Nodes live in a flat vector and refer to parents and children by
//! index, so the tree carries no reference cycles and is dropped with
//! the decision that built it. Each iteration runs the four classic
//! phases: selection by UCT score down to a childless node, expansion
//! of one child per remaining empty cell, a uniformly random playout
//! from the expanded node, and backpropagation of the playout result
//! along the parent chain. Playout results are scored +1/0/-1 from the
//! acting marker's perspective, so a node's win counter may go negative.

use super::{blocking_move, winning_move, StrategyError};
use crate::board::{Board, Coord};
use crate::moves::apply_move;
use crate::rules::check_winner;
use crate::types::Marker;
use rand::Rng;
use tracing::debug;

pub(super) fn decide<R: Rng>(
    board: &Board,
    marker: Marker,
    iterations: u32,
    rng: &mut R,
) -> Result<Coord, StrategyError> {
    if let Some(at) = winning_move(board, marker) {
        return Ok(at);
    }
    if let Some(at) = blocking_move(board, marker) {
        return Ok(at);
    }
    if board.empty_coords().next().is_none() {
        return Err(StrategyError::NoLegalMoves);
    }

    let mut tree = SearchTree::new(board.clone(), marker);
    for _ in 0..iterations {
        let leaf = tree.select();
        tree.expand(leaf);
        let result = tree.simulate(leaf, rng);
        tree.backpropagate(leaf, result);
    }
    let at = tree
        .best_root_move()
        .unwrap_or_else(|| {
            board
                .empty_coords()
                .next()
                .expect("board was checked for an empty cell")
        });
    debug!(nodes = tree.nodes.len(), iterations, position = %at, "playouts complete");
    Ok(at)
}

struct Node {
    board: Board,
    /// Move that led here from the parent; `None` for the root.
    position: Option<Coord>,
    parent: Option<usize>,
    children: Vec<usize>,
    visits: u32,
    wins: i64,
}

struct SearchTree {
    nodes: Vec<Node>,
    acting: Marker,
}

const ROOT: usize = 0;

impl SearchTree {
    fn new(board: Board, acting: Marker) -> Self {
        Self {
            nodes: vec![Node {
                board,
                position: None,
                parent: None,
                children: Vec::new(),
                visits: 0,
                wins: 0,
            }],
            acting,
        }
    }

    /// Descends from the root, at each step taking the child with the
    /// highest UCT score, until reaching a node with no children.
    fn select(&self) -> usize {
        let mut id = ROOT;
        while !self.nodes[id].children.is_empty() {
            let parent_visits = self.nodes[id].visits;
            let mut best = self.nodes[id].children[0];
            let mut best_score = f64::NEG_INFINITY;
            for &child in &self.nodes[id].children {
                let score = self.uct(parent_visits, child);
                if score > best_score {
                    best_score = score;
                    best = child;
                }
            }
            id = best;
        }
        id
    }

    /// Exploration/exploitation score of a child under its parent.
    fn uct(&self, parent_visits: u32, child: usize) -> f64 {
        let node = &self.nodes[child];
        let visits = node.visits as f64;
        node.wins as f64 / (visits + 1.0)
            + (2.0 * (parent_visits as f64 + 1.0).ln() / (visits + 1.0)).sqrt()
    }

    /// Adds one child per empty cell, each holding the acting marker's
    /// hypothetical placement there. Terminal boards gain no children.
    fn expand(&mut self, id: usize) {
        let open: Vec<Coord> = self.nodes[id].board.empty_coords().collect();
        for at in open {
            let board = apply_move(&self.nodes[id].board, at, self.acting)
                .expect("enumerated cell is empty");
            let child = Node {
                board,
                position: Some(at),
                parent: Some(id),
                children: Vec::new(),
                visits: 0,
                wins: 0,
            };
            let child_id = self.nodes.len();
            self.nodes.push(child);
            self.nodes[id].children.push(child_id);
        }
    }

    /// Plays uniformly random alternating moves from the node's board
    /// until a line completes or the board fills, then scores the result
    /// from the acting marker's perspective.
    fn simulate<R: Rng>(&self, id: usize, rng: &mut R) -> i64 {
        let mut board = self.nodes[id].board.clone();
        let mut current = self.acting;
        let mut winner = check_winner(&board);
        while winner.is_none() {
            let open: Vec<Coord> = board.empty_coords().collect();
            if open.is_empty() {
                break;
            }
            let at = open[rng.gen_range(0..open.len())];
            board = apply_move(&board, at, current).expect("enumerated cell is empty");
            winner = check_winner(&board);
            current = current.opponent();
        }
        match winner {
            Some(w) if w == self.acting => 1,
            Some(_) => -1,
            None => 0,
        }
    }

    /// Adds the playout result to every node on the path to the root.
    fn backpropagate(&mut self, id: usize, result: i64) {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &mut self.nodes[current];
            node.visits += 1;
            node.wins += result;
            cursor = node.parent;
        }
    }

    /// Root child with the highest win rate among visited children,
    /// first-encountered order breaking ties.
    fn best_root_move(&self) -> Option<Coord> {
        let mut best: Option<(Coord, f64)> = None;
        for &child_id in &self.nodes[ROOT].children {
            let child = &self.nodes[child_id];
            if child.visits == 0 {
                continue;
            }
            let rate = child.wins as f64 / child.visits as f64;
            let at = child.position.expect("non-root node carries its move");
            if best.is_none_or(|(_, top)| rate > top) {
                best = Some((at, rate));
            }
        }
        best.map(|(at, _)| at).or_else(|| {
            let &first = self.nodes[ROOT].children.first()?;
            self.nodes[first].position
        })
    }
}
