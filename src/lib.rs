//! Board/game engine for generalized tic-tac-toe.
//!
//! Two board variants are supported: the classic 3×3 plane and a 4×4×4
//! cube. The crate covers the board model, line/win evaluation, move
//! validation, the turn/outcome state machine, and the computer-opponent
//! strategies; transport, persistence, auth and export stay with the
//! surrounding service.
//!
//! # Architecture
//!
//! - **Board**: dimension-agnostic grid with bounds and occupancy queries
//! - **Rules**: scoring-line tables, win detection, outcome evaluation
//! - **Moves**: validated placements producing fresh board snapshots,
//!   plus the append-only move log
//! - **Game**: the turn state machine driving one game instance
//! - **Strategy**: first-empty, random, exhaustive-search and Monte
//!   Carlo decision policies behind one configuration type
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Coord, Dimension, Game, Marker, Outcome, StrategyConfig, decide};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = Game::new(Dimension::TwoD);
//! game.submit(Marker::X, Coord::plane(1, 1))?;
//!
//! let config = StrategyConfig::default().with_seed(7);
//! let reply = decide(game.board(), Marker::O, &config)?;
//! assert_eq!(game.submit(Marker::O, reply)?, Outcome::InProgress);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod config;
mod game;
mod moves;
mod runner;
mod rules;
mod strategy;
mod types;

// Crate-level exports - Board model
pub use board::{Board, Coord};

// Crate-level exports - Rules
pub use rules::{check_winner, evaluate_outcome};

// Crate-level exports - Move engine and history
pub use moves::{apply_move, IllegalMove, MoveAction, MoveLog, MoveRecord};

// Crate-level exports - Turn/outcome state machine
pub use game::{Game, GameError};

// Crate-level exports - Opponent strategies
pub use strategy::{decide, StrategyError, StrategyKind};

// Crate-level exports - Configuration
pub use config::{ConfigError, StrategyConfig};

// Crate-level exports - Async decision runner
pub use runner::decide_detached;

// Crate-level exports - Core domain types
pub use types::{Cell, Dimension, InvalidDimension, Marker, Outcome};
