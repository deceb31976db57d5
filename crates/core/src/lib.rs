//! Core match-3 rules - pure, deterministic, and testable
//!
//! This crate contains every game rule: the board and its match engine,
//! level initialization, cascades, move search and the session state
//! machine. It has no rendering, audio or I/O; collaborators observe the
//! session through its outbound [`CoreEvent`](types::CoreEvent) queue and
//! [`GameSnapshot`] projections.
//!
//! # Module Structure
//!
//! - [`grid`]: generic fixed-size grid with coordinate/world conversions
//! - [`board`]: cells, run detection, clearing and gravity
//! - [`scoring`]: run-length score table
//! - [`rng`]: seeded LCG for fills and refills
//! - [`level`]: level validation, fill policy and anti-starting-match repair
//! - [`cascade`]: match, gravity and refill phases to quiescence
//! - [`moves`]: swap legality and best-move search
//! - [`session`]: turn lifecycle and win/lose evaluation
//! - [`snapshot`]: copy-out view for renderers
//!
//! # Game Rules
//!
//! - **Matches**: three or more same-kind items in a row or column
//! - **Scoring**: 100 / 150 / 200 / 250 points for runs of 3 / 4 / 5 / 6+
//! - **Glass**: broken when its cell is part of a match; glass levels are
//!   won by breaking all of it
//! - **Moves**: only swaps that create a match cost a move
//! - **Cascades**: cleared cells fill from above and from fresh items until
//!   no match remains
//!
//! # Example
//!
//! ```
//! use match3_core::{Board, GameSession};
//! use match3_core::types::{ItemType, LevelDefinition, SwapOutcome, TargetType};
//!
//! let items = vec![ItemType::Red, ItemType::Green, ItemType::Blue, ItemType::Yellow];
//! let board = Board::parse(&["GBYR", "RRGB", "BYRG"], &items).unwrap();
//! let level = LevelDefinition {
//!     width: 6,
//!     height: 6,
//!     cell_size: 1.0,
//!     item_size: 0.8,
//!     items,
//!     random_fill: true,
//!     moves: 10,
//!     target: TargetType::Score,
//!     target_score: 100,
//!     grid_cells: Vec::new(),
//! };
//!
//! let mut session = GameSession::from_board(0, level, board, 1).unwrap();
//! // Red at (2, 0) moves up next to the two Reds on row 1.
//! assert_eq!(session.play_swap(2, 0, 2, 1), SwapOutcome::Accepted);
//! assert!(session.score() >= 100);
//! assert_eq!(session.moves(), 9);
//! ```

pub mod board;
pub mod cascade;
pub mod error;
pub mod grid;
pub mod level;
pub mod moves;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use board::{Axis, Board, ClearReport, Fall, Run};
pub use cascade::{CascadePhase, CascadeResolver, CascadeStep, CascadeSummary};
pub use error::LevelError;
pub use grid::{Grid, WorldPos};
pub use level::{
    fill_board, initialize_board, level_from_json, repair_board, validate_level, InitializedBoard,
};
pub use moves::{
    best_possible_move, evaluate_moves, has_possible_move, is_valid_position, MoveEvaluation,
    SimulatedSwap,
};
pub use rng::{random_item, SimpleRng};
pub use scoring::run_score;
pub use session::GameSession;
pub use snapshot::GameSnapshot;
