//! Check10 move engine
//!
//! Check10 is played on an 8x8 board with numbered pieces (1-8, two of each
//! per side). Pieces step one square forward or diagonally forward into an
//! empty square; nothing is captured by landing. Captures happen two ways:
//! - Combination: after every move, connected mixed-color groups near the
//!   destination whose numbers sum to exactly 10 lose their opposing members
//! - Promotion: a piece reaching the far rank for the first time captures an
//!   unpromoted opposing piece with the same number
//!
//! Captured numbers are added to the mover's score. The game ends when the
//! side to move has no legal move.
//!
//! # Architecture
//!
//! - [`board`]: Board representation with per-color bitboards
//! - [`rules`]: Move generation, capture resolution, move simulation
//! - [`eval`]: Static evaluation
//! - [`search`]: Iterative-deepening alpha-beta with a Zobrist-keyed table
//! - [`engine`]: Engine facade turning a snapshot into a move
//! - [`game`]: Game state snapshot and move application
//! - [`protocol`]: JSON request / response handling
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use check10::{Engine, EngineConfig, GameState};
//!
//! let mut state = GameState::new();
//! let engine = Engine::new(EngineConfig::default().with_tt_size_mb(1));
//!
//! let result = engine.find_best_move_with_budget(&state, Duration::from_millis(100));
//! if let Some(mv) = result.best_move {
//!     state.apply_move(&mv, result.capture_choice).unwrap();
//!     println!("Engine plays {mv}");
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Color, Piece, Pos, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{Engine, MoveResult, SearchType};
pub use error::{EngineError, Result};
pub use game::{GameState, Phase};
pub use rules::Move;
