//! Game rules for Check10
//!
//! This module implements the rule set:
//! - Single-step forward and diagonal-forward moves
//! - Promotion capture of a same-numbered opposing piece
//! - Sum-to-10 combination capture around the destination
//!
//! [`simulate`] combines them into one state transition.

pub mod combination;
pub mod movegen;
pub mod promotion;
pub mod simulate;

// Re-exports for convenient access
pub use combination::{find_combination_captures, CombinationCaptures};
pub use movegen::{has_legal_moves, is_legal_move, moves_for, moves_for_color, Move};
pub use promotion::{capture_candidates, resolve_promotion, PromotionOutcome};
pub use simulate::{simulate, simulate_with_choice, SimulationError, Transition};
