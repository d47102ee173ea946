//! Position evaluation for Check10
//!
//! Contains:
//! - Evaluation weights
//! - Static leaf heuristic (score difference, promotions, advancement)

pub mod heuristic;
pub mod weights;

pub use heuristic::{evaluate, piece_term};
pub use weights::{gain_value, EvalWeight};
