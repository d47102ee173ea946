//! Evaluation weights
//!
//! Evaluation is kept in integer tenths of a point so the search never
//! compares floats. One captured point is worth ten units.

/// Weights for the leaf evaluation
pub struct EvalWeight;

impl EvalWeight {
    /// Per point of score difference
    pub const SCORE: i32 = 10;
    /// Per number of a promoted piece (half a point)
    pub const PROMOTED_NUMBER: i32 = 5;
    /// Per row travelled from the back rank (a tenth of a point)
    pub const ADVANCEMENT: i32 = 1;

    /// Bound on any leaf evaluation, kept below the sentinels
    pub const MAX_EVAL: i32 = 500_000;

    /// Larger than any reachable evaluation; used for sentinels and windows
    pub const INFINITY: i32 = 1_000_000;
    /// Value given to a move the simulator rejects, from the mover's side
    pub const INVALID_MOVE: i32 = 900_000;
}

/// Evaluation units for an immediate score gain
#[inline]
pub fn gain_value(points: u32) -> i32 {
    let units = i64::from(points) * i64::from(EvalWeight::SCORE);
    units.min(i64::from(EvalWeight::MAX_EVAL)) as i32
}
