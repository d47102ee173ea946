//! Heuristic evaluation function for Check10 positions
//!
//! This module provides the leaf evaluation for the minimax search.
//! It evaluates board positions based on:
//! - Score difference between the two players
//! - Promoted pieces (worth half their number)
//! - Advancement toward the promotion row

use crate::board::{Board, Color, Piece, Pos};

use super::weights::EvalWeight;

/// Evaluate the position from the perspective of `root`.
///
/// `root_score` and `opp_score` are the points held by `root` and by its
/// opponent at this node. Positive values favour `root`. The result is in
/// tenths of a point (see [`EvalWeight`]) and clamped to
/// `±EvalWeight::MAX_EVAL`, so no score pair can reach the search sentinels.
#[must_use]
pub fn evaluate(board: &Board, root: Color, root_score: u32, opp_score: u32) -> i32 {
    let score_diff = (i64::from(root_score) - i64::from(opp_score)) * i64::from(EvalWeight::SCORE);

    let positional: i64 = board
        .iter_pieces()
        .map(|(pos, piece)| {
            let term = i64::from(piece_term(piece, pos));
            if piece.color == root {
                term
            } else {
                -term
            }
        })
        .sum();

    let bound = i64::from(EvalWeight::MAX_EVAL);
    (score_diff + positional).clamp(-bound, bound) as i32
}

/// Positional worth of one piece, before the perspective sign
#[inline]
pub fn piece_term(piece: Piece, pos: Pos) -> i32 {
    let promoted = if piece.promoted {
        piece.number as i32 * EvalWeight::PROMOTED_NUMBER
    } else {
        0
    };
    promoted + piece.advancement(pos.row) as i32 * EvalWeight::ADVANCEMENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position_is_balanced() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Color::White, 0, 0), 0);
        assert_eq!(evaluate(&board, Color::Black, 0, 0), 0);
    }

    #[test]
    fn test_score_difference_dominates_units() {
        let board = Board::empty();
        assert_eq!(evaluate(&board, Color::White, 7, 2), 50);
        assert_eq!(evaluate(&board, Color::Black, 2, 7), -50);
    }

    #[test]
    fn test_advancement() {
        let mut board = Board::empty();
        board.place(Pos::new(4, 0), Piece::new(Color::White, 2));
        // White on row 4 has travelled 3 rows
        assert_eq!(evaluate(&board, Color::White, 0, 0), 3);
        assert_eq!(evaluate(&board, Color::Black, 0, 0), -3);
    }

    #[test]
    fn test_promoted_piece_worth_half_its_number() {
        let mut board = Board::empty();
        board.place(Pos::new(7, 3), Piece::promoted(Color::Black, 6));
        // 6 * 5 for promotion plus 7 rows of advancement
        assert_eq!(evaluate(&board, Color::Black, 0, 0), 37);
    }

    #[test]
    fn test_extreme_scores_clamped() {
        let board = Board::new();
        let high = evaluate(&board, Color::White, u32::MAX, 0);
        let low = evaluate(&board, Color::White, 0, u32::MAX);
        assert_eq!(high, EvalWeight::MAX_EVAL);
        assert_eq!(low, -EvalWeight::MAX_EVAL);
        assert!(high < EvalWeight::INVALID_MOVE);
    }

    #[test]
    fn test_perspective_symmetry() {
        let mut board = Board::new();
        board.remove(Pos::new(6, 2));
        board.place(Pos::new(3, 3), Piece::new(Color::White, 3));
        board.place(Pos::new(0, 5), Piece::promoted(Color::White, 4));
        board.remove(Pos::new(1, 1));

        let white = evaluate(&board, Color::White, 9, 4);
        let black = evaluate(&board, Color::Black, 4, 9);
        assert_eq!(white, -black);
        assert!(white > 0);
    }
}
