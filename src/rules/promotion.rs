//! Promotion capture
//!
//! A piece that reaches its promotion row for the first time is promoted and
//! takes one opposing, unpromoted piece with the same number. When several
//! such pieces exist the capturing player could pick any of them; the
//! outcome reports every candidate and flags the choice.

use crate::board::{Board, Pos};

/// Result of the promotion pass for one move
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionOutcome {
    /// The moved piece was promoted by this move
    pub promoted: bool,
    /// Square whose piece is captured, if any
    pub captured: Option<Pos>,
    /// Points gained (the captured piece's number)
    pub points: u32,
    /// More than one capture target was available
    pub leads_to_choice: bool,
    /// Every capture target, row-major
    pub candidates: Vec<Pos>,
}

/// Opposing, unpromoted pieces sharing the number of the piece on `pos`, row-major
pub fn capture_candidates(board: &Board, pos: Pos) -> Vec<Pos> {
    let Some(piece) = board.get(pos) else {
        return Vec::new();
    };
    board
        .pieces(piece.color.opponent())
        .iter_ones()
        .filter(|&p| {
            board
                .get(p)
                .is_some_and(|other| other.number == piece.number && !other.promoted)
        })
        .collect()
}

/// Run the promotion pass for a piece that has just landed on `pos`.
///
/// `was_promoted` is the piece's status before the move. The board is
/// updated in place (promotion flag set, captured piece removed); callers
/// work on their own copy. `choice` selects among several candidates and is
/// ignored when it is not one of them, in which case the first candidate is
/// taken.
pub fn resolve_promotion(
    board: &mut Board,
    pos: Pos,
    was_promoted: bool,
    choice: Option<Pos>,
) -> PromotionOutcome {
    let Some(piece) = board.get(pos) else {
        return PromotionOutcome::default();
    };
    if was_promoted || pos.row != piece.color.promotion_row() {
        return PromotionOutcome::default();
    }

    board.promote(pos);
    let candidates = capture_candidates(board, pos);

    let target = match choice {
        Some(chosen) if candidates.contains(&chosen) => Some(chosen),
        _ => candidates.first().copied(),
    };

    let points = match target {
        Some(target) => board.remove(target).map_or(0, |p| u32::from(p.number)),
        None => 0,
    };

    PromotionOutcome {
        promoted: true,
        captured: target,
        points,
        leads_to_choice: candidates.len() > 1,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Piece};

    #[test]
    fn test_no_promotion_off_the_back_row() {
        let mut board = Board::empty();
        board.place(Pos::new(1, 3), Piece::new(Color::White, 4));
        board.place(Pos::new(5, 5), Piece::new(Color::Black, 4));

        let outcome = resolve_promotion(&mut board, Pos::new(1, 3), false, None);
        assert_eq!(outcome, PromotionOutcome::default());
        assert!(!board.get(Pos::new(1, 3)).unwrap().promoted);
    }

    #[test]
    fn test_promotion_without_match() {
        let mut board = Board::empty();
        board.place(Pos::new(0, 3), Piece::new(Color::White, 4));
        board.place(Pos::new(5, 5), Piece::new(Color::Black, 2));

        let outcome = resolve_promotion(&mut board, Pos::new(0, 3), false, None);
        assert!(outcome.promoted);
        assert_eq!(outcome.captured, None);
        assert_eq!(outcome.points, 0);
        assert!(!outcome.leads_to_choice);
        assert!(board.get(Pos::new(0, 3)).unwrap().promoted);
    }

    #[test]
    fn test_single_match_is_captured() {
        let mut board = Board::empty();
        board.place(Pos::new(7, 2), Piece::new(Color::Black, 6));
        board.place(Pos::new(3, 3), Piece::new(Color::White, 6));
        board.place(Pos::new(4, 4), Piece::new(Color::White, 5));

        let outcome = resolve_promotion(&mut board, Pos::new(7, 2), false, None);
        assert_eq!(outcome.captured, Some(Pos::new(3, 3)));
        assert_eq!(outcome.points, 6);
        assert!(!outcome.leads_to_choice);
        assert!(board.is_empty(Pos::new(3, 3)));
        assert!(board.get(Pos::new(4, 4)).is_some());
    }

    #[test]
    fn test_promoted_and_own_pieces_are_not_targets() {
        let mut board = Board::empty();
        board.place(Pos::new(0, 0), Piece::new(Color::White, 3));
        board.place(Pos::new(2, 2), Piece::promoted(Color::Black, 3));
        board.place(Pos::new(4, 4), Piece::new(Color::White, 3));

        let outcome = resolve_promotion(&mut board, Pos::new(0, 0), false, None);
        assert!(outcome.promoted);
        assert_eq!(outcome.captured, None);
        assert!(board.get(Pos::new(2, 2)).is_some());
    }

    #[test]
    fn test_multiple_matches_flag_choice_and_take_first() {
        let mut board = Board::empty();
        board.place(Pos::new(0, 5), Piece::new(Color::White, 2));
        board.place(Pos::new(6, 1), Piece::new(Color::Black, 2));
        board.place(Pos::new(3, 6), Piece::new(Color::Black, 2));

        let outcome = resolve_promotion(&mut board, Pos::new(0, 5), false, None);
        assert!(outcome.leads_to_choice);
        assert_eq!(outcome.candidates, vec![Pos::new(3, 6), Pos::new(6, 1)]);
        assert_eq!(outcome.captured, Some(Pos::new(3, 6)));
        assert_eq!(outcome.points, 2);
    }

    #[test]
    fn test_explicit_choice() {
        let mut board = Board::empty();
        board.place(Pos::new(0, 5), Piece::new(Color::White, 2));
        board.place(Pos::new(6, 1), Piece::new(Color::Black, 2));
        board.place(Pos::new(3, 6), Piece::new(Color::Black, 2));

        let outcome = resolve_promotion(&mut board, Pos::new(0, 5), false, Some(Pos::new(6, 1)));
        assert_eq!(outcome.captured, Some(Pos::new(6, 1)));
        assert!(board.get(Pos::new(3, 6)).is_some());
        assert!(board.is_empty(Pos::new(6, 1)));
    }

    #[test]
    fn test_already_promoted_piece_does_not_capture_again() {
        let mut board = Board::empty();
        board.place(Pos::new(0, 5), Piece::promoted(Color::White, 2));
        board.place(Pos::new(6, 1), Piece::new(Color::Black, 2));

        let outcome = resolve_promotion(&mut board, Pos::new(0, 5), true, None);
        assert!(!outcome.promoted);
        assert_eq!(outcome.captured, None);
        assert!(board.get(Pos::new(6, 1)).is_some());
    }
}
