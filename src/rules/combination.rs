//! Sum-to-10 combination capture
//!
//! After every move the 7x7 window around the destination is searched for
//! groups of pieces whose numbers add up to exactly 10, that mix both colors
//! and that form one 8-connected cluster. Every such group captures its
//! members of the color that did not move.
//!
//! The window radius and the group size cap bound the enumeration, which is
//! otherwise exponential in the number of pieces near the move.

use crate::board::{Bitboard, Board, Color, Piece, Pos};

/// Chebyshev radius of the window centred on the destination
pub const WINDOW_RADIUS: u8 = 3;

/// Group size bounds
pub const MIN_COMBINATION_SIZE: usize = 2;
pub const MAX_COMBINATION_SIZE: usize = 8;

/// Sum a group must reach
pub const TARGET_SUM: u32 = 10;

/// Captures produced by the combination pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinationCaptures {
    /// Captured squares with their pieces, row-major, no duplicates
    pub captured: Vec<(Pos, Piece)>,
    /// Sum of captured numbers
    pub points: u32,
    /// Number of accepted groups (overlapping groups each count)
    pub combinations: usize,
}

/// Run the combination pass for a move by `mover` that landed on `center`.
///
/// The board is only read; removing the captured pieces is up to the caller.
pub fn find_combination_captures(board: &Board, center: Pos, mover: Color) -> CombinationCaptures {
    let Some(members) = window_members(board, center) else {
        return CombinationCaptures::default();
    };

    let mut captured = Bitboard::new();
    let mut combinations = 0usize;
    walk_combinations(&members, |chosen| {
        combinations += 1;
        for &i in chosen {
            let (pos, piece) = members[i];
            if piece.color != mover {
                captured.set(pos);
            }
        }
    });

    let captured: Vec<(Pos, Piece)> = members
        .iter()
        .filter(|(pos, _)| captured.get(*pos))
        .copied()
        .collect();
    let points = captured.iter().map(|(_, p)| u32::from(p.number)).sum();

    CombinationCaptures {
        captured,
        points,
        combinations,
    }
}

/// Occupied squares of the window, or `None` when it cannot hold a mixed group
fn window_members(board: &Board, center: Pos) -> Option<Vec<(Pos, Piece)>> {
    let window = Bitboard::window(center, WINDOW_RADIUS);
    let has_white = window.intersects(board.pieces(Color::White));
    let has_black = window.intersects(board.pieces(Color::Black));
    if !(has_white && has_black) {
        return None;
    }
    Some(
        (window & board.occupied())
            .iter_ones()
            .filter_map(|pos| board.get(pos).map(|piece| (pos, piece)))
            .collect(),
    )
}

/// Depth-first walk over subsets of `members` (by index, increasing).
///
/// A branch is abandoned as soon as its sum passes the target or it reaches
/// the size cap; numbers are at least 1, so no completion of such a branch
/// could be accepted. `accept` is called once per valid group.
fn walk_combinations<F: FnMut(&[usize])>(members: &[(Pos, Piece)], mut accept: F) {
    let mut chosen = Vec::with_capacity(MAX_COMBINATION_SIZE);
    walk_from(members, 0, 0, &mut chosen, &mut accept);
}

fn walk_from<F: FnMut(&[usize])>(
    members: &[(Pos, Piece)],
    start: usize,
    sum: u32,
    chosen: &mut Vec<usize>,
    accept: &mut F,
) {
    for i in start..members.len() {
        let next_sum = sum + u32::from(members[i].1.number);
        if next_sum > TARGET_SUM {
            continue;
        }
        chosen.push(i);
        if next_sum == TARGET_SUM {
            if chosen.len() >= MIN_COMBINATION_SIZE
                && has_both_colors(members, chosen)
                && is_connected(members, chosen)
            {
                accept(chosen);
            }
        } else if chosen.len() < MAX_COMBINATION_SIZE {
            walk_from(members, i + 1, next_sum, chosen, accept);
        }
        chosen.pop();
    }
}

fn has_both_colors(members: &[(Pos, Piece)], chosen: &[usize]) -> bool {
    let first = members[chosen[0]].1.color;
    chosen.iter().any(|&i| members[i].1.color != first)
}

/// Breadth-first reachability under 8-directional adjacency
fn is_connected(members: &[(Pos, Piece)], chosen: &[usize]) -> bool {
    let mut reached = [false; MAX_COMBINATION_SIZE];
    let mut queue = [0usize; MAX_COMBINATION_SIZE];
    let (mut head, mut tail) = (0, 1);
    reached[0] = true;

    while head < tail {
        let current = members[chosen[queue[head]]].0;
        head += 1;
        for (k, &idx) in chosen.iter().enumerate() {
            if !reached[k] && current.is_adjacent(members[idx].0) {
                reached[k] = true;
                queue[tail] = k;
                tail += 1;
            }
        }
    }

    tail == chosen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every accepted group around `center`, as row-major position lists
    fn find_combinations(board: &Board, center: Pos) -> Vec<Vec<Pos>> {
        let mut found = Vec::new();
        if let Some(members) = window_members(board, center) {
            walk_combinations(&members, |chosen| {
                found.push(chosen.iter().map(|&i| members[i].0).collect());
            });
        }
        found
    }

    fn place(board: &mut Board, row: u8, col: u8, color: Color, number: u8) {
        board.place(Pos::new(row, col), Piece::new(color, number));
    }

    #[test]
    fn test_three_piece_cluster_captures_opponent_only() {
        let mut board = Board::empty();
        place(&mut board, 4, 3, Color::White, 3);
        place(&mut board, 4, 4, Color::White, 3);
        place(&mut board, 3, 4, Color::Black, 4);

        let result = find_combination_captures(&board, Pos::new(4, 4), Color::White);
        assert_eq!(result.combinations, 1);
        assert_eq!(result.captured, vec![(Pos::new(3, 4), Piece::new(Color::Black, 4))]);
        assert_eq!(result.points, 4);
    }

    #[test]
    fn test_result_independent_of_layout_order() {
        // Same cluster mirrored so the Black piece comes last in row-major order
        let mut board = Board::empty();
        place(&mut board, 3, 3, Color::White, 3);
        place(&mut board, 3, 4, Color::White, 3);
        place(&mut board, 4, 4, Color::Black, 4);

        let result = find_combination_captures(&board, Pos::new(3, 3), Color::White);
        assert_eq!(result.captured, vec![(Pos::new(4, 4), Piece::new(Color::Black, 4))]);
        assert_eq!(result.points, 4);
    }

    #[test]
    fn test_black_mover_captures_white_members() {
        let mut board = Board::empty();
        place(&mut board, 4, 3, Color::White, 3);
        place(&mut board, 4, 4, Color::White, 3);
        place(&mut board, 3, 4, Color::Black, 4);

        let result = find_combination_captures(&board, Pos::new(3, 4), Color::Black);
        assert_eq!(result.points, 6);
        assert_eq!(result.captured.len(), 2);
    }

    #[test]
    fn test_single_color_window_is_skipped() {
        let mut board = Board::empty();
        place(&mut board, 4, 3, Color::White, 3);
        place(&mut board, 4, 4, Color::White, 7);

        let result = find_combination_captures(&board, Pos::new(4, 4), Color::White);
        assert!(result.captured.is_empty());
        assert_eq!(result.combinations, 0);
    }

    #[test]
    fn test_disconnected_group_rejected() {
        let mut board = Board::empty();
        place(&mut board, 4, 2, Color::White, 6);
        place(&mut board, 4, 4, Color::Black, 4);

        let result = find_combination_captures(&board, Pos::new(4, 4), Color::White);
        assert!(result.captured.is_empty());
    }

    #[test]
    fn test_connected_through_third_piece() {
        // 5 and 4 only touch through the 1 between them
        let mut board = Board::empty();
        place(&mut board, 4, 2, Color::White, 5);
        place(&mut board, 4, 3, Color::White, 1);
        place(&mut board, 4, 4, Color::Black, 4);

        let groups = find_combinations(&board, Pos::new(4, 4));
        assert_eq!(groups, vec![vec![Pos::new(4, 2), Pos::new(4, 3), Pos::new(4, 4)]]);
    }

    #[test]
    fn test_sum_must_be_exact() {
        let mut board = Board::empty();
        place(&mut board, 4, 3, Color::White, 3);
        place(&mut board, 4, 4, Color::Black, 5);

        let result = find_combination_captures(&board, Pos::new(4, 4), Color::White);
        assert!(result.captured.is_empty());
    }

    #[test]
    fn test_window_limits_reach() {
        // Pieces at distance 4 from the destination are invisible to the pass
        let mut board = Board::empty();
        place(&mut board, 7, 7, Color::White, 5);
        place(&mut board, 7, 6, Color::Black, 5);
        place(&mut board, 3, 3, Color::White, 1);

        let far = find_combination_captures(&board, Pos::new(3, 3), Color::White);
        assert!(far.captured.is_empty());

        let near = find_combination_captures(&board, Pos::new(7, 7), Color::White);
        assert_eq!(near.points, 5);
    }

    #[test]
    fn test_overlapping_groups_capture_once() {
        // Black 4 is part of two groups: {W6, B4} and {W3, W3, B4}
        let mut board = Board::empty();
        place(&mut board, 3, 3, Color::Black, 4);
        place(&mut board, 3, 2, Color::White, 6);
        place(&mut board, 4, 3, Color::White, 3);
        place(&mut board, 4, 4, Color::White, 3);

        let result = find_combination_captures(&board, Pos::new(4, 4), Color::White);
        assert!(result.combinations >= 2);
        assert_eq!(result.captured.len(), 1);
        assert_eq!(result.points, 4);
    }

    #[test]
    fn test_size_cap_excludes_nine_piece_groups() {
        // Eight 1s and a 2: the only group reaching 10 has nine members
        let mut board = Board::empty();
        for col in 0..7 {
            place(&mut board, 4, col, Color::White, 1);
        }
        place(&mut board, 5, 0, Color::White, 1);
        place(&mut board, 5, 1, Color::Black, 2);

        let groups = find_combinations(&board, Pos::new(4, 3));
        assert!(groups.iter().all(|g| g.len() <= MAX_COMBINATION_SIZE));
        assert!(groups.is_empty());
    }
}
