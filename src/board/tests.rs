use super::*;

#[test]
fn test_color_opponent() {
    assert_eq!(Color::Black.opponent(), Color::White);
    assert_eq!(Color::White.opponent(), Color::Black);
}

#[test]
fn test_color_direction_and_promotion_row() {
    assert_eq!(Color::White.direction(), -1);
    assert_eq!(Color::Black.direction(), 1);
    assert_eq!(Color::White.promotion_row(), 0);
    assert_eq!(Color::Black.promotion_row(), 7);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(3, 5);
    assert_eq!(pos.to_index(), 29);

    let pos2 = Pos::from_index(29);
    assert_eq!(pos2, pos);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(7, 7));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(8, 0));
    assert!(!Pos::is_valid(0, 8));
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 8);
    assert_eq!(TOTAL_CELLS, 64);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
}

#[test]
fn test_pos_offset_clips() {
    assert_eq!(Pos::new(0, 0).offset(-1, 0), None);
    assert_eq!(Pos::new(0, 0).offset(1, 1), Some(Pos::new(1, 1)));
    assert_eq!(Pos::new(7, 7).offset(0, 1), None);
}

#[test]
fn test_initial_layout() {
    let board = Board::new();
    assert_eq!(board.piece_count(), 32);
    assert_eq!(board.pieces(Color::White).count(), 16);
    assert_eq!(board.pieces(Color::Black).count(), 16);

    assert_eq!(board.get(Pos::new(0, 0)), Some(Piece::new(Color::Black, 8)));
    assert_eq!(board.get(Pos::new(0, 7)), Some(Piece::new(Color::Black, 1)));
    assert_eq!(board.get(Pos::new(1, 0)), Some(Piece::new(Color::Black, 1)));
    assert_eq!(board.get(Pos::new(7, 0)), Some(Piece::new(Color::White, 8)));
    assert_eq!(board.get(Pos::new(6, 7)), Some(Piece::new(Color::White, 8)));

    for row in 2..6 {
        for col in 0..8 {
            assert!(board.is_empty(Pos::new(row, col)));
        }
    }
}

#[test]
fn test_initial_layout_two_of_each_number() {
    let board = Board::new();
    for color in [Color::White, Color::Black] {
        for number in 1..=MAX_NUMBER {
            let count = board
                .iter_pieces()
                .filter(|(_, p)| p.color == color && p.number == number)
                .count();
            assert_eq!(count, 2, "{:?} {}", color, number);
        }
    }
}

#[test]
fn test_place_remove_keeps_bitboards_in_sync() {
    let mut board = Board::empty();
    let pos = Pos::new(4, 4);

    board.place(pos, Piece::new(Color::White, 3));
    assert!(board.pieces(Color::White).get(pos));

    // Replacing flips the occupancy to the new color
    board.place(pos, Piece::new(Color::Black, 3));
    assert!(!board.pieces(Color::White).get(pos));
    assert!(board.pieces(Color::Black).get(pos));

    assert_eq!(board.remove(pos), Some(Piece::new(Color::Black, 3)));
    assert_eq!(board.piece_count(), 0);
    assert_eq!(board.remove(pos), None);
}

#[test]
fn test_promote() {
    let mut board = Board::empty();
    let pos = Pos::new(0, 2);
    board.place(pos, Piece::new(Color::White, 6));
    assert!(board.promote(pos));
    assert_eq!(board.get(pos), Some(Piece::promoted(Color::White, 6)));
    assert!(!board.promote(Pos::new(5, 5)));
}

#[test]
fn test_window_clipped_at_corner() {
    let window = Bitboard::window(Pos::new(0, 0), 3);
    assert_eq!(window.count(), 16);
    let window = Bitboard::window(Pos::new(4, 4), 3);
    assert_eq!(window.count(), 49);
}

#[test]
fn test_rows_round_trip() {
    let board = Board::new();
    let rows = board.to_rows();
    assert_eq!(rows.len(), 8);
    let back = Board::try_from(rows).unwrap();
    assert_eq!(back, board);
}

#[test]
fn test_rows_rejects_bad_shape() {
    let rows: board::BoardRows = vec![vec![None; 8]; 7];
    assert!(Board::try_from(rows).is_err());

    let mut rows: board::BoardRows = vec![vec![None; 8]; 8];
    rows[3][3] = Some(Piece {
        color: Color::White,
        number: 9,
        promoted: false,
    });
    assert!(Board::try_from(rows).is_err());
}

#[test]
fn test_advancement() {
    assert_eq!(Piece::new(Color::White, 1).advancement(7), 0);
    assert_eq!(Piece::new(Color::White, 1).advancement(0), 7);
    assert_eq!(Piece::new(Color::Black, 1).advancement(0), 0);
    assert_eq!(Piece::new(Color::Black, 1).advancement(5), 5);
}
