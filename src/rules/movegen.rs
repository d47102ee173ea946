//! Move generation
//!
//! Pieces step one square forward or diagonally forward into an empty square.
//! Nothing is ever captured by landing on it; captures come from the
//! promotion and combination passes run after the step.

use crate::board::{Board, Color, Piece, Pos};

/// Column offsets tried for every piece: straight, left diagonal, right diagonal
const STEP_COLUMNS: [i32; 3] = [0, -1, 1];

/// A single step, tagged with the piece that makes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
    /// Moving piece as it was when the move was proposed
    pub piece: Piece,
}

impl Move {
    #[inline]
    pub fn new(from: Pos, to: Pos, piece: Piece) -> Self {
        Self { from, to, piece }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} -> {}",
            self.piece.color.name(),
            self.piece.number,
            self.from,
            self.to
        )
    }
}

/// Moves for the piece on `pos`. Empty if the square is empty.
pub fn moves_for(pos: Pos, board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(3);
    push_moves_for(pos, board, &mut moves);
    moves
}

fn push_moves_for(pos: Pos, board: &Board, out: &mut Vec<Move>) {
    let Some(piece) = board.get(pos) else {
        return;
    };
    let dir = piece.color.direction();
    for dc in STEP_COLUMNS {
        if let Some(to) = pos.offset(dir, dc) {
            if board.is_empty(to) {
                out.push(Move::new(pos, to, piece));
            }
        }
    }
}

/// All moves for `color`, piece by piece in row-major order
pub fn moves_for_color(color: Color, board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(32);
    for pos in board.pieces(color).iter_ones() {
        push_moves_for(pos, board, &mut moves);
    }
    moves
}

/// Whether `color` has at least one move. Stops at the first one found.
pub fn has_legal_moves(color: Color, board: &Board) -> bool {
    let dir = color.direction();
    board.pieces(color).iter_ones().any(|pos| {
        STEP_COLUMNS
            .iter()
            .any(|&dc| pos.offset(dir, dc).is_some_and(|to| board.is_empty(to)))
    })
}

/// Whether `mv` is one of the moves the generator would produce for its piece
pub fn is_legal_move(board: &Board, mv: &Move) -> bool {
    match board.get(mv.from) {
        Some(piece) if piece == mv.piece => moves_for(mv.from, board).iter().any(|m| m.to == mv.to),
        _ => false,
    }
}
