//! Board structure with per-color occupancy

use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::{Color, Piece, Pos, BOARD_SIZE, MAX_NUMBER, TOTAL_CELLS};
use crate::error::EngineError;

/// Row-major grid of optional pieces, as carried over the wire
pub type BoardRows = Vec<Vec<Option<Piece>>>;

/// Game board.
///
/// The grid is the source of truth; the two bitboards mirror it so window
/// and color queries do not have to touch all 64 squares. `Board` is `Copy`,
/// so every simulated move works on its own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRows", into = "BoardRows")]
pub struct Board {
    cells: [Option<Piece>; TOTAL_CELLS],
    /// White pieces bitboard
    white: Bitboard,
    /// Black pieces bitboard
    black: Bitboard,
}

impl Board {
    /// Empty board
    pub fn empty() -> Self {
        Self {
            cells: [None; TOTAL_CELLS],
            white: Bitboard::new(),
            black: Bitboard::new(),
        }
    }

    /// Starting layout.
    ///
    /// Black fills rows 0-1 (8..1 then 1..8 across the columns), White
    /// mirrors it on rows 7-6, so each side has two pieces of every number.
    pub fn new() -> Self {
        let mut board = Self::empty();
        let last = (BOARD_SIZE - 1) as u8;
        for col in 0..BOARD_SIZE as u8 {
            let descending = MAX_NUMBER - col;
            let ascending = col + 1;
            board.place(Pos::new(0, col), Piece::new(Color::Black, descending));
            board.place(Pos::new(1, col), Piece::new(Color::Black, ascending));
            board.place(Pos::new(last, col), Piece::new(Color::White, descending));
            board.place(Pos::new(last - 1, col), Piece::new(Color::White, ascending));
        }
        board
    }

    /// Get piece at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.cells[pos.to_index()]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cells[pos.to_index()].is_none()
    }

    /// Put a piece on a square, replacing whatever was there
    #[inline]
    pub fn place(&mut self, pos: Pos, piece: Piece) {
        self.remove(pos);
        self.cells[pos.to_index()] = Some(piece);
        self.pieces_mut(piece.color).set(pos);
    }

    /// Remove and return the piece on a square
    #[inline]
    pub fn remove(&mut self, pos: Pos) -> Option<Piece> {
        let taken = self.cells[pos.to_index()].take();
        if let Some(piece) = taken {
            self.pieces_mut(piece.color).clear(pos);
        }
        taken
    }

    /// Mark the piece on `pos` as promoted. Returns false for an empty square.
    #[inline]
    pub fn promote(&mut self, pos: Pos) -> bool {
        match self.cells[pos.to_index()].as_mut() {
            Some(piece) => {
                piece.promoted = true;
                true
            }
            None => false,
        }
    }

    /// Occupancy of one color
    #[inline]
    pub fn pieces(&self, color: Color) -> Bitboard {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline]
    fn pieces_mut(&mut self, color: Color) -> &mut Bitboard {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// All occupied squares
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.white | self.black
    }

    /// Occupied squares with their pieces, row-major
    pub fn iter_pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.occupied()
            .iter_ones()
            .filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    /// Total pieces on board
    #[inline]
    pub fn piece_count(&self) -> u32 {
        self.occupied().count()
    }

    /// Rows as nested vectors (wire layout)
    pub fn to_rows(&self) -> BoardRows {
        (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| self.cells[row * BOARD_SIZE + col])
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<BoardRows> for Board {
    type Error = EngineError;

    fn try_from(rows: BoardRows) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE {
            return Err(EngineError::InvalidBoard(format!(
                "expected {} rows, got {}",
                BOARD_SIZE,
                rows.len()
            )));
        }
        let mut board = Board::empty();
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != BOARD_SIZE {
                return Err(EngineError::InvalidBoard(format!(
                    "row {} has {} squares, expected {}",
                    row,
                    cells.len(),
                    BOARD_SIZE
                )));
            }
            for (col, cell) in cells.into_iter().enumerate() {
                if let Some(piece) = cell {
                    if !(1..=MAX_NUMBER).contains(&piece.number) {
                        return Err(EngineError::InvalidBoard(format!(
                            "piece at ({}, {}) has number {}, expected 1-{}",
                            row, col, piece.number, MAX_NUMBER
                        )));
                    }
                    board.place(Pos::new(row as u8, col as u8), piece);
                }
            }
        }
        Ok(board)
    }
}

impl From<Board> for BoardRows {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl std::fmt::Display for Board {
    /// Text diagram: `W5` / `b3` (lowercase = unpromoted), `.` for empty
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{:>2} ", row)?;
            for col in 0..BOARD_SIZE {
                match self.cells[row * BOARD_SIZE + col] {
                    Some(piece) => {
                        let tag = match (piece.color, piece.promoted) {
                            (Color::White, true) => 'W',
                            (Color::White, false) => 'w',
                            (Color::Black, true) => 'B',
                            (Color::Black, false) => 'b',
                        };
                        write!(f, " {}{}", tag, piece.number)?;
                    }
                    None => write!(f, "  .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
