//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when a piece steps or
//! is captured. This is essential for efficient transposition table lookups
//! during search.
//!
//! Keys are indexed by piece identity `(color, number)` and square. The
//! promotion flag is not part of the key, so a promoted piece and its
//! unpromoted twin on the same square hash alike.
//!
//! # Example
//!
//! ```
//! use check10::board::{Board, Color, Pos};
//! use check10::search::ZobristTable;
//!
//! let zt = ZobristTable::global();
//! let mut board = Board::new();
//!
//! let before = zt.hash(&board, Color::White);
//!
//! let from = Pos::new(6, 3);
//! let to = Pos::new(5, 3);
//! let piece = board.remove(from).unwrap();
//! board.place(to, piece);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zt.update_step(before, piece, from, to), zt.hash(&board, Color::Black));
//! ```

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Color, Piece, Pos, MAX_NUMBER, TOTAL_CELLS};

/// One key row per `(color, number)` pair
const PIECE_KINDS: usize = 2 * MAX_NUMBER as usize;

/// Fixed seed so hashes are reproducible across runs
const ZOBRIST_SEED: u64 = 0x1234_5678_9ABC_DEF0;

static GLOBAL: OnceLock<ZobristTable> = OnceLock::new();

/// Zobrist hash table for position hashing.
///
/// Uses XOR-based hashing with precomputed random values for each
/// (piece kind, square) combination plus one side-to-move key.
pub struct ZobristTable {
    pieces: [[u64; TOTAL_CELLS]; PIECE_KINDS],
    /// XORed in when Black is to move
    black_to_move: u64,
}

impl ZobristTable {
    /// Create a table from the crate's fixed seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(ZOBRIST_SEED)
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut pieces = [[0u64; TOTAL_CELLS]; PIECE_KINDS];
        for kind in pieces.iter_mut() {
            for key in kind.iter_mut() {
                *key = rng.random::<u64>();
            }
        }

        Self {
            pieces,
            black_to_move: rng.random::<u64>(),
        }
    }

    /// Process-wide table built from the fixed seed on first use
    pub fn global() -> &'static ZobristTable {
        GLOBAL.get_or_init(ZobristTable::new)
    }

    #[inline]
    fn key(&self, piece: Piece, pos: Pos) -> u64 {
        let kind = piece.color.index() * MAX_NUMBER as usize + piece.number as usize - 1;
        self.pieces[kind][pos.to_index()]
    }

    /// Compute the full hash for a board position.
    ///
    /// This iterates over every piece. During search use `update_step` and
    /// `update_capture` instead.
    #[must_use]
    pub fn hash(&self, board: &Board, side_to_move: Color) -> u64 {
        let mut h = board
            .iter_pieces()
            .fold(0u64, |h, (pos, piece)| h ^ self.key(piece, pos));

        if side_to_move == Color::Black {
            h ^= self.black_to_move;
        }

        h
    }

    /// Incrementally update hash after `piece` steps from `from` to `to`.
    ///
    /// Note: This also toggles the side-to-move component.
    #[inline]
    #[must_use]
    pub fn update_step(&self, hash: u64, piece: Piece, from: Pos, to: Pos) -> u64 {
        self.toggle_side(hash ^ self.key(piece, from) ^ self.key(piece, to))
    }

    /// Update hash for a captured piece (removed without toggling side).
    #[inline]
    #[must_use]
    pub fn update_capture(&self, hash: u64, piece: Piece, pos: Pos) -> u64 {
        hash ^ self.key(piece, pos)
    }

    /// Toggle the side-to-move component of the hash.
    #[inline]
    #[must_use]
    pub fn toggle_side(&self, hash: u64) -> u64 {
        hash ^ self.black_to_move
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
