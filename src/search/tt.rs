//! Transposition Table for caching search results
//!
//! The transposition table stores search results indexed by board hash,
//! enabling reuse of previous search results for positions we've seen before.
//! One table lives for one top-level search and is dropped with it.
//!
//! # Example
//!
//! ```
//! use check10::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 5, 100, EntryType::Exact, None);
//!
//! let probe = tt.probe(hash, 5, -1000, 1000).unwrap();
//! assert_eq!(probe.value, Some(100));
//! ```

use crate::rules::Move;

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Classify `value` against the window the node was searched with
    #[inline]
    pub fn from_window(value: i32, alpha: i32, beta: i32) -> Self {
        if value <= alpha {
            EntryType::UpperBound
        } else if value >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    /// Zobrist hash of the position
    pub hash: u64,
    /// Remaining depth the entry was searched to
    pub depth: i8,
    /// Value from the root player's perspective
    pub score: i32,
    pub entry_type: EntryType,
    /// Best move found for this position
    pub best_move: Option<Move>,
}

/// What a probe tells the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTProbe {
    /// Set when the node can return without searching
    pub value: Option<i32>,
    /// Window after applying the stored bound
    pub alpha: i32,
    pub beta: i32,
    /// Stored best move, usable for ordering even when the score is not
    pub best_move: Option<Move>,
}

/// Transposition table for caching search results.
///
/// Uses a simple direct-mapped approach where each hash maps to exactly
/// one slot. Collisions are handled by a depth-preferred replacement policy.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = (size_mb * 1024 * 1024) / entry_size;

        // Ensure at least some entries
        let size = size.max(1024);

        Self {
            entries: vec![None; size],
            size,
        }
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        (hash as usize) % self.size
    }

    /// Probe the table for a position searched to `depth` with window `(alpha, beta)`.
    ///
    /// Returns `None` on a miss. On a hit whose depth is at least `depth`:
    /// an `Exact` entry yields its value; a `LowerBound` raises alpha and an
    /// `UpperBound` lowers beta, yielding the value when the window closes.
    /// Shallower hits only contribute their best move.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: i8, alpha: i32, beta: i32) -> Option<TTProbe> {
        let entry = self.entries[self.slot(hash)]?;
        if entry.hash != hash {
            return None;
        }

        let mut probe = TTProbe {
            value: None,
            alpha,
            beta,
            best_move: entry.best_move,
        };

        if entry.depth >= depth {
            match entry.entry_type {
                EntryType::Exact => probe.value = Some(entry.score),
                EntryType::LowerBound => probe.alpha = probe.alpha.max(entry.score),
                EntryType::UpperBound => probe.beta = probe.beta.min(entry.score),
            }
            if probe.value.is_none() && probe.alpha >= probe.beta {
                probe.value = Some(entry.score);
            }
        }

        Some(probe)
    }

    /// Store a position in the table.
    ///
    /// Uses a depth-preferred replacement policy: an entry is replaced if
    /// the slot is empty, contains the same position, or the new search
    /// is at least as deep as the existing entry.
    pub fn store(
        &mut self,
        hash: u64,
        depth: i8,
        score: i32,
        entry_type: EntryType,
        best_move: Option<Move>,
    ) {
        let idx = self.slot(hash);

        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                entry_type,
                best_move,
            });
        }
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Piece, Pos};

    const HASH: u64 = 0x1234_5678_9ABC_DEF0;

    fn sample_move() -> Move {
        Move::new(Pos::new(6, 3), Pos::new(5, 3), Piece::new(Color::White, 4))
    }

    #[test]
    fn test_tt_store_probe_exact() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 100, EntryType::Exact, Some(sample_move()));

        let probe = tt.probe(HASH, 5, -1000, 1000).unwrap();
        assert_eq!(probe.value, Some(100));
        assert_eq!(probe.best_move, Some(sample_move()));
    }

    #[test]
    fn test_tt_depth_requirement() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 3, 100, EntryType::Exact, Some(sample_move()));

        // Deeper search should not use shallow entry's score
        let probe = tt.probe(HASH, 5, -1000, 1000).unwrap();
        assert_eq!(probe.value, None);
        assert_eq!((probe.alpha, probe.beta), (-1000, 1000));
        assert_eq!(probe.best_move, Some(sample_move()));
    }

    #[test]
    fn test_tt_lower_bound_raises_alpha() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 200, EntryType::LowerBound, None);

        let probe = tt.probe(HASH, 5, -1000, 300).unwrap();
        assert_eq!(probe.value, None);
        assert_eq!(probe.alpha, 200);
        assert_eq!(probe.beta, 300);

        // Window closes: 200 >= beta 150
        let probe = tt.probe(HASH, 5, -1000, 150).unwrap();
        assert_eq!(probe.value, Some(200));
    }

    #[test]
    fn test_tt_upper_bound_lowers_beta() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 50, EntryType::UpperBound, None);

        let probe = tt.probe(HASH, 5, 30, 1000).unwrap();
        assert_eq!(probe.value, None);
        assert_eq!(probe.alpha, 30);
        assert_eq!(probe.beta, 50);

        let probe = tt.probe(HASH, 5, 100, 1000).unwrap();
        assert_eq!(probe.value, Some(50));
    }

    #[test]
    fn test_tt_hash_mismatch() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 100, EntryType::Exact, None);

        // Same slot, different hash
        let other = HASH + tt.size as u64;
        assert!(tt.probe(other, 5, -1000, 1000).is_none());
    }

    #[test]
    fn test_tt_replacement_policy() {
        let mut tt = TranspositionTable::new(1);
        let colliding = HASH + tt.size as u64;

        tt.store(HASH, 5, 100, EntryType::Exact, None);
        // Shallower entry for a different position does not evict
        tt.store(colliding, 3, 200, EntryType::Exact, None);
        assert_eq!(tt.probe(HASH, 5, -1000, 1000).unwrap().value, Some(100));

        // Deeper one does
        tt.store(colliding, 6, 300, EntryType::Exact, None);
        assert!(tt.probe(HASH, 5, -1000, 1000).is_none());
        assert_eq!(tt.probe(colliding, 6, -1000, 1000).unwrap().value, Some(300));
    }

    #[test]
    fn test_tt_same_position_always_replaced() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 100, EntryType::Exact, None);
        tt.store(HASH, 3, 200, EntryType::Exact, None);

        assert_eq!(tt.probe(HASH, 5, -1000, 1000).unwrap().value, None);
        assert_eq!(tt.probe(HASH, 3, -1000, 1000).unwrap().value, Some(200));
    }

    #[test]
    fn test_entry_type_from_window() {
        assert_eq!(EntryType::from_window(-5, -5, 10), EntryType::UpperBound);
        assert_eq!(EntryType::from_window(10, -5, 10), EntryType::LowerBound);
        assert_eq!(EntryType::from_window(3, -5, 10), EntryType::Exact);
    }

    #[test]
    fn test_tt_stats() {
        let mut tt = TranspositionTable::new(1);
        assert_eq!(tt.stats().used, 0);

        tt.store(HASH, 5, 100, EntryType::Exact, None);
        tt.store(HASH ^ 1, 5, 100, EntryType::Exact, None);
        assert_eq!(tt.stats().used, 2);
        assert_eq!(tt.stats().usage_percent, 0);
    }

    #[test]
    fn test_tt_minimum_size() {
        let tt = TranspositionTable::new(0);
        assert_eq!(tt.stats().size, 1024);
    }
}
