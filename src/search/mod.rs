//! Search module for the Check10 engine
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Alpha-Beta search with iterative deepening

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{ChoicePolicy, SearchOptions, SearchResult, SearchStats, Searcher, MAX_DEPTH};
pub use tt::{EntryType, TTEntry, TTProbe, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
