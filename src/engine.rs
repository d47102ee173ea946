//! Main engine facade
//!
//! [`Engine`] turns a [`GameState`] snapshot into a single best move under a
//! wall-clock budget. It checks the cheap cases first:
//!
//! 1. **No move**: the game is over or the side to move is stuck
//! 2. **Forced**: exactly one legal move, returned without searching
//! 3. **Iterative deepening**: alpha-beta with a fresh transposition table
//! 4. **Fallback**: a random legal move, drawn before the search starts and
//!    returned if not even depth 1 finishes in time
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use check10::{Engine, EngineConfig, GameState};
//!
//! let engine = Engine::new(EngineConfig::default().with_seed(1));
//! let state = GameState::new();
//!
//! let result = engine.find_best_move_with_budget(&state, Duration::from_millis(50));
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::board::Pos;
use crate::config::EngineConfig;
use crate::game::GameState;
use crate::rules::{simulate, Move};
use crate::search::{SearchResult, SearchStats, Searcher};

/// Which path produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchType {
    /// Game over or no legal moves
    NoMove,
    /// Only one legal move existed
    Forced,
    /// Depth 1 did not complete; random legal move
    Fallback,
    /// Result of the deepest completed alpha-beta pass
    IterativeDeepening,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Move>,
    /// Promotion target when the move has several
    pub capture_choice: Option<Pos>,
    /// Value of the move in tenths of a point for the side to move
    pub score: i32,
    /// Deepest completed depth (0 when no search ran)
    pub depth: i8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
    pub search_type: SearchType,
    pub stats: SearchStats,
}

impl MoveResult {
    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            capture_choice: None,
            score: 0,
            depth: 0,
            nodes: 0,
            time_ms,
            search_type: SearchType::NoMove,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    fn forced(mv: Move, capture_choice: Option<Pos>, time_ms: u64) -> Self {
        Self {
            best_move: Some(mv),
            capture_choice,
            search_type: SearchType::Forced,
            ..Self::no_move(time_ms)
        }
    }

    #[inline]
    fn fallback(mv: Move, capture_choice: Option<Pos>, time_ms: u64) -> Self {
        Self {
            best_move: Some(mv),
            capture_choice,
            search_type: SearchType::Fallback,
            ..Self::no_move(time_ms)
        }
    }

    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            capture_choice: result.capture_choice,
            score: result.score,
            depth: result.depth,
            nodes: result.nodes,
            time_ms,
            search_type: SearchType::IterativeDeepening,
            stats: result.stats,
        }
    }
}

/// Main engine for Check10.
///
/// Stateless between calls: every search builds and drops its own
/// transposition table, so one engine can serve any sequence of positions.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Best move for the side to move within the configured time budget.
    #[must_use]
    pub fn find_best_move(&self, state: &GameState) -> MoveResult {
        self.find_best_move_with_budget(state, self.config.time_budget())
    }

    /// Best move for the side to move within `budget`.
    ///
    /// The snapshot is never modified. When several promotion targets exist
    /// for the returned move, `capture_choice` names the one the engine
    /// assumed.
    #[must_use]
    pub fn find_best_move_with_budget(&self, state: &GameState, budget: Duration) -> MoveResult {
        let start = Instant::now();
        let elapsed_ms = || start.elapsed().as_millis() as u64;

        let moves = state.legal_moves();
        if moves.is_empty() {
            info!(player = state.current_player.name(), "No legal move");
            return MoveResult::no_move(elapsed_ms());
        }

        if let [only] = moves.as_slice() {
            let choice = default_choice(state, only);
            info!(player = state.current_player.name(), mv = %only, "Forced move");
            return MoveResult::forced(*only, choice, elapsed_ms());
        }

        let fallback = self.pick_fallback(&moves);
        trace!(mv = %fallback, "Fallback move drawn");

        let mut searcher = Searcher::new(self.config.search_options());
        let result = match searcher.search_until(state, start + budget) {
            Some(result) => MoveResult::from_search(result, elapsed_ms()),
            None => MoveResult::fallback(fallback, default_choice(state, &fallback), elapsed_ms()),
        };

        info!(
            player = state.current_player.name(),
            mv = ?result.best_move.map(|m| m.to_string()),
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            time_ms = result.time_ms,
            tt_hit_rate = result.stats.tt_score_rate(),
            search_type = ?result.search_type,
            "Search finished"
        );

        result
    }

    fn pick_fallback(&self, moves: &[Move]) -> Move {
        let idx = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed).random_range(0..moves.len()),
            None => rand::rng().random_range(0..moves.len()),
        };
        moves[idx]
    }
}

/// Promotion target the simulator takes by default, if the move has a choice
fn default_choice(state: &GameState, mv: &Move) -> Option<Pos> {
    let t = simulate(&state.board, mv, state.current_player).ok()?;
    if t.leads_to_choice {
        t.captured.first().map(|&(pos, _)| pos)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Color, Piece};
    use crate::rules::is_legal_move;

    fn engine() -> Engine {
        Engine::new(EngineConfig::default().with_tt_size_mb(1).with_seed(42))
    }

    #[test]
    fn test_engine_default_config() {
        let engine = Engine::default();
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn test_game_over_gives_no_move() {
        let mut state = GameState::new();
        state.game_over = true;

        let result = engine().find_best_move(&state);
        assert_eq!(result.search_type, SearchType::NoMove);
        assert!(result.best_move.is_none());
    }

    #[test]
    fn test_stuck_side_gives_no_move() {
        let mut board = Board::empty();
        board.place(Pos::new(0, 4), Piece::promoted(Color::White, 3));
        board.place(Pos::new(3, 3), Piece::new(Color::Black, 3));
        let mut state = GameState::from_position(board, Color::White);
        // Snapshot claims the game is still running
        state.game_over = false;

        let result = engine().find_best_move(&state);
        assert_eq!(result.search_type, SearchType::NoMove);
    }

    #[test]
    fn test_single_move_is_forced() {
        let mut board = Board::empty();
        let white = Piece::new(Color::White, 5);
        board.place(Pos::new(1, 0), white);
        board.place(Pos::new(0, 0), Piece::new(Color::Black, 5));
        let state = GameState::from_position(board, Color::White);

        let result = engine().find_best_move(&state);
        assert_eq!(result.search_type, SearchType::Forced);
        assert_eq!(
            result.best_move,
            Some(Move::new(Pos::new(1, 0), Pos::new(0, 1), white))
        );
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_fifty_ms_budget_returns_legal_move() {
        let state = GameState::new();
        let result = engine().find_best_move_with_budget(&state, Duration::from_millis(50));

        assert_eq!(result.search_type, SearchType::IterativeDeepening);
        assert!(result.depth >= 1);
        assert!(is_legal_move(&state.board, &result.best_move.unwrap()));
    }

    #[test]
    fn test_zero_budget_falls_back() {
        let state = GameState::new();
        let result = engine().find_best_move_with_budget(&state, Duration::ZERO);

        assert_eq!(result.search_type, SearchType::Fallback);
        assert_eq!(result.depth, 0);
        assert!(is_legal_move(&state.board, &result.best_move.unwrap()));
    }

    #[test]
    fn test_seeded_fallback_is_reproducible() {
        let state = GameState::new();
        let a = engine().find_best_move_with_budget(&state, Duration::ZERO);
        let b = engine().find_best_move_with_budget(&state, Duration::ZERO);
        assert_eq!(a.best_move, b.best_move);
    }

    #[test]
    fn test_depth_cap_respected() {
        let engine = Engine::new(
            EngineConfig::default()
                .with_tt_size_mb(1)
                .with_max_depth(2)
                .with_time_budget_ms(60_000),
        );
        let result = engine.find_best_move(&GameState::new());
        assert_eq!(result.depth, 2);
        assert_eq!(result.search_type, SearchType::IterativeDeepening);
    }

    #[test]
    fn test_snapshot_not_modified() {
        let state = GameState::new();
        let before = state.clone();
        let _ = engine().find_best_move_with_budget(&state, Duration::from_millis(20));
        assert_eq!(state, before);
    }

    #[test]
    fn test_search_type_wire_names() {
        assert_eq!(serde_json::to_value(SearchType::NoMove).unwrap(), "noMove");
        assert_eq!(
            serde_json::to_value(SearchType::IterativeDeepening).unwrap(),
            "iterativeDeepening"
        );
    }
}
