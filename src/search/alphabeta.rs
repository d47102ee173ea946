//! Alpha-Beta search with iterative deepening and transposition table
//!
//! This module implements the core search algorithm for the Check10 engine.
//! Values are always taken from the root player's perspective: the search
//! maximizes on the root player's turns and minimizes on the opponent's.
//!
//! # Features
//!
//! - Iterative deepening for time management and move ordering
//! - Transposition table with exact / lower / upper bound entries
//! - Cooperative deadline checks; an interrupted depth is discarded
//! - Configurable handling of promotions with several capture targets
//!
//! # Example
//!
//! ```
//! use check10::game::GameState;
//! use check10::search::{SearchOptions, Searcher};
//!
//! let mut searcher = Searcher::new(SearchOptions::default());
//! let state = GameState::new();
//!
//! let result = searcher.search(&state, 2);
//! assert!(result.best_move.is_some());
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{Board, Color, Pos};
use crate::eval::{evaluate, gain_value, EvalWeight};
use crate::game::GameState;
use crate::rules::{moves_for_color, simulate, simulate_with_choice, Move, Transition};

use super::{EntryType, TTStats, TranspositionTable, ZobristTable};

/// Hard cap on iterative deepening
pub const MAX_DEPTH: i8 = 15;

/// Infinity score for alpha-beta bounds
const INF: i32 = EvalWeight::INFINITY;

/// Nodes between two deadline checks
const TIME_CHECK_INTERVAL: u64 = 1024;

/// How the search treats a promotion that could capture one of several pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoicePolicy {
    /// Score the move by its immediate gain and do not search below it
    #[default]
    ImmediateGain,
    /// Search every capture target as its own child
    Branch,
}

/// Knobs for one search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_depth: i8,
    pub tt_size_mb: usize,
    /// Disable the transposition table entirely
    pub use_tt: bool,
    pub choice_policy: ChoicePolicy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            tt_size_mb: 8,
            use_tt: true,
            choice_policy: ChoicePolicy::ImmediateGain,
        }
    }
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Total beta cutoffs (window closed at an interior node)
    pub beta_cutoffs: u64,
    /// Cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score
    pub tt_score_hits: u64,
    /// TT probes that provided a best move for ordering
    pub tt_move_hits: u64,
    /// Moves the simulator rejected
    pub invalid_simulations: u64,
    /// Choice-bearing promotions scored by immediate gain
    pub choice_moves: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }

    /// TT score hit rate in percent
    pub fn tt_score_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_score_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Move>,
    /// Promotion target the best move commits to, when it had several
    pub capture_choice: Option<Pos>,
    /// Value of the best move, in tenths of a point for the root player
    pub score: i32,
    /// Deepest fully completed depth
    pub depth: i8,
    /// Total nodes searched
    pub nodes: u64,
    pub stats: SearchStats,
}

/// Position inside the tree
#[derive(Clone, Copy)]
struct Node {
    board: Board,
    side: Color,
    /// Points per color, indexed by `Color::index`
    scores: [u32; 2],
    hash: u64,
}

impl Node {
    fn root(state: &GameState, zobrist: &ZobristTable) -> Self {
        Self {
            board: state.board,
            side: state.current_player,
            scores: [state.white_score, state.black_score],
            hash: zobrist.hash(&state.board, state.current_player),
        }
    }

    /// Node after `mv`, with captures folded into the hash
    fn child(&self, zobrist: &ZobristTable, mv: &Move, t: &Transition) -> Self {
        let mut hash = zobrist.update_step(self.hash, mv.piece, mv.from, mv.to);
        for &(pos, piece) in &t.captured {
            hash = zobrist.update_capture(hash, piece, pos);
        }
        let mut scores = self.scores;
        scores[self.side.index()] = scores[self.side.index()].saturating_add(t.score_gain);
        Self {
            board: t.board,
            side: self.side.opponent(),
            scores,
            hash,
        }
    }
}

/// One root alternative: a move plus the promotion target it commits to.
/// `transition` is `None` when the simulator rejected the move.
struct RootCandidate {
    mv: Move,
    choice: Option<Pos>,
    transition: Option<Transition>,
}

impl RootCandidate {
    fn gain(&self) -> u32 {
        self.transition.as_ref().map_or(0, |t| t.score_gain)
    }
}

/// Alpha-beta searcher.
///
/// Owns the transposition table for the searches it runs; create one per
/// top-level search and drop it afterwards.
pub struct Searcher {
    zobrist: &'static ZobristTable,
    tt: Option<TranspositionTable>,
    options: SearchOptions,
    root: Color,
    nodes: u64,
    stats: SearchStats,
    deadline: Option<Instant>,
    stopped: bool,
}

impl Searcher {
    #[must_use]
    pub fn new(options: SearchOptions) -> Self {
        Self {
            zobrist: ZobristTable::global(),
            tt: options
                .use_tt
                .then(|| TranspositionTable::new(options.tt_size_mb)),
            options,
            root: Color::White,
            nodes: 0,
            stats: SearchStats::default(),
            deadline: None,
            stopped: false,
        }
    }

    /// Iterative deepening to `max_depth` without a deadline.
    ///
    /// Returns an empty result (no move, depth 0) when the side to move has
    /// no legal moves.
    #[must_use]
    pub fn search(&mut self, state: &GameState, max_depth: i8) -> SearchResult {
        self.iterate(state, max_depth, None)
            .unwrap_or_else(|| self.empty_result())
    }

    /// Iterative deepening until `deadline` or the configured depth cap.
    ///
    /// Returns `None` if not even depth 1 completed in time (or there is
    /// nothing to search); otherwise the result of the deepest completed depth.
    #[must_use]
    pub fn search_until(&mut self, state: &GameState, deadline: Instant) -> Option<SearchResult> {
        self.iterate(state, self.options.max_depth, Some(deadline))
    }

    /// Single alpha-beta pass at exactly `depth`, without a deadline.
    #[must_use]
    pub fn search_depth(&mut self, state: &GameState, depth: i8) -> SearchResult {
        self.reset(state.current_player, None);
        let root = Node::root(state, self.zobrist);
        let candidates = self.root_candidates(&root);
        let order: Vec<usize> = (0..candidates.len()).collect();
        match self.search_root(&root, depth.clamp(1, MAX_DEPTH), &candidates, &order) {
            Some(mut result) => {
                result.nodes = self.nodes;
                result.stats = self.stats.clone();
                result
            }
            None => self.empty_result(),
        }
    }

    /// Get statistics about the transposition table, if one is in use.
    #[must_use]
    pub fn tt_stats(&self) -> Option<TTStats> {
        self.tt.as_ref().map(TranspositionTable::stats)
    }

    fn empty_result(&self) -> SearchResult {
        SearchResult {
            best_move: None,
            capture_choice: None,
            score: 0,
            depth: 0,
            nodes: self.nodes,
            stats: self.stats.clone(),
        }
    }

    fn reset(&mut self, root: Color, deadline: Option<Instant>) {
        self.root = root;
        self.nodes = 0;
        self.stats = SearchStats::default();
        self.deadline = deadline;
        self.stopped = false;
    }

    /// Check the deadline and latch `stopped` once it has passed.
    #[inline]
    fn check_time(&mut self) -> bool {
        if !self.stopped {
            if let Some(deadline) = self.deadline {
                self.stopped = Instant::now() >= deadline;
            }
        }
        self.stopped
    }

    fn iterate(
        &mut self,
        state: &GameState,
        max_depth: i8,
        deadline: Option<Instant>,
    ) -> Option<SearchResult> {
        self.reset(state.current_player, deadline);
        let root = Node::root(state, self.zobrist);
        let candidates = self.root_candidates(&root);
        if candidates.is_empty() {
            return None;
        }

        let mut best: Option<SearchResult> = None;
        let mut best_idx: Option<usize> = None;

        for depth in 1..=max_depth.clamp(1, MAX_DEPTH) {
            if self.check_time() {
                break;
            }

            // Previous best first, the rest in gain order
            let mut order: Vec<usize> = Vec::with_capacity(candidates.len());
            order.extend(best_idx);
            order.extend((0..candidates.len()).filter(|&i| Some(i) != best_idx));

            let Some(result) = self.search_root(&root, depth, &candidates, &order) else {
                break;
            };

            best_idx = candidates.iter().position(|c| {
                Some(c.mv) == result.best_move && c.choice == result.capture_choice
            });
            debug!(
                depth,
                score = result.score,
                nodes = self.nodes,
                best = ?result.best_move.map(|m| m.to_string()),
                "Depth complete"
            );
            best = Some(result);
        }

        best.map(|mut result| {
            result.nodes = self.nodes;
            result.stats = self.stats.clone();
            result
        })
    }

    /// Root alternatives sorted by immediate gain, highest first (stable).
    fn root_candidates(&mut self, root: &Node) -> Vec<RootCandidate> {
        let mut candidates = Vec::new();
        for mv in moves_for_color(root.side, &root.board) {
            match simulate(&root.board, &mv, root.side) {
                Ok(t) if t.leads_to_choice && self.options.choice_policy == ChoicePolicy::Branch => {
                    for &target in &t.choice_candidates {
                        let transition =
                            simulate_with_choice(&root.board, &mv, root.side, Some(target)).ok();
                        candidates.push(RootCandidate {
                            mv,
                            choice: Some(target),
                            transition,
                        });
                    }
                }
                Ok(t) => {
                    let choice = if t.leads_to_choice {
                        t.captured.first().map(|&(pos, _)| pos)
                    } else {
                        None
                    };
                    candidates.push(RootCandidate {
                        mv,
                        choice,
                        transition: Some(t),
                    });
                }
                Err(err) => {
                    warn!(%mv, error = %err, "Simulator rejected a generated root move");
                    self.stats.invalid_simulations += 1;
                    candidates.push(RootCandidate {
                        mv,
                        choice: None,
                        transition: None,
                    });
                }
            }
        }
        candidates.sort_by_key(|c| std::cmp::Reverse(c.gain()));
        candidates
    }

    /// Root-level pass with a full window. `None` if the deadline interrupted it.
    fn search_root(
        &mut self,
        root: &Node,
        depth: i8,
        candidates: &[RootCandidate],
        order: &[usize],
    ) -> Option<SearchResult> {
        self.nodes += 1;
        let mut alpha = -INF;
        let beta = INF;
        let mut best_value = -INF;
        let mut best_idx = None;

        for &i in order {
            if self.check_time() {
                return None;
            }
            let candidate = &candidates[i];
            let value = match &candidate.transition {
                Some(t) => self.transition_value(root, &candidate.mv, t, depth, alpha, beta),
                None => self.invalid_value(root.side),
            };
            if self.stopped {
                return None;
            }
            if value > best_value || best_idx.is_none() {
                best_value = value;
                best_idx = Some(i);
            }
            alpha = alpha.max(value);
        }

        let best = &candidates[best_idx?];
        Some(SearchResult {
            best_move: Some(best.mv),
            capture_choice: best.choice,
            score: best_value,
            depth,
            nodes: self.nodes,
            stats: SearchStats::default(),
        })
    }

    /// Worst value for the side that made a rejected move
    #[inline]
    fn invalid_value(&self, mover: Color) -> i32 {
        if mover == self.root {
            -EvalWeight::INVALID_MOVE
        } else {
            EvalWeight::INVALID_MOVE
        }
    }

    #[inline]
    fn evaluate_node(&self, node: &Node) -> i32 {
        let root = self.root;
        evaluate(
            &node.board,
            root,
            node.scores[root.index()],
            node.scores[root.opponent().index()],
        )
    }

    /// Value of reaching `t` from `node` by `mv` with `depth` plies left at `node`
    fn transition_value(
        &mut self,
        node: &Node,
        mv: &Move,
        t: &Transition,
        depth: i8,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        if t.leads_to_choice && self.options.choice_policy == ChoicePolicy::ImmediateGain {
            self.stats.choice_moves += 1;
            let gain = gain_value(t.score_gain);
            return if node.side == self.root { gain } else { -gain };
        }
        let child = node.child(self.zobrist, mv, t);
        self.alpha_beta(&child, depth - 1, alpha, beta)
    }

    /// Children of `mv` at `node`: one per promotion target under `Branch`,
    /// otherwise one. `None` marks a move the simulator rejected.
    fn expand(&mut self, node: &Node, mv: &Move) -> Vec<Option<Transition>> {
        match simulate(&node.board, mv, node.side) {
            Ok(t) if t.leads_to_choice && self.options.choice_policy == ChoicePolicy::Branch => t
                .choice_candidates
                .iter()
                .map(|&target| simulate_with_choice(&node.board, mv, node.side, Some(target)).ok())
                .collect(),
            Ok(t) => vec![Some(t)],
            Err(err) => {
                warn!(%mv, error = %err, "Simulator rejected a generated move");
                self.stats.invalid_simulations += 1;
                vec![None]
            }
        }
    }

    fn alpha_beta(&mut self, node: &Node, depth: i8, alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        if self.nodes % TIME_CHECK_INTERVAL == 0 && self.check_time() {
            return 0;
        }
        if self.stopped {
            return 0;
        }

        if depth <= 0 {
            return self.evaluate_node(node);
        }
        let mut moves = moves_for_color(node.side, &node.board);
        if moves.is_empty() {
            return self.evaluate_node(node);
        }

        // Stored flags are relative to the window this node was entered with
        let (alpha0, beta0) = (alpha, beta);
        let (mut alpha, mut beta) = (alpha, beta);

        let mut tt_move = None;
        if let Some(tt) = &self.tt {
            self.stats.tt_probes += 1;
            if let Some(probe) = tt.probe(node.hash, depth, alpha, beta) {
                if let Some(value) = probe.value {
                    self.stats.tt_score_hits += 1;
                    return value;
                }
                alpha = probe.alpha;
                beta = probe.beta;
                tt_move = probe.best_move;
            }
        }

        if let Some(tt_move) = tt_move {
            if let Some(idx) = moves.iter().position(|m| *m == tt_move) {
                self.stats.tt_move_hits += 1;
                moves[..=idx].rotate_right(1);
            }
        }

        let maximizing = node.side == self.root;
        let mut best = if maximizing { -INF } else { INF };
        let mut best_move = None;

        'moves: for (i, mv) in moves.iter().enumerate() {
            for child in self.expand(node, mv) {
                let value = match &child {
                    Some(t) => self.transition_value(node, mv, t, depth, alpha, beta),
                    None => self.invalid_value(node.side),
                };
                if self.stopped {
                    return 0;
                }

                if maximizing {
                    if value > best {
                        best = value;
                        best_move = Some(*mv);
                    }
                    alpha = alpha.max(value);
                } else {
                    if value < best {
                        best = value;
                        best_move = Some(*mv);
                    }
                    beta = beta.min(value);
                }

                if alpha >= beta {
                    self.stats.beta_cutoffs += 1;
                    if i == 0 {
                        self.stats.first_move_cutoffs += 1;
                    }
                    break 'moves;
                }
            }
        }

        if let Some(tt) = &mut self.tt {
            tt.store(
                node.hash,
                depth,
                best,
                EntryType::from_window(best, alpha0, beta0),
                best_move,
            );
        }

        best
    }
}
