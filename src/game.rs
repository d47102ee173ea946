//! Game state snapshot
//!
//! [`GameState`] is what the engine consumes and what the wire protocol
//! carries: the board, whose turn it is, both scores and the lifecycle flags.
//! It also knows how to advance a real game by one move.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Pos};
use crate::error::{EngineError, Result};
use crate::rules::{has_legal_moves, is_legal_move, moves_for_color, simulate_with_choice, Move, Transition};

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Pregame,
    #[default]
    Playing,
    Finished,
}

/// Complete position as seen by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub current_player: Color,
    #[serde(default)]
    pub white_score: u32,
    #[serde(default)]
    pub black_score: u32,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub phase: Phase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Initial layout, White to move
    pub fn new() -> Self {
        Self::from_position(Board::new(), Color::White)
    }

    /// Arbitrary position with zero scores; game-over is derived from the board
    pub fn from_position(board: Board, current_player: Color) -> Self {
        let mut state = Self {
            board,
            current_player,
            white_score: 0,
            black_score: 0,
            game_over: false,
            phase: Phase::Playing,
        };
        state.refresh_game_over();
        state
    }

    #[inline]
    pub fn score(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_score,
            Color::Black => self.black_score,
        }
    }

    fn add_score(&mut self, color: Color, points: u32) {
        match color {
            Color::White => self.white_score = self.white_score.saturating_add(points),
            Color::Black => self.black_score = self.black_score.saturating_add(points),
        }
    }

    /// Moves available to the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.game_over {
            return Vec::new();
        }
        moves_for_color(self.current_player, &self.board)
    }

    /// Play `mv` for the side to move.
    ///
    /// `choice` picks the promotion target when several exist. On success the
    /// mover is credited, the turn passes and game-over is re-evaluated.
    pub fn apply_move(&mut self, mv: &Move, choice: Option<Pos>) -> Result<Transition> {
        if self.game_over {
            return Err(EngineError::GameOver);
        }
        if mv.piece.color != self.current_player {
            return Err(EngineError::IllegalMove(format!(
                "{} to move, got {}",
                self.current_player.name(),
                mv
            )));
        }
        if !is_legal_move(&self.board, mv) {
            return Err(EngineError::IllegalMove(mv.to_string()));
        }

        let transition = simulate_with_choice(&self.board, mv, self.current_player, choice)
            .map_err(|e| EngineError::IllegalMove(e.to_string()))?;

        self.board = transition.board;
        self.add_score(self.current_player, transition.score_gain);
        self.current_player = self.current_player.opponent();
        self.phase = Phase::Playing;
        self.refresh_game_over();

        Ok(transition)
    }

    /// Recompute `game_over` (and the phase) from the side to move
    pub fn refresh_game_over(&mut self) {
        self.game_over = !has_legal_moves(self.current_player, &self.board);
        if self.game_over {
            self.phase = Phase::Finished;
        }
    }

    /// Higher score once the game is over; `None` while playing or on a tie
    pub fn winner(&self) -> Option<Color> {
        if !self.game_over {
            return None;
        }
        match self.white_score.cmp(&self.black_score) {
            std::cmp::Ordering::Greater => Some(Color::White),
            std::cmp::Ordering::Less => Some(Color::Black),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    #[test]
    fn test_new_game() {
        let state = GameState::new();
        assert_eq!(state.current_player, Color::White);
        assert_eq!(state.phase, Phase::Playing);
        assert!(!state.game_over);
        assert_eq!(state.legal_moves().len(), 22);
    }

    #[test]
    fn test_apply_move_switches_turn() {
        let mut state = GameState::new();
        let mv = state.legal_moves()[0];
        let t = state.apply_move(&mv, None).unwrap();
        assert_eq!(t.score_gain, 0);
        assert_eq!(state.current_player, Color::Black);
        assert!(state.board.is_empty(mv.from));
        assert_eq!(state.board.get(mv.to), Some(mv.piece));
    }

    #[test]
    fn test_apply_move_credits_mover() {
        let mut board = Board::empty();
        let white = Piece::new(Color::White, 5);
        board.place(Pos::new(1, 0), white);
        board.place(Pos::new(0, 0), Piece::new(Color::Black, 5));
        board.place(Pos::new(2, 7), Piece::new(Color::Black, 1));
        let mut state = GameState::from_position(board, Color::White);

        let mv = Move::new(Pos::new(1, 0), Pos::new(0, 1), white);
        state.apply_move(&mv, None).unwrap();
        assert_eq!(state.white_score, 5);
        assert_eq!(state.black_score, 0);
        assert_eq!(state.score(Color::White), 5);
    }

    #[test]
    fn test_rejects_wrong_side_and_illegal_steps() {
        let mut state = GameState::new();
        let black_piece = state.board.get(Pos::new(1, 0)).unwrap();
        let black_move = Move::new(Pos::new(1, 0), Pos::new(2, 0), black_piece);
        assert!(matches!(
            state.apply_move(&black_move, None),
            Err(EngineError::IllegalMove(_))
        ));

        let white_piece = state.board.get(Pos::new(6, 0)).unwrap();
        let jump = Move::new(Pos::new(6, 0), Pos::new(4, 0), white_piece);
        assert!(matches!(state.apply_move(&jump, None), Err(EngineError::IllegalMove(_))));
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_game_over_when_side_to_move_is_stuck() {
        // Black's only piece sits on its promotion row
        let mut board = Board::empty();
        let white = Piece::new(Color::White, 2);
        board.place(Pos::new(3, 3), white);
        board.place(Pos::new(7, 0), Piece::promoted(Color::Black, 1));
        let mut state = GameState::from_position(board, Color::White);
        assert!(!state.game_over);

        let mv = Move::new(Pos::new(3, 3), Pos::new(2, 3), white);
        state.apply_move(&mv, None).unwrap();
        assert!(state.game_over);
        assert_eq!(state.phase, Phase::Finished);
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_apply_after_game_over() {
        let mut state = GameState::from_position(Board::empty(), Color::White);
        let mv = Move::new(Pos::new(6, 0), Pos::new(5, 0), Piece::new(Color::White, 1));
        assert!(matches!(state.apply_move(&mv, None), Err(EngineError::GameOver)));
    }

    #[test]
    fn test_winner() {
        let mut state = GameState::from_position(Board::empty(), Color::White);
        assert_eq!(state.winner(), None);
        state.white_score = 12;
        state.black_score = 7;
        assert_eq!(state.winner(), Some(Color::White));
        state.black_score = 12;
        assert_eq!(state.winner(), None);

        let playing = GameState::new();
        assert_eq!(playing.winner(), None);
    }

    #[test]
    fn test_json_shape() {
        let state = GameState::new();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["currentPlayer"], "white");
        assert_eq!(json["phase"], "playing");
        assert_eq!(json["board"].as_array().unwrap().len(), 8);
        assert_eq!(json["board"][0][0]["number"], 8);
        assert_eq!(json["board"][0][0]["color"], "black");

        let back: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
