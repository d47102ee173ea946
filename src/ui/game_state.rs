//! Game session management for the Check10 GUI

use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::rules::{moves_for, simulate};
use crate::{Color, Engine, EngineConfig, GameState, Move, MoveResult, Pos};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs engine
    PvE { human_color: Color },
    /// Player vs Player (hotseat)
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_color: Color::White,
        }
    }
}

/// Engine computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Human move waiting for a promotion target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChoice {
    pub mv: Move,
    pub candidates: Vec<Pos>,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        self.start_time = None;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// One game as the GUI sees it: the engine-facing snapshot plus selection,
/// history and engine bookkeeping
pub struct GameSession {
    pub state: GameState,
    pub mode: GameMode,
    pub selected: Option<Pos>,
    pub pending_choice: Option<PendingChoice>,
    pub last_move: Option<Move>,
    pub last_captured: Vec<Pos>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Move>,
    pub message: Option<String>,
    /// Snapshots before each move, for undo
    history: Vec<GameState>,
    config: EngineConfig,
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        Self::with_config(mode, EngineConfig::default().with_time_budget_ms(500))
    }

    pub fn with_config(mode: GameMode, config: EngineConfig) -> Self {
        Self {
            state: GameState::new(),
            mode,
            selected: None,
            pending_choice: None,
            last_move: None,
            last_captured: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            history: Vec::new(),
            config,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::with_config(self.mode, self.config.clone());
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.state.current_player == human_color,
            GameMode::PvP => true,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Destinations of the selected piece
    pub fn selected_targets(&self) -> Vec<Move> {
        self.selected
            .map(|pos| moves_for(pos, &self.state.board))
            .unwrap_or_default()
    }

    /// Handle a click on `pos`: select an own piece, or move the selected one
    pub fn click(&mut self, pos: Pos) -> Result<(), String> {
        if self.state.game_over {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("Engine is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        if self.pending_choice.is_some() {
            return Err("Pick a piece to capture first".to_string());
        }

        if let Some(piece) = self.state.board.get(pos) {
            if piece.color == self.state.current_player {
                self.selected = Some(pos);
                return Ok(());
            }
        }

        let Some(mv) = self.selected_targets().into_iter().find(|m| m.to == pos) else {
            self.selected = None;
            return Err("Select one of your pieces, then an empty square ahead of it".to_string());
        };
        self.try_move(mv)
    }

    /// Play a human move, pausing for a capture choice when the promotion
    /// has several targets
    pub fn try_move(&mut self, mv: Move) -> Result<(), String> {
        let transition =
            simulate(&self.state.board, &mv, self.state.current_player).map_err(|e| e.to_string())?;
        if transition.leads_to_choice {
            self.pending_choice = Some(PendingChoice {
                mv,
                candidates: transition.choice_candidates,
            });
            self.message = Some("Promotion: choose which piece to capture".to_string());
            return Ok(());
        }
        self.execute_move(mv, None)
    }

    /// Finish a pending promotion by capturing `target`
    pub fn choose_capture(&mut self, target: Pos) -> Result<(), String> {
        let Some(pending) = self.pending_choice.take() else {
            return Err("No capture to choose".to_string());
        };
        if !pending.candidates.contains(&target) {
            let err = format!("{target} is not a capture target");
            self.pending_choice = Some(pending);
            return Err(err);
        }
        self.execute_move(pending.mv, Some(target))
    }

    pub fn cancel_choice(&mut self) {
        if self.pending_choice.take().is_some() {
            self.message = None;
        }
    }

    fn execute_move(&mut self, mv: Move, choice: Option<Pos>) -> Result<(), String> {
        let before = self.state.clone();
        let transition = self.state.apply_move(&mv, choice).map_err(|e| e.to_string())?;
        self.history.push(before);

        info!(
            mv = %mv,
            gain = transition.score_gain,
            white = self.state.white_score,
            black = self.state.black_score,
            "Move played"
        );

        self.last_move = Some(mv);
        self.last_captured = transition.captured.iter().map(|&(pos, _)| pos).collect();
        self.selected = None;
        self.pending_choice = None;
        self.suggested_move = None;
        self.message = None;

        if self.state.game_over {
            self.move_timer.stop();
        } else {
            self.move_timer.start();
        }
        Ok(())
    }

    /// Start the engine on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.state.game_over {
            return;
        }

        let state = self.state.clone();
        let engine = Engine::new(self.config.clone());
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.find_best_move(&state);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if the engine has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(std::sync::mpsc::TryRecvError::Empty) => None,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("Engine error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.move_timer.set_ai_time(elapsed);
            let best = move_result.best_move;
            let choice = move_result.capture_choice;
            self.last_ai_result = Some(move_result);

            match best {
                Some(mv) => {
                    if let Err(msg) = self.execute_move(mv, choice) {
                        self.message = Some(msg);
                    }
                }
                None => self.message = Some("Engine has no move".to_string()),
            }
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Quick engine suggestion for the side to move
    pub fn request_suggestion(&mut self) {
        if self.state.game_over || self.is_ai_thinking() {
            return;
        }

        let engine = Engine::new(self.config.clone());
        let result = engine.find_best_move_with_budget(&self.state, Duration::from_millis(200));
        debug!(mv = ?result.best_move.map(|m| m.to_string()), "Hint");

        self.suggested_move = result.best_move;
        self.last_ai_result = Some(result);
    }

    /// Undo the last move (in PvE, the last engine reply and the human move before it)
    pub fn undo(&mut self) {
        if self.history.is_empty() || self.is_ai_thinking() {
            return;
        }

        let undo_count = match self.mode {
            GameMode::PvE { human_color } => {
                if self.state.current_player == human_color && self.history.len() >= 2 {
                    2
                } else {
                    1
                }
            }
            GameMode::PvP => 1,
        };

        let keep = self.history.len() - undo_count;
        if let Some(state) = self.history.drain(keep..).next() {
            self.state = state;
        }

        self.selected = None;
        self.pending_choice = None;
        self.last_move = None;
        self.last_captured.clear();
        self.suggested_move = None;
        self.message = None;
        self.move_timer.start();
    }
}
