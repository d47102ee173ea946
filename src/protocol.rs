//! JSON request / response boundary
//!
//! A request carries a game-state snapshot and an optional time budget; the
//! response carries the chosen move (or `null`) and the search summary.
//!
//! ```json
//! {"gameState": {"board": [[null, {"color": "white", "number": 3}, ...], ...],
//!                "currentPlayer": "white", "whiteScore": 0, "blackScore": 0,
//!                "gameOver": false, "phase": "playing"},
//!  "timeBudgetMs": 500}
//! ```
//!
//! The snapshot is validated before any search runs: `board` and
//! `currentPlayer` must be present, the board must be 8x8 with numbers 1-8 and
//! neither score may exceed what a game can reach.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::board::BoardRows;
use crate::board::{Board, Color, Piece, Pos, MAX_SCORE};
use crate::engine::{Engine, MoveResult, SearchType};
use crate::error::{EngineError, Result};
use crate::game::{GameState, Phase};
use crate::rules::Move;

/// Snapshot as sent by clients; required parts are optional here so their
/// absence can be reported by name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGameState {
    pub board: Option<BoardRows>,
    pub current_player: Option<Color>,
    #[serde(default)]
    pub white_score: u32,
    #[serde(default)]
    pub black_score: u32,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub phase: Phase,
}

impl TryFrom<WireGameState> for GameState {
    type Error = EngineError;

    fn try_from(wire: WireGameState) -> Result<Self> {
        let rows = wire.board.ok_or(EngineError::MissingField("board"))?;
        let current_player = wire
            .current_player
            .ok_or(EngineError::MissingField("currentPlayer"))?;
        Ok(GameState {
            board: Board::try_from(rows)?,
            current_player,
            white_score: checked_score("whiteScore", wire.white_score)?,
            black_score: checked_score("blackScore", wire.black_score)?,
            game_over: wire.game_over,
            phase: wire.phase,
        })
    }
}

fn checked_score(field: &'static str, value: u32) -> Result<u32> {
    if value > MAX_SCORE {
        return Err(EngineError::InvalidScore {
            field,
            value,
            max: MAX_SCORE,
        });
    }
    Ok(value)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub game_state: WireGameState,
    #[serde(default)]
    pub time_budget_ms: Option<u64>,
}

/// Move in wire form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDto {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    pub piece: Piece,
}

impl From<Move> for MoveDto {
    fn from(mv: Move) -> Self {
        Self {
            from_row: mv.from.row,
            from_col: mv.from.col,
            to_row: mv.to.row,
            to_col: mv.to.col,
            piece: mv.piece,
        }
    }
}

impl From<MoveDto> for Move {
    fn from(dto: MoveDto) -> Self {
        Move::new(
            Pos::new(dto.from_row, dto.from_col),
            Pos::new(dto.to_row, dto.to_col),
            dto.piece,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub mv: Option<MoveDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_choice: Option<Pos>,
    /// Tenths of a point for the side to move
    pub score: i32,
    pub depth: i8,
    pub nodes: u64,
    pub time_ms: u64,
    pub search_type: SearchType,
}

impl From<&MoveResult> for MoveResponse {
    fn from(result: &MoveResult) -> Self {
        Self {
            mv: result.best_move.map(MoveDto::from),
            capture_choice: result.capture_choice,
            score: result.score,
            depth: result.depth,
            nodes: result.nodes,
            time_ms: result.time_ms,
            search_type: result.search_type,
        }
    }
}

/// Parse and validate a request body
pub fn parse_request(body: &str) -> Result<(GameState, Option<Duration>)> {
    let request: MoveRequest = serde_json::from_str(body)?;
    let state = GameState::try_from(request.game_state)?;
    Ok((state, request.time_budget_ms.map(Duration::from_millis)))
}

/// Answer one request: validate, search, serialize.
///
/// Client-input problems come back as errors before any search runs.
pub fn handle_move_request(engine: &Engine, body: &str) -> Result<String> {
    let (state, budget) = parse_request(body).inspect_err(|e| {
        warn!(error = %e, "Rejected move request");
    })?;
    let budget = budget.unwrap_or_else(|| engine.config().time_budget());
    let result = engine.find_best_move_with_budget(&state, budget);
    Ok(serde_json::to_string(&MoveResponse::from(&result))?)
}
