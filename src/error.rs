//! Error types for the engine
//!
//! Client-input problems (malformed requests, bad boards) and illegal moves
//! submitted through [`GameState::apply_move`](crate::game::GameState::apply_move).
//! Running out of legal moves is not an error; see [`crate::engine::SearchType::NoMove`].

/// Errors surfaced to callers of the engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Request body is not valid JSON or has the wrong shape
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    /// Required part of the game state is absent
    #[error("Missing field in game state: {0}")]
    MissingField(&'static str),

    /// Board has the wrong dimensions or an impossible piece
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// Score outside what a game can reach
    #[error("Invalid score: {field} is {value}, expected at most {max}")]
    InvalidScore {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// Move rejected by the rules
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// No further moves may be played
    #[error("Game is over")]
    GameOver,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// True when the caller sent something unusable (as opposed to an engine fault)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, EngineError::Io(_))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
