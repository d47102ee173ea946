//! Move simulation
//!
//! The single state transition used by both the search and the game layer:
//! relocate the piece, run the promotion pass, then the combination pass on
//! the resulting board. The input board is never touched.

use super::combination::find_combination_captures;
use super::movegen::Move;
use super::promotion::resolve_promotion;
use crate::board::{Board, Color, Piece, Pos};

/// Reasons a move cannot be simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("no piece on {0}")]
    EmptyOrigin(Pos),

    #[error("piece on {pos} belongs to {found:?}, not the mover")]
    WrongColor { pos: Pos, found: Color },

    #[error("destination {0} is occupied")]
    DestinationOccupied(Pos),
}

/// Board and bookkeeping after one move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub board: Board,
    /// Points credited to the mover
    pub score_gain: u32,
    /// The promotion pass had more than one target
    pub leads_to_choice: bool,
    /// Every removed piece, promotion capture first
    pub captured: Vec<(Pos, Piece)>,
    /// The moved piece was promoted by this move
    pub promoted: bool,
    /// Promotion targets the mover could have picked from
    pub choice_candidates: Vec<Pos>,
}

/// Simulate `mv` for `mover`, taking the first promotion target when several exist
pub fn simulate(board: &Board, mv: &Move, mover: Color) -> Result<Transition, SimulationError> {
    simulate_with_choice(board, mv, mover, None)
}

/// Simulate `mv` for `mover` with an explicit promotion target.
///
/// `choice` only matters when the move promotes into several candidates.
pub fn simulate_with_choice(
    board: &Board,
    mv: &Move,
    mover: Color,
    choice: Option<Pos>,
) -> Result<Transition, SimulationError> {
    let piece = board.get(mv.from).ok_or(SimulationError::EmptyOrigin(mv.from))?;
    if piece.color != mover {
        return Err(SimulationError::WrongColor {
            pos: mv.from,
            found: piece.color,
        });
    }
    if !board.is_empty(mv.to) {
        return Err(SimulationError::DestinationOccupied(mv.to));
    }

    let mut next = *board;
    next.remove(mv.from);
    next.place(mv.to, piece);

    let mut captured = Vec::new();

    let promotion = resolve_promotion(&mut next, mv.to, piece.promoted, choice);
    if let Some(pos) = promotion.captured {
        // resolve_promotion already removed it; record what was there
        if let Some(taken) = board.get(pos) {
            captured.push((pos, taken));
        }
    }

    let combination = find_combination_captures(&next, mv.to, mover);
    for &(pos, _) in &combination.captured {
        next.remove(pos);
    }
    captured.extend(combination.captured);

    Ok(Transition {
        board: next,
        score_gain: promotion.points + combination.points,
        leads_to_choice: promotion.leads_to_choice,
        captured,
        promoted: promotion.promoted,
        choice_candidates: promotion.candidates,
    })
}
