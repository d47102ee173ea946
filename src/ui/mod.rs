//! GUI module for Check10
//!
//! Native egui/eframe front end: play against the engine or hotseat.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::Check10App;
pub use game_state::{GameMode, GameSession, PendingChoice};
