//! Theme constants for the Check10 GUI

use egui::Color32;

// Board squares
pub const BOARD_BG: Color32 = Color32::from_rgb(222, 184, 135);
pub const SQUARE_LIGHT: Color32 = Color32::from_rgb(238, 214, 176);
pub const SQUARE_DARK: Color32 = Color32::from_rgb(181, 136, 99);
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 40, 20);

// Pieces
pub const BLACK_PIECE: Color32 = Color32::from_rgb(25, 25, 30);
pub const BLACK_PIECE_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 80);
pub const WHITE_PIECE: Color32 = Color32::from_rgb(250, 250, 252);
pub const WHITE_PIECE_SHADOW: Color32 = Color32::from_rgb(190, 190, 195);
pub const PROMOTED_RING: Color32 = Color32::from_rgb(230, 180, 40);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const SELECTED_RING: Color32 = Color32::from_rgb(50, 160, 230);
pub const CAPTURE_RING: Color32 = Color32::from_rgb(255, 50, 50);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn target_dot() -> Color32 {
    Color32::from_rgba_unmultiplied(40, 120, 200, 140)
}

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

pub fn hint_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(50, 220, 50, 90)
}

// Text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 28.0;
pub const PIECE_RADIUS_RATIO: f32 = 0.38;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
pub const TARGET_DOT_RATIO: f32 = 0.12;
