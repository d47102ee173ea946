//! Board rendering for the Check10 GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{Board, Color, Move, Piece, Pos, BOARD_SIZE};

use super::theme::*;

/// What the board should highlight this frame
pub struct BoardOverlay<'a> {
    pub selected: Option<Pos>,
    pub targets: &'a [Move],
    pub last_move: Option<Move>,
    pub last_captured: &'a [Pos],
    pub suggested_move: Option<Move>,
    /// Promotion targets waiting for a pick
    pub choice_candidates: &'a [Pos],
    pub interactive: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    cell_size: f32,
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked square if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &BoardOverlay<'_>) -> Option<Pos> {
        let available_size = ui.available_size();
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / BOARD_SIZE as f32;

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_squares(&painter);
        self.draw_coordinates(&painter);

        if let Some(mv) = overlay.last_move {
            self.draw_last_move(&painter, mv);
        }
        for &pos in overlay.last_captured {
            self.draw_ring(&painter, pos, CAPTURE_RING);
        }

        self.draw_pieces(&painter, board);

        if let Some(mv) = overlay.suggested_move {
            self.draw_suggestion(&painter, mv);
        }
        if let Some(pos) = overlay.selected {
            self.draw_ring(&painter, pos, SELECTED_RING);
        }
        for mv in overlay.targets {
            let center = self.square_center(mv.to);
            painter.circle_filled(center, self.cell_size * TARGET_DOT_RATIO, target_dot());
        }
        for &pos in overlay.choice_candidates {
            self.draw_ring(&painter, pos, WIN_HIGHLIGHT);
        }

        if !overlay.interactive {
            return None;
        }

        let hovered = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        painter.rect_filled(self.square_rect(hovered), CornerRadius::ZERO, hover_valid());
        if response.clicked() {
            Some(hovered)
        } else {
            None
        }
    }

    fn draw_squares(&self, painter: &Painter) {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let fill = if (row + col) % 2 == 0 { SQUARE_LIGHT } else { SQUARE_DARK };
                painter.rect_filled(self.square_rect(Pos::new(row, col)), CornerRadius::ZERO, fill);
            }
        }
        let outline = Rect::from_min_size(
            self.board_rect.min + Vec2::splat(BOARD_MARGIN),
            Vec2::splat(self.cell_size * BOARD_SIZE as f32),
        );
        painter.rect_stroke(outline, CornerRadius::ZERO, Stroke::new(1.5, GRID_LINE), egui::StrokeKind::Outside);
    }

    /// Column letters a-h, row indices 0-7
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);
        for i in 0..BOARD_SIZE as u8 {
            let center = self.square_center(Pos::new(i, i));
            let letter = (b'a' + i) as char;

            let top = Pos2::new(center.x, self.board_rect.min.y + BOARD_MARGIN * 0.5);
            painter.text(top, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);

            let left = Pos2::new(self.board_rect.min.x + BOARD_MARGIN * 0.5, center.y);
            painter.text(left, egui::Align2::CENTER_CENTER, i.to_string(), font.clone(), GRID_LINE);
        }
    }

    fn draw_pieces(&self, painter: &Painter, board: &Board) {
        for (pos, piece) in board.iter_pieces() {
            self.draw_piece(painter, pos, piece);
        }
    }

    /// Disc with the piece number; promoted pieces get a gold ring
    fn draw_piece(&self, painter: &Painter, pos: Pos, piece: Piece) {
        let center = self.square_center(pos);
        let radius = self.cell_size * PIECE_RADIUS_RATIO;
        painter.circle_filled(center + Vec2::new(2.0, 2.0), radius, Color32::from_rgba_unmultiplied(0, 0, 0, 50));

        let text_color = match piece.color {
            Color::Black => {
                painter.circle_filled(center, radius, BLACK_PIECE);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.08, BLACK_PIECE_HIGHLIGHT));
                WHITE_PIECE
            }
            Color::White => {
                painter.circle_filled(center, radius, WHITE_PIECE);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.08, WHITE_PIECE_SHADOW));
                BLACK_PIECE
            }
        };

        if piece.promoted {
            painter.circle_stroke(center, radius, Stroke::new(3.0, PROMOTED_RING));
        }

        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            piece.number.to_string(),
            egui::FontId::proportional(radius * 0.9),
            text_color,
        );
    }

    fn draw_ring(&self, painter: &Painter, pos: Pos, color: Color32) {
        let radius = self.cell_size * PIECE_RADIUS_RATIO + 4.0;
        painter.circle_stroke(self.square_center(pos), radius, Stroke::new(3.0, color));
    }

    fn draw_last_move(&self, painter: &Painter, mv: Move) {
        let stroke = Stroke::new(2.0, LAST_MOVE_MARKER);
        painter.line_segment([self.square_center(mv.from), self.square_center(mv.to)], stroke);
        painter.circle_filled(self.square_center(mv.from), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    fn draw_suggestion(&self, painter: &Painter, mv: Move) {
        painter.rect_filled(self.square_rect(mv.from), CornerRadius::ZERO, hint_fill());
        painter.rect_filled(self.square_rect(mv.to), CornerRadius::ZERO, hint_fill());
        painter.text(
            self.square_center(mv.to),
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(18.0),
            GRID_LINE,
        );
    }

    fn square_rect(&self, pos: Pos) -> Rect {
        let min = self.board_rect.min
            + Vec2::new(
                BOARD_MARGIN + pos.col as f32 * self.cell_size,
                BOARD_MARGIN + pos.row as f32 * self.cell_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    fn square_center(&self, pos: Pos) -> Pos2 {
        self.square_rect(pos).center()
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size).floor() as i32;
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size).floor() as i32;

        if Pos::is_valid(row, col) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }
}
