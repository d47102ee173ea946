//! Main application for the Check10 GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::{GameMode, GameSession};
use super::theme::*;
use crate::Color;

/// Main Check10 application
pub struct Check10App {
    session: GameSession,
    board_view: BoardView,
    show_debug: bool,
}

impl Default for Check10App {
    fn default() -> Self {
        Self {
            session: GameSession::new(GameMode::default()),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }
}

impl Check10App {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn new_game(&mut self, mode: GameMode) {
        self.session = GameSession::new(mode);
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (vs Engine - White)").clicked() {
                        self.new_game(GameMode::PvE { human_color: Color::White });
                        ui.close_menu();
                    }
                    if ui.button("New Game (vs Engine - Black)").clicked() {
                        self.new_game(GameMode::PvE { human_color: Color::Black });
                        ui.close_menu();
                    }
                    if ui.button("New Game (Hotseat)").clicked() {
                        self.new_game(GameMode::PvP);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.session.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Engine Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.session.mode {
                        GameMode::PvE { human_color } => format!("vs Engine - You: {}", human_color.name()),
                        GameMode::PvP => "Hotseat".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title(ui);
                ui.add_space(12.0);
                self.render_turn_card(ui);
                ui.add_space(10.0);
                self.render_score_card(ui);
                ui.add_space(10.0);
                self.render_timer_card(ui);
                ui.add_space(10.0);
                self.render_actions_card(ui);

                if self.session.pending_choice.is_some() {
                    ui.add_space(10.0);
                    self.render_choice_card(ui);
                }

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if self.session.state.game_over {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui);
                }

                if let Some(msg) = &self.session.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("CHECK10").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("Sum to ten, capture the rest").size(11.0).color(TEXT_MUTED));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let player = self.session.state.current_player;
            let (fill, text) = match player {
                Color::Black => (BLACK_PIECE, WHITE_PIECE),
                Color::White => (WHITE_PIECE, BLACK_PIECE),
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(40.0, 40.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 18.0, fill);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "10",
                    egui::FontId::proportional(14.0),
                    text,
                );
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.label(RichText::new(player.name().to_uppercase()).size(18.0).strong().color(TEXT_PRIMARY));
                    let status = if self.session.is_ai_thinking() {
                        ("Engine thinking...", TIMER_WARNING)
                    } else if self.session.state.game_over {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_score_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SCORE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            for color in [Color::White, Color::Black] {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(color.name()).size(14.0).color(TEXT_SECONDARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let score = self.session.state.score(color);
                        ui.label(RichText::new(score.to_string()).size(18.0).strong().color(TEXT_PRIMARY));
                    });
                });
            }
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.session.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 0.3 {
                    TIMER_NORMAL
                } else if secs < 0.5 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{:.2}s", secs)).size(28.0).strong().color(color));
            } else {
                let elapsed = self.session.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.session.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last engine move: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Undo (U)").clicked() {
                    self.session.undo();
                }
                if ui.button("Hint (H)").clicked() {
                    self.session.request_suggestion();
                }
                if ui.button("New (N)").clicked() {
                    self.session.reset();
                }
            });
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.session.move_count()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    /// Promotion prompt: one button per capturable piece
    fn render_choice_card(&mut self, ui: &mut egui::Ui) {
        let Some(pending) = self.session.pending_choice.clone() else {
            return;
        };
        let mut picked = None;
        let mut cancel = false;

        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("PROMOTION CAPTURE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Choose which {} to capture", pending.mv.piece.number))
                    .size(12.0)
                    .color(TEXT_PRIMARY),
            );
            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                for &pos in &pending.candidates {
                    if ui.button(pos.to_string()).clicked() {
                        picked = Some(pos);
                    }
                }
            });
            if ui.button("Cancel").clicked() {
                cancel = true;
            }
        });

        if let Some(pos) = picked {
            if let Err(msg) = self.session.choose_capture(pos) {
                self.session.message = Some(msg);
            }
        } else if cancel {
            self.session.cancel_choice();
        }
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("ENGINE").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.session.last_ai_result else {
                    ui.label(RichText::new("Waiting for engine...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.label(
                    RichText::new(format!("{:?}", result.search_type))
                        .size(11.0)
                        .strong()
                        .color(TIMER_NORMAL),
                );
                ui.label(
                    RichText::new(format!(
                        "Score {:+.1}  Depth {}",
                        result.score as f32 / 10.0,
                        result.depth
                    ))
                    .size(10.0)
                    .color(TEXT_SECONDARY),
                );
                ui.label(
                    RichText::new(format!("{} nodes in {}ms", result.nodes, result.time_ms))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
                ui.label(
                    RichText::new(format!(
                        "TT hits {:.0}%  First-move cutoffs {:.0}%",
                        result.stats.tt_score_rate(),
                        result.stats.first_move_rate()
                    ))
                    .size(10.0)
                    .color(TEXT_MUTED),
                );

                if let Some(mv) = result.best_move {
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("-> {mv}")).size(12.0).strong().color(WIN_HIGHLIGHT));
                }
            });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui) {
        let state = &self.session.state;
        let headline = match state.winner() {
            Some(color) => format!("{} WINS", color.name().to_uppercase()),
            None => "DRAW".to_string(),
        };
        let score_line = format!("{} - {}", state.white_score, state.black_score);
        let mut restart = false;

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new(score_line).size(14.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);
                    restart = ui.button("New Game").clicked();
                });
            });

        if restart {
            self.session.reset();
        }
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let targets = self.session.selected_targets();
            let candidates = self
                .session
                .pending_choice
                .as_ref()
                .map(|p| p.candidates.clone())
                .unwrap_or_default();
            let overlay = BoardOverlay {
                selected: self.session.selected,
                targets: &targets,
                last_move: self.session.last_move,
                last_captured: &self.session.last_captured,
                suggested_move: self.session.suggested_move,
                choice_candidates: &candidates,
                interactive: !self.session.state.game_over && self.session.is_human_turn(),
            };

            let clicked = self.board_view.show(ui, &self.session.state.board, &overlay);

            if let Some(pos) = clicked {
                let outcome = if self.session.pending_choice.is_some() {
                    self.session.choose_capture(pos)
                } else {
                    self.session.click(pos)
                };
                if let Err(msg) = outcome {
                    self.session.message = Some(msg);
                }
            }
        });
    }

    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }
            if i.key_pressed(egui::Key::H) {
                self.session.request_suggestion();
            }
            if i.key_pressed(egui::Key::U) {
                self.session.undo();
            }
            if i.key_pressed(egui::Key::N) {
                self.session.reset();
            }
            if i.key_pressed(egui::Key::Escape) {
                self.session.cancel_choice();
                self.session.selected = None;
            }
        });
    }
}

impl eframe::App for Check10App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.session.check_ai_result();

        if self.session.is_ai_turn() && !self.session.is_ai_thinking() && !self.session.state.game_over {
            self.session.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.session.is_ai_thinking() || !self.session.state.game_over {
            ctx.request_repaint();
        }
    }
}
