//! Board columns, cards and drag-and-drop between columns

use eframe::egui;

use crate::app::TaskboardApp;
use crate::core::card::{Card, CardId};
use crate::core::view::ColumnView;

/// Something the user did while the board was drawn.
/// Applied after drawing, once the board is no longer borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BoardAction {
    Edit(CardId),
    Delete(CardId),
    DragStarted(CardId),
    Hover { column: String, inside: bool },
    Drop { column: String, payload: CardId },
    CancelDrag,
}

/// Board panel
pub struct BoardPanel;

impl BoardPanel {
    /// Show all columns side by side
    pub fn show(ui: &mut egui::Ui, app: &mut TaskboardApp) {
        let mut actions = Vec::new();

        {
            let view = app.view();
            let width = app.config.ui.column_width;

            egui::ScrollArea::horizontal()
                .id_salt("board_scroll")
                .show(ui, |ui| {
                    ui.horizontal_top(|ui| {
                        for column in &view.columns {
                            let highlighted = app.drag.is_highlighted(&column.column.id);
                            Self::show_column(
                                ui,
                                column,
                                width,
                                highlighted,
                                app.drag.is_dragging(),
                                &mut actions,
                            );
                        }
                    });
                });
        }

        let dropped = actions.iter().any(|a| matches!(a, BoardAction::Drop { .. }));
        if app.drag.is_dragging() && !dropped && ui.input(|i| i.pointer.any_released()) {
            actions.push(BoardAction::CancelDrag);
        }

        for action in actions {
            Self::apply(app, action);
        }
    }

    fn apply(app: &mut TaskboardApp, action: BoardAction) {
        match action {
            BoardAction::Edit(id) => app.begin_edit(&id),
            BoardAction::Delete(id) => app.delete_card(&id),
            BoardAction::DragStarted(id) => app.drag.begin(id),
            BoardAction::Hover { column, inside } => {
                if inside {
                    app.drag.enter(&column);
                } else {
                    app.drag.leave(&column);
                }
            }
            BoardAction::Drop { column, payload } => app.drop_card(&column, payload),
            BoardAction::CancelDrag => app.drag.cancel(),
        }
    }

    /// Show one column and register it as a drop target
    fn show_column(
        ui: &mut egui::Ui,
        column: &ColumnView<'_>,
        width: f32,
        highlighted: bool,
        dragging: bool,
        actions: &mut Vec<BoardAction>,
    ) {
        let visuals = ui.visuals();
        let fill = if highlighted {
            visuals.selection.bg_fill.gamma_multiply(0.35)
        } else {
            visuals.faint_bg_color
        };

        let frame = egui::Frame::group(ui.style())
            .fill(fill)
            .inner_margin(egui::Margin::same(8));

        let response = frame
            .show(ui, |ui| {
                ui.set_width(width);
                ui.set_min_height(ui.available_height().max(200.0));

                ui.horizontal(|ui| {
                    ui.strong(column.column.title.as_str());
                    let count = if column.cards.len() == column.total {
                        column.total.to_string()
                    } else {
                        format!("{}/{}", column.cards.len(), column.total)
                    };
                    ui.weak(count);
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .id_salt(("column_scroll", column.column.id.as_str()))
                    .show(ui, |ui| {
                        for card in &column.cards {
                            Self::show_card(ui, card, actions);
                            ui.add_space(4.0);
                        }
                    });
            })
            .response;

        if dragging {
            actions.push(BoardAction::Hover {
                column: column.column.id.clone(),
                inside: response.contains_pointer(),
            });
        }

        if let Some(payload) = response.dnd_release_payload::<CardId>() {
            actions.push(BoardAction::Drop {
                column: column.column.id.clone(),
                payload: (*payload).clone(),
            });
        }
    }

    /// Show a draggable card
    fn show_card(ui: &mut egui::Ui, card: &Card, actions: &mut Vec<BoardAction>) {
        let id = egui::Id::new(("card", card.id.as_str()));

        let response = ui
            .dnd_drag_source(id, card.id.clone(), |ui| {
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.add(egui::Label::new(card.title.as_str()).wrap());
                                if let Some(category) = &card.category {
                                    ui.label(
                                        egui::RichText::new(category.as_str())
                                            .small()
                                            .color(ui.visuals().hyperlink_color),
                                    );
                                }
                            });

                            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                                if ui.small_button("\u{1F5D1}").on_hover_text("Delete").clicked() {
                                    actions.push(BoardAction::Delete(card.id.clone()));
                                }
                                if ui.small_button("\u{270F}").on_hover_text("Edit").clicked() {
                                    actions.push(BoardAction::Edit(card.id.clone()));
                                }
                            });
                        });
                    });
            })
            .response;

        if response.drag_started() {
            actions.push(BoardAction::DragStarted(card.id.clone()));
        }
    }
}
