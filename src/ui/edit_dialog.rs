//! Modal dialog for editing a card

use eframe::egui;

use crate::app::TaskboardApp;
use crate::core::board::EditOutcome;

/// Card edit dialog
pub struct EditDialog;

impl EditDialog {
    /// Show the dialog while an edit form is open
    pub fn show(ctx: &egui::Context, app: &mut TaskboardApp) {
        let Some(form) = app.edit_form.as_mut() else {
            return;
        };

        let mut outcome = None;

        egui::Window::new("Edit Task")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("edit_task_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Title:");
                        let title = ui.text_edit_singleline(&mut form.title);
                        if title.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            outcome = Some(EditOutcome::Confirm);
                        }
                        ui.end_row();

                        ui.label("Category:");
                        ui.add(
                            egui::TextEdit::singleline(&mut form.category)
                                .hint_text("Leave empty to remove"),
                        );
                        ui.end_row();
                    });

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        outcome = Some(EditOutcome::Cancel);
                    }
                    if ui.button("Save").clicked() {
                        outcome = Some(EditOutcome::Confirm);
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            outcome = Some(EditOutcome::Cancel);
        }

        if let Some(outcome) = outcome {
            app.finish_edit(outcome);
        }
    }
}
