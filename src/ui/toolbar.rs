//! Toolbar with the add-task form, search box and category filter

use eframe::egui;

use crate::app::TaskboardApp;
use crate::core::filter::category_options;

/// Toolbar panel
pub struct ToolbarPanel;

impl ToolbarPanel {
    /// Show the toolbar
    pub fn show(ui: &mut egui::Ui, app: &mut TaskboardApp) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            Self::show_add_form(ui, app);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                Self::show_category_filter(ui, app);
                Self::show_search(ui, app);
            });
        });
        ui.add_space(4.0);
    }

    fn show_add_form(ui: &mut egui::Ui, app: &mut TaskboardApp) {
        let title = ui.add(
            egui::TextEdit::singleline(&mut app.new_task.title)
                .hint_text("New task...")
                .desired_width(220.0),
        );
        ui.add(
            egui::TextEdit::singleline(&mut app.new_task.category)
                .hint_text("Category (optional)")
                .desired_width(140.0),
        );

        let selected = app
            .board
            .columns()
            .iter()
            .find(|c| c.id == app.new_task.list_id)
            .map(|c| c.title.clone())
            .unwrap_or_default();

        egui::ComboBox::from_id_salt("new_task_column")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for column in app.board.columns() {
                    ui.selectable_value(&mut app.new_task.list_id, column.id.clone(), column.title.as_str());
                }
            });

        let submitted = title.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Add").clicked() || submitted {
            app.add_task();
            if submitted {
                title.request_focus();
            }
        }
    }

    fn show_search(ui: &mut egui::Ui, app: &mut TaskboardApp) {
        let mut query = app.search_text.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("\u{1F50D} Search tasks")
                .desired_width(200.0),
        );

        if app.focus_search {
            response.request_focus();
            app.focus_search = false;
        }

        if response.changed() {
            app.set_search(&query);
        }
    }

    fn show_category_filter(ui: &mut egui::Ui, app: &mut TaskboardApp) {
        let mut selected = app.selected_category.clone();
        let label = if selected.is_empty() {
            "All Categories".to_string()
        } else {
            selected.clone()
        };

        egui::ComboBox::from_id_salt("category_filter")
            .selected_text(label)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, String::new(), "All Categories");
                for category in category_options(&app.board) {
                    let text = category.clone();
                    ui.selectable_value(&mut selected, category, text);
                }
            });

        if selected != app.selected_category {
            app.set_category(&selected);
        }
    }
}
