//! Main application state and UI coordination

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::core::board::{Board, EditForm, EditOutcome};
use crate::core::card::CardId;
use crate::core::config::AppConfig;
use crate::core::drag::DragState;
use crate::core::error::BoardError;
use crate::core::filter::{category_options, Filter};
use crate::core::store::{self, FileStore, KeyValueStore, MemoryStore, StoredCard};
use crate::core::view::BoardView;
use crate::ui::{board::BoardPanel, edit_dialog::EditDialog, toolbar::ToolbarPanel};

/// Contents of the "add task" form
#[derive(Debug, Clone, Default)]
pub struct NewTaskForm {
    pub title: String,
    pub category: String,
    /// Target column
    pub list_id: String,
}

/// Main application state
pub struct TaskboardApp {
    /// Application configuration
    pub config: AppConfig,
    /// The board; everything on screen is derived from it
    pub board: Board,
    /// Card persistence
    store: Box<dyn KeyValueStore>,
    /// Active filter, set by whichever control changed last
    pub filter: Filter,
    /// Search box contents
    pub search_text: String,
    /// Selected category, empty for all
    pub selected_category: String,
    /// Add-task form
    pub new_task: NewTaskForm,
    /// Card currently being edited
    pub edit_form: Option<EditForm>,
    /// Drag-and-drop state
    pub drag: DragState,
    /// Move keyboard focus to the search box on the next frame
    pub focus_search: bool,
    /// Last error worth telling the user about
    pub status: Option<String>,
}

impl TaskboardApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let visuals = if config.dark_mode() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        cc.egui_ctx.set_visuals(visuals);

        let store: Box<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => Box::new(FileStore::new(dir)),
            None => match FileStore::open_default() {
                Ok(store) => {
                    tracing::info!("Storing cards in: {}", store.dir().display());
                    Box::new(store)
                }
                Err(e) => {
                    tracing::error!("{}; changes will not survive a restart", e);
                    Box::new(MemoryStore::new())
                }
            },
        };

        Self::with_store(config, store)
    }

    /// Build the application around an already opened store
    pub fn with_store(config: AppConfig, store: Box<dyn KeyValueStore>) -> Self {
        let board = Board::from_records(config.columns.clone(), store::load_cards(store.as_ref()));
        let list_id = board.columns()[0].id.clone();

        Self {
            config,
            board,
            store,
            filter: Filter::All,
            search_text: String::new(),
            selected_category: String::new(),
            new_task: NewTaskForm {
                list_id,
                ..Default::default()
            },
            edit_form: None,
            drag: DragState::default(),
            focus_search: false,
            status: None,
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Current projection of the board
    pub fn view(&self) -> BoardView<'_> {
        BoardView::project(&self.board, &self.filter)
    }

    /// Persist the full board
    pub fn commit(&mut self) {
        if let Err(e) = store::save_cards(self.store.as_mut(), &self.board) {
            tracing::error!("Failed to save cards: {:#}", e);
            self.status = Some(format!("Could not save: {}", e));
        }
    }

    /// Create a card from the add-task form. Blank titles are ignored.
    pub fn add_task(&mut self) -> Option<CardId> {
        let form = &self.new_task;
        match self.board.create_card(&form.title, &form.category, &form.list_id, None) {
            Ok(id) => {
                tracing::info!("Created card {}", id);
                self.new_task.title.clear();
                self.new_task.category.clear();
                self.commit();
                Some(id)
            }
            Err(BoardError::EmptyTitle) => None,
            Err(e) => {
                tracing::warn!("Could not create card: {}", e);
                None
            }
        }
    }

    /// Open the edit form for a card, replacing any open form
    pub fn begin_edit(&mut self, id: &CardId) {
        self.edit_form = self.board.card(id).map(EditForm::open);
    }

    /// Close the edit form, applying it on confirm
    pub fn finish_edit(&mut self, outcome: EditOutcome) {
        let Some(form) = self.edit_form.take() else {
            return;
        };

        if outcome == EditOutcome::Cancel {
            return;
        }

        match form.apply(&mut self.board) {
            Ok(()) => {
                self.drop_stale_category();
                self.commit();
            }
            Err(e) => tracing::warn!("Edit discarded: {}", e),
        }
    }

    pub fn delete_card(&mut self, id: &CardId) {
        match self.board.delete_card(id) {
            Ok(card) => {
                tracing::info!("Deleted card {}", card.id);
                if self.edit_form.as_ref().is_some_and(|f| &f.card_id == id) {
                    self.edit_form = None;
                }
                self.drop_stale_category();
                self.commit();
            }
            Err(e) => tracing::warn!("Delete failed: {}", e),
        }
    }

    /// Drop the dragged card onto `column`. `payload` is the card carried by the pointer.
    pub fn drop_card(&mut self, column: &str, payload: CardId) {
        let (card, list_id) = self
            .drag
            .drop_on(column)
            .unwrap_or_else(|| (payload, column.to_string()));

        match self.board.move_card(&card, &list_id) {
            Ok(()) => {
                tracing::debug!("Moved card {} to {}", card, list_id);
                self.commit();
            }
            Err(e) => tracing::warn!("Move failed: {}", e),
        }
    }

    /// Search box changed
    pub fn set_search(&mut self, query: &str) {
        self.search_text = query.to_string();
        self.filter = Filter::search(query);
    }

    /// Category picker changed
    pub fn set_category(&mut self, category: &str) {
        self.selected_category = category.to_string();
        self.filter = Filter::category(category);
    }

    /// Fall back to all categories once no card carries the selected one
    fn drop_stale_category(&mut self) {
        if self.selected_category.is_empty() {
            return;
        }

        let selected = self.selected_category.to_lowercase();
        if category_options(&self.board).iter().any(|c| c.to_lowercase() == selected) {
            return;
        }

        tracing::debug!("Category '{}' no longer in use", self.selected_category);
        self.selected_category.clear();
        if matches!(self.filter, Filter::Category(_)) {
            self.filter = Filter::All;
        }
    }

    /// Write the board to a user-chosen file
    pub fn export_to(&mut self, path: PathBuf) {
        match store::export_to(&path, &self.board) {
            Ok(()) => self.remember_export(path),
            Err(e) => {
                tracing::error!("Export failed: {:#}", e);
                self.status = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Replace the board with the contents of an exported file
    pub fn import_from(&mut self, path: PathBuf) {
        match store::import_from(&path) {
            Ok(records) => {
                self.replace_cards(records);
                self.remember_export(path);
            }
            Err(e) => {
                tracing::error!("Import failed: {:#}", e);
                self.status = Some(format!("Import failed: {}", e));
            }
        }
    }

    /// Swap in a new card set and persist it
    pub fn replace_cards(&mut self, records: Vec<StoredCard>) {
        self.board = Board::from_records(self.config.columns.clone(), records);
        self.edit_form = None;
        self.drag.cancel();
        self.drop_stale_category();
        self.commit();
    }

    fn remember_export(&mut self, path: PathBuf) {
        self.config.last_export = Some(path);
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    fn export_dialog(&self) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new().add_filter("JSON", &["json"]);
        match self.config.last_export.as_deref().and_then(Path::parent) {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export...").clicked() {
                        if let Some(path) = self.export_dialog().set_file_name("tasks.json").save_file() {
                            self.export_to(path);
                        }
                        ui.close();
                    }
                    if ui.button("Import...").clicked() {
                        if let Some(path) = self.export_dialog().pick_file() {
                            self.import_from(path);
                        }
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }
}

impl eframe::App for TaskboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        ctx.input(|i| {
            if i.modifiers.command && i.key_pressed(egui::Key::F) {
                self.focus_search = true;
            }
        });

        self.render_menu_bar(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ToolbarPanel::show(ui, self);
        });

        if let Some(status) = self.status.clone() {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, status);
                    if ui.small_button("\u{2715}").clicked() {
                        self.status = None;
                    }
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            BoardPanel::show(ui, self);
        });

        EditDialog::show(ctx, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::load_cards;

    fn app() -> TaskboardApp {
        TaskboardApp::with_store(AppConfig::default(), Box::new(MemoryStore::new()))
    }

    fn add(app: &mut TaskboardApp, title: &str, category: &str, list_id: &str) -> Option<CardId> {
        app.new_task = NewTaskForm {
            title: title.to_string(),
            category: category.to_string(),
            list_id: list_id.to_string(),
        };
        app.add_task()
    }

    #[test]
    fn test_add_task_persists_and_clears_form() {
        let mut app = app();
        let id = add(&mut app, "Water plants", "home", "todo").unwrap();

        assert!(app.new_task.title.is_empty());
        assert!(app.new_task.category.is_empty());
        assert_eq!(app.new_task.list_id, "todo");

        let stored = load_cards(app.store());
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id.as_str());
    }

    #[test]
    fn test_blank_title_is_ignored() {
        let mut app = app();
        assert_eq!(add(&mut app, "   ", "home", "todo"), None);
        assert!(app.board.is_empty());
        // the form keeps what the user typed
        assert_eq!(app.new_task.category, "home");
        assert!(app.store().get(store::TASKS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_edit_confirm_and_cancel() {
        let mut app = app();
        let id = add(&mut app, "Draft", "work", "todo").unwrap();

        app.begin_edit(&id);
        app.edit_form.as_mut().unwrap().title = "Discarded".to_string();
        app.finish_edit(EditOutcome::Cancel);
        assert!(app.edit_form.is_none());
        assert_eq!(app.board.card(&id).unwrap().title, "Draft");

        app.begin_edit(&id);
        let form = app.edit_form.as_mut().unwrap();
        form.title = "Final".to_string();
        form.category = String::new();
        app.finish_edit(EditOutcome::Confirm);

        let stored = load_cards(app.store());
        assert_eq!(stored[0].title, "Final");
        assert_eq!(stored[0].category, None);
    }

    #[test]
    fn test_drag_and_drop_moves_card() {
        let mut app = app();
        let id = add(&mut app, "Review", "", "todo").unwrap();

        app.drag.begin(id.clone());
        app.drag.enter("done");
        app.drop_card("done", id.clone());

        assert!(!app.drag.is_dragging());
        let stored = load_cards(app.store());
        assert_eq!(stored[0].list_id, "done");
    }

    #[test]
    fn test_delete_closes_edit_form() {
        let mut app = app();
        let id = add(&mut app, "Old", "", "todo").unwrap();
        app.begin_edit(&id);

        app.delete_card(&id);
        assert!(app.edit_form.is_none());
        assert!(load_cards(app.store()).is_empty());
        assert_eq!(app.view().visible_count(), 0);
    }

    #[test]
    fn test_last_filter_wins() {
        let mut app = app();
        add(&mut app, "Buy milk", "errands", "todo");
        add(&mut app, "Fix bike", "home", "todo");

        app.set_search("milk");
        assert_eq!(app.view().visible_count(), 1);

        app.set_category("HOME");
        let view = app.view();
        assert_eq!(view.columns[0].cards[0].title, "Fix bike");
        assert_eq!(view.visible_count(), 1);

        app.set_search("");
        assert_eq!(app.view().visible_count(), 2);
    }

    #[test]
    fn test_imported_file_replaces_board() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        let mut source = app();
        add(&mut source, "Imported", "travel", "done");
        store::export_to(&path, &source.board).unwrap();

        let mut app = app();
        let old = add(&mut app, "Local", "", "todo").unwrap();
        app.begin_edit(&old);
        app.drag.begin(old.clone());
        app.drag.enter("done");

        app.replace_cards(store::import_from(&path).unwrap());

        assert_eq!(app.board.len(), 1);
        assert_eq!(app.board.cards()[0].title, "Imported");
        assert!(app.edit_form.is_none());
        assert!(!app.drag.is_dragging());
        assert!(!app.drag.is_highlighted("done"));

        let stored = load_cards(app.store());
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Imported");
        assert_eq!(stored[0].list_id, "done");
    }

    #[test]
    fn test_selected_category_resets_when_last_card_goes() {
        let mut app = app();
        let id = add(&mut app, "Pack bags", "travel", "todo").unwrap();
        add(&mut app, "Call plumber", "home", "todo");

        app.set_category("Travel");
        assert_eq!(app.view().visible_count(), 1);

        app.begin_edit(&id);
        app.edit_form.as_mut().unwrap().category = "home".to_string();
        app.finish_edit(EditOutcome::Confirm);

        assert!(app.selected_category.is_empty());
        assert_eq!(app.filter, Filter::All);
        assert_eq!(app.view().visible_count(), 2);

        app.set_category("home");
        app.delete_card(&id);
        assert_eq!(app.selected_category, "home");
        assert_eq!(app.filter, Filter::category("home"));
    }

    #[test]
    fn test_search_survives_category_cleanup() {
        let mut app = app();
        let id = add(&mut app, "Pack bags", "travel", "todo").unwrap();
        app.set_category("travel");
        app.set_search("bags");

        app.delete_card(&id);
        assert!(app.selected_category.is_empty());
        assert_eq!(app.filter, Filter::search("bags"));
    }

    #[test]
    fn test_reload_restores_board_and_sequence() {
        let mut first = app();
        add(&mut first, "One", "", "todo");
        add(&mut first, "Two", "x", "inprogress");
        let raw = first.store().get(store::TASKS_KEY).unwrap().unwrap();

        let mut kv = MemoryStore::new();
        kv.set(store::TASKS_KEY, &raw).unwrap();
        let mut second = TaskboardApp::with_store(AppConfig::default(), Box::new(kv));

        assert_eq!(second.board.cards(), first.board.cards());
        let id = add(&mut second, "Three", "", "done").unwrap();
        assert_eq!(id.as_str(), "card3");
    }
}
