//! Taskboard - kanban task board
//!
//! Cards live in columns, can be dragged between them, searched and filtered
//! by category. The board is saved after every change.

mod app;
mod core;
mod ui;

use app::TaskboardApp;
use crate::core::config::AppConfig;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Taskboard...");

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.ui.window_size)
            .with_min_inner_size([640.0, 400.0])
            .with_title("Taskboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Taskboard",
        native_options,
        Box::new(|cc| Ok(Box::new(TaskboardApp::new(cc, config)))),
    )
}
