//! UI components for Taskboard

pub mod board;
pub mod edit_dialog;
pub mod toolbar;
