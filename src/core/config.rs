//! Application configuration management

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::board::Column;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Board columns, left to right
    pub columns: Vec<Column>,
    /// Where the card store lives; platform data dir when unset
    pub storage_dir: Option<PathBuf>,
    /// Last file used for export or import
    pub last_export: Option<PathBuf>,
    /// UI settings
    pub ui: UiConfig,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (light/dark)
    pub theme: String,
    /// Width of a board column
    pub column_width: f32,
    /// Initial window size
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            columns: Column::defaults(),
            storage_dir: None,
            last_export: None,
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            column_width: 280.0,
            window_size: [1100.0, 700.0],
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "taskboard", "Taskboard")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_json(&content)
    }

    /// Parse configuration, repairing an empty or duplicated column list
    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(content)?;
        if config.columns.is_empty() {
            tracing::warn!("Config has no columns, using the default layout");
            config.columns = Column::defaults();
        }

        let mut seen = HashSet::new();
        config.columns.retain(|column| {
            let first = seen.insert(column.id.clone());
            if !first {
                tracing::warn!("Ignoring duplicate column id '{}' in config", column.id);
            }
            first
        });
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    pub fn dark_mode(&self) -> bool {
        !self.ui.theme.eq_ignore_ascii_case("light")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_json(r#"{"ui": {"theme": "light"}}"#).unwrap();
        assert_eq!(config.columns, Column::defaults());
        assert!(!config.dark_mode());
        assert_eq!(config.ui.column_width, 280.0);
    }

    #[test]
    fn test_empty_columns_repaired() {
        let config = AppConfig::from_json(r#"{"columns": []}"#).unwrap();
        assert_eq!(config.columns.len(), 3);
    }

    #[test]
    fn test_duplicate_column_ids_keep_first() {
        let config = AppConfig::from_json(
            r#"{"columns": [
                {"id": "todo", "title": "To Do"},
                {"id": "done", "title": "Done"},
                {"id": "todo", "title": "Again"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            config.columns,
            vec![Column::new("todo", "To Do"), Column::new("done", "Done")]
        );
    }

    #[test]
    fn test_custom_columns() {
        let config = AppConfig::from_json(
            r#"{"columns": [{"id": "backlog", "title": "Backlog"}, {"id": "done", "title": "Done"}]}"#,
        )
        .unwrap();
        assert_eq!(config.columns[0], Column::new("backlog", "Backlog"));
        assert!(config.dark_mode());
    }
}
