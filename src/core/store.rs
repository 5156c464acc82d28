//! Persistence of the card set
//!
//! The whole board is written as one JSON array under a single key every time
//! it changes. There is no partial update and no versioning of the layout.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::board::Board;
use super::card::{normalize_text, Card};

/// Key under which the card snapshot is stored
pub const TASKS_KEY: &str = "kanbanTasks";

/// Persisted shape of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCard {
    pub id: String,
    pub title: String,
    /// Written as `""` when absent
    #[serde(
        default,
        serialize_with = "category_to_text",
        deserialize_with = "category_from_text"
    )]
    pub category: Option<String>,
    #[serde(rename = "listId")]
    pub list_id: String,
}

impl StoredCard {
    #[allow(dead_code)]
    pub fn new(id: &str, title: &str, category: Option<&str>, list_id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category: category.map(str::to_string),
            list_id: list_id.to_string(),
        }
    }
}

impl From<&Card> for StoredCard {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.to_string(),
            title: card.title.clone(),
            category: card.category.clone(),
            list_id: card.list_id.clone(),
        }
    }
}

fn category_to_text<S: Serializer>(category: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(category.as_deref().unwrap_or(""))
}

fn category_from_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(normalize_text))
}

/// String key-value store
pub trait KeyValueStore {
    /// Read a value; `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store keeping one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform data directory
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "taskboard", "Taskboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::new(dirs.data_dir()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store file: {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create store directory: {}", self.dir.display()))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("Failed to write: {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("Failed to replace: {}", path.display()))?;
        Ok(())
    }
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Write the full board snapshot
pub fn save_cards(store: &mut dyn KeyValueStore, board: &Board) -> Result<()> {
    let records = board.to_records();
    let content = serde_json::to_string(&records)?;
    store.set(TASKS_KEY, &content)?;
    tracing::debug!("Saved {} cards", records.len());
    Ok(())
}

/// Read the stored snapshot. Anything missing or unreadable yields an empty set.
pub fn load_cards(store: &dyn KeyValueStore) -> Vec<StoredCard> {
    let content = match store.get(TASKS_KEY) {
        Ok(Some(content)) => content,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read stored cards: {:#}", e);
            return Vec::new();
        }
    };

    match parse_records(&content) {
        Ok(records) => {
            tracing::info!("Loaded {} cards", records.len());
            records
        }
        Err(e) => {
            tracing::warn!("Stored cards are corrupt, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// A `null` document counts as empty
fn parse_records(content: &str) -> serde_json::Result<Vec<StoredCard>> {
    let records: Option<Vec<StoredCard>> = serde_json::from_str(content)?;
    Ok(records.unwrap_or_default())
}

/// Write the snapshot to a standalone JSON file
pub fn export_to(path: &Path, board: &Board) -> Result<()> {
    let content = serde_json::to_string_pretty(&board.to_records())?;
    fs::write(path, content).with_context(|| format!("Failed to export to: {}", path.display()))?;
    tracing::info!("Exported {} cards to: {}", board.len(), path.display());
    Ok(())
}

/// Read a snapshot previously written by [`export_to`]
pub fn import_from(path: &Path) -> Result<Vec<StoredCard>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    let records = parse_records(&content)
        .with_context(|| format!("Not a card export: {}", path.display()))?;
    tracing::info!("Imported {} cards from: {}", records.len(), path.display());
    Ok(records)
}
