//! Task cards and card id generation

use std::fmt;

/// Prefix used for generated card ids
const ID_PREFIX: &str = "card";

/// Opaque card identifier, unique within a board
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of a generated id (`card12` -> 12)
    pub fn sequence_number(&self) -> Option<u64> {
        self.0.strip_prefix(ID_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single task card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    /// Trimmed, never empty
    pub title: String,
    /// Trimmed, never empty when present
    pub category: Option<String>,
    /// Id of the owning column
    pub list_id: String,
}

impl Card {
    /// Case-insensitive category, empty when the card has none
    pub fn category_lowercase(&self) -> String {
        self.category
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default()
    }
}

/// Normalize free-text input: trim, and treat blank as absent
pub fn normalize_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Monotonic source of `card<N>` ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    /// Seed the sequence one past the largest numeric suffix among `ids`
    pub fn seeded_from<'a>(ids: impl IntoIterator<Item = &'a CardId>) -> Self {
        let next = ids
            .into_iter()
            .filter_map(|id| id.sequence_number()?.checked_add(1))
            .max()
            .unwrap_or(1);
        Self { next }
    }

    /// Hand out the next id. Wraps back to 1 once the counter is exhausted,
    /// so callers must skip ids that are still taken.
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(format!("{}{}", ID_PREFIX, self.next));
        self.next = self.next.checked_add(1).unwrap_or(1);
        id
    }

    /// Make sure future ids stay past `id`
    pub fn observe(&mut self, id: &CardId) {
        if let Some(next) = id.sequence_number().and_then(|n| n.checked_add(1)) {
            self.next = self.next.max(next);
        }
    }
}
