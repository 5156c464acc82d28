//! Board model: columns, cards and their lifecycle
//!
//! The board is the single source of truth for what is shown. Every mutating
//! method either succeeds completely or leaves the board untouched.

use serde::{Deserialize, Serialize};

use super::card::{normalize_text, Card, CardId, IdSequence};
use super::error::BoardError;
use super::store::StoredCard;

/// A board column (list)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Stable identifier, referenced by `Card::list_id`
    pub id: String,
    /// Header text
    pub title: String,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// The To Do / In Progress / Done layout
    pub fn defaults() -> Vec<Column> {
        vec![
            Column::new("todo", "To Do"),
            Column::new("inprogress", "In Progress"),
            Column::new("done", "Done"),
        ]
    }
}

/// Kanban board state
#[derive(Debug, Clone)]
pub struct Board {
    columns: Vec<Column>,
    /// Cards in display order; per column, order of insertion
    cards: Vec<Card>,
    ids: IdSequence,
}

impl Board {
    /// Create an empty board. An empty column list falls back to the defaults.
    pub fn new(columns: Vec<Column>) -> Self {
        let columns = if columns.is_empty() {
            Column::defaults()
        } else {
            columns
        };

        Self {
            columns,
            cards: Vec::new(),
            ids: IdSequence::default(),
        }
    }

    /// Rebuild a board from persisted records.
    ///
    /// Records with a blank title or a repeated id are dropped. Records that
    /// point at a column this board does not have land in the first column.
    pub fn from_records(columns: Vec<Column>, records: Vec<StoredCard>) -> Self {
        let mut board = Self::new(columns);
        let fallback = board.columns[0].id.clone();

        for record in records {
            let list_id = if board.has_column(&record.list_id) {
                record.list_id
            } else {
                tracing::warn!(
                    "Card {} references unknown column '{}', moving it to '{}'",
                    record.id,
                    record.list_id,
                    fallback
                );
                fallback.clone()
            };

            let id = CardId::new(record.id);
            let category = record.category.unwrap_or_default();
            if let Err(e) = board.create_card(&record.title, &category, &list_id, Some(id.clone())) {
                tracing::warn!("Skipping stored card {}: {}", id, e);
            }
        }

        board.ids = IdSequence::seeded_from(board.cards.iter().map(|c| &c.id));
        board
    }

    /// Full snapshot, column by column in display order
    pub fn to_records(&self) -> Vec<StoredCard> {
        self.columns
            .iter()
            .flat_map(|column| self.cards_in(&column.id))
            .map(StoredCard::from)
            .collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn has_column(&self, list_id: &str) -> bool {
        self.columns.iter().any(|c| c.id == list_id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Cards of one column in display order
    pub fn cards_in<'a>(&'a self, list_id: &'a str) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |c| c.list_id == list_id)
    }

    fn position(&self, id: &CardId) -> Result<usize, BoardError> {
        self.cards
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| BoardError::UnknownCard(id.to_string()))
    }

    fn require_column(&self, list_id: &str) -> Result<(), BoardError> {
        if self.has_column(list_id) {
            Ok(())
        } else {
            Err(BoardError::UnknownColumn(list_id.to_string()))
        }
    }

    /// Create a card at the end of `list_id`. A fresh id is assigned when `id` is `None`.
    pub fn create_card(
        &mut self,
        title: &str,
        category: &str,
        list_id: &str,
        id: Option<CardId>,
    ) -> Result<CardId, BoardError> {
        let title = normalize_text(title).ok_or(BoardError::EmptyTitle)?;
        self.require_column(list_id)?;

        let id = match id {
            Some(id) => {
                if self.card(&id).is_some() {
                    return Err(BoardError::DuplicateId(id.to_string()));
                }
                self.ids.observe(&id);
                id
            }
            None => self.next_free_id(),
        };

        self.cards.push(Card {
            id: id.clone(),
            title,
            category: normalize_text(category),
            list_id: list_id.to_string(),
        });

        Ok(id)
    }

    fn next_free_id(&mut self) -> CardId {
        loop {
            let id = self.ids.next_id();
            if self.card(&id).is_none() {
                return id;
            }
        }
    }

    /// Apply an edit. A blank title keeps the current one; a blank category removes it.
    pub fn edit_card(&mut self, id: &CardId, title: &str, category: &str) -> Result<(), BoardError> {
        let index = self.position(id)?;
        let card = &mut self.cards[index];

        if let Some(title) = normalize_text(title) {
            card.title = title;
        }
        card.category = normalize_text(category);
        Ok(())
    }

    /// Remove a card
    pub fn delete_card(&mut self, id: &CardId) -> Result<Card, BoardError> {
        let index = self.position(id)?;
        Ok(self.cards.remove(index))
    }

    /// Reparent a card, appending it to the end of `list_id`
    pub fn move_card(&mut self, id: &CardId, list_id: &str) -> Result<(), BoardError> {
        self.require_column(list_id)?;
        let index = self.position(id)?;

        let mut card = self.cards.remove(index);
        card.list_id = list_id.to_string();
        self.cards.push(card);
        Ok(())
    }
}

/// In-progress edit of a single card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub card_id: CardId,
    pub title: String,
    pub category: String,
}

/// What the user did with the edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Confirm,
    Cancel,
}

impl EditForm {
    /// Open a form pre-filled with the card's current values
    pub fn open(card: &Card) -> Self {
        Self {
            card_id: card.id.clone(),
            title: card.title.clone(),
            category: card.category.clone().unwrap_or_default(),
        }
    }

    /// Write the form back to the board
    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        board.edit_card(&self.card_id, &self.title, &self.category)
    }
}
