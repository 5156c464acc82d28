//! Drag-and-drop bookkeeping between columns

use super::card::CardId;

/// Which card is being dragged and which column is highlighted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragged: Option<CardId>,
    hovered: Option<String>,
}

impl DragState {
    /// Record the card picked up by the pointer
    pub fn begin(&mut self, card: CardId) {
        self.dragged = Some(card);
        self.hovered = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// Pointer entered a column while dragging
    pub fn enter(&mut self, column: &str) {
        if self.dragged.is_some() {
            self.hovered = Some(column.to_string());
        }
    }

    /// Pointer left a column. Leaving a column that is not highlighted is a no-op.
    pub fn leave(&mut self, column: &str) {
        if self.hovered.as_deref() == Some(column) {
            self.hovered = None;
        }
    }

    pub fn is_highlighted(&self, column: &str) -> bool {
        self.hovered.as_deref() == Some(column)
    }

    /// Finish the drag over `column`, returning the card and where it goes
    pub fn drop_on(&mut self, column: &str) -> Option<(CardId, String)> {
        self.hovered = None;
        self.dragged.take().map(|card| (card, column.to_string()))
    }

    /// Drag released outside any column
    pub fn cancel(&mut self) {
        self.dragged = None;
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_follows_pointer() {
        let mut drag = DragState::default();
        drag.enter("todo");
        assert!(!drag.is_highlighted("todo"), "no highlight without a drag");

        drag.begin(CardId::new("card1"));
        drag.enter("todo");
        assert!(drag.is_highlighted("todo"));

        drag.enter("done");
        assert!(!drag.is_highlighted("todo"));
        assert!(drag.is_highlighted("done"));

        drag.leave("todo");
        assert!(drag.is_highlighted("done"));
        drag.leave("done");
        assert!(!drag.is_highlighted("done"));
    }

    #[test]
    fn test_drop_returns_card_and_resets() {
        let mut drag = DragState::default();
        drag.begin(CardId::new("card3"));
        drag.enter("done");

        assert_eq!(
            drag.drop_on("done"),
            Some((CardId::new("card3"), "done".to_string()))
        );
        assert!(!drag.is_dragging());
        assert!(!drag.is_highlighted("done"));
        assert_eq!(drag.drop_on("done"), None);
    }

    #[test]
    fn test_cancel() {
        let mut drag = DragState::default();
        drag.begin(CardId::new("card1"));
        drag.enter("todo");
        drag.cancel();
        assert_eq!(drag, DragState::default());
    }
}
