//! What the board looks like under a filter

use super::board::{Board, Column};
use super::card::Card;
use super::filter::Filter;

/// One column as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    /// Visible cards in display order
    pub cards: Vec<&'a Card>,
    /// All cards in the column, hidden ones included
    pub total: usize,
}

/// The whole board as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    pub columns: Vec<ColumnView<'a>>,
}

impl<'a> BoardView<'a> {
    pub fn project(board: &'a Board, filter: &Filter) -> Self {
        let columns = board
            .columns()
            .iter()
            .map(|column| {
                let mut total = 0;
                let cards = board
                    .cards_in(&column.id)
                    .inspect(|_| total += 1)
                    .filter(|card| filter.matches(card))
                    .collect();
                ColumnView {
                    column,
                    cards,
                    total,
                }
            })
            .collect();

        Self { columns }
    }

    #[allow(dead_code)]
    pub fn visible_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_follows_columns_and_filter() {
        let mut board = Board::new(Column::defaults());
        board.create_card("Alpha", "x", "done", None).unwrap();
        board.create_card("Beta", "y", "todo", None).unwrap();
        board.create_card("Gamma", "x", "done", None).unwrap();

        let view = BoardView::project(&board, &Filter::category("X"));
        let ids: Vec<_> = view.columns.iter().map(|c| c.column.id.as_str()).collect();
        assert_eq!(ids, vec!["todo", "inprogress", "done"]);

        assert!(view.columns[0].cards.is_empty());
        assert_eq!(view.columns[0].total, 1);
        let done: Vec<_> = view.columns[2].cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(done, vec!["Alpha", "Gamma"]);
        assert_eq!(view.visible_count(), 2);
    }

    #[test]
    fn test_deleted_card_leaves_view() {
        let mut board = Board::new(Column::defaults());
        let id = board.create_card("Temp", "", "todo", None).unwrap();
        board.delete_card(&id).unwrap();
        assert_eq!(BoardView::project(&board, &Filter::All).visible_count(), 0);
    }
}
