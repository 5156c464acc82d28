//! Card search and category filtering
//!
//! Only one filter is active at a time; applying one replaces the other.

use super::board::Board;
use super::card::Card;

/// Active card filter. Build it with [`Filter::search`] or [`Filter::category`],
/// which store the text lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    /// Substring of title or category, case-insensitive
    Search(String),
    /// Exact category, case-insensitive
    Category(String),
}

impl Filter {
    pub fn search(query: &str) -> Self {
        Filter::Search(query.to_lowercase())
    }

    pub fn category(name: &str) -> Self {
        Filter::Category(name.to_lowercase())
    }

    /// Whether `card` is shown under this filter
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            Filter::All => true,
            Filter::Search(query) => {
                card.title.to_lowercase().contains(query.as_str())
                    || card.category_lowercase().contains(query.as_str())
            }
            Filter::Category(name) => name.is_empty() || card.category_lowercase() == *name,
        }
    }
}

/// Distinct categories on the board, sorted for the category picker
pub fn category_options(board: &Board) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for category in board.cards().iter().filter_map(|c| c.category.as_deref()) {
        let key = category.to_lowercase();
        if !options.iter().any(|o| o.to_lowercase() == key) {
            options.push(category.to_string());
        }
    }
    options.sort_by_key(|o| o.to_lowercase());
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Column;

    fn board() -> Board {
        let mut board = Board::new(Column::defaults());
        board.create_card("Write report", "Work", "todo", None).unwrap();
        board.create_card("Buy milk", "", "todo", None).unwrap();
        board.create_card("Fix bike", "home", "done", None).unwrap();
        board.create_card("Team sync", "work", "inprogress", None).unwrap();
        board
    }

    fn visible(board: &Board, filter: &Filter) -> Vec<String> {
        board
            .cards()
            .iter()
            .filter(|c| filter.matches(c))
            .map(|c| c.title.clone())
            .collect()
    }

    #[test]
    fn test_empty_search_shows_everything() {
        let board = board();
        assert_eq!(visible(&board, &Filter::search("")).len(), 4);
        assert_eq!(visible(&board, &Filter::All).len(), 4);
    }

    #[test]
    fn test_search_matches_title_or_category() {
        let board = board();
        assert_eq!(visible(&board, &Filter::search("MILK")), vec!["Buy milk"]);
        assert_eq!(
            visible(&board, &Filter::search("wor")),
            vec!["Write report", "Team sync"]
        );
        assert!(visible(&board, &Filter::search("zebra")).is_empty());
    }

    #[test]
    fn test_category_is_exact_and_case_insensitive() {
        let board = board();
        assert_eq!(
            visible(&board, &Filter::category("WORK")),
            vec!["Write report", "Team sync"]
        );
        assert!(visible(&board, &Filter::category("wor")).is_empty());
        assert_eq!(visible(&board, &Filter::category("")).len(), 4);
    }

    #[test]
    fn test_constructors_store_lowercase() {
        assert_eq!(Filter::search("MiLk"), Filter::Search("milk".to_string()));
        assert_eq!(Filter::category("HOME"), Filter::Category("home".to_string()));
    }

    #[test]
    fn test_category_options_dedup_and_sort() {
        let board = board();
        assert_eq!(category_options(&board), vec!["home", "Work"]);
    }
}
