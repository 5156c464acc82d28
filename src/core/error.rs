//! Board errors

/// Errors raised by board mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Card title must not be empty")]
    EmptyTitle,

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Card id already in use: {0}")]
    DuplicateId(String),
}
