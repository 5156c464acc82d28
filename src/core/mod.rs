//! Core board model, persistence, filtering and configuration

pub mod board;
pub mod card;
pub mod config;
pub mod drag;
pub mod error;
pub mod filter;
pub mod store;
pub mod view;
