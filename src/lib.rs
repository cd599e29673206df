pub mod catalog;
pub mod cli;
pub mod commands;
pub mod deck_order;
pub mod error_handling;
pub mod render;
pub mod ui;

/// Card database used when neither `--catalog` nor the environment name one.
pub const DEFAULT_CATALOG: &str = "data/cards.json";

/// Environment variable naming the card database.
pub const CATALOG_ENV: &str = "HS_CATALOG";
