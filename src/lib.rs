pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::geoportal::GeoportalClient;
pub use adapters::telegram::TelegramClient;
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::bot::BotEngine;
pub use utils::error::{BotError, Result};
