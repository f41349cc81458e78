//! Configuration management module
//!
//! Loads adapter settings from environment variables and `.env` files

pub mod settings;

pub use settings::{LoggingConfig, ProviderSettings, Settings};
