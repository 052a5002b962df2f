//! Gleaner: a date-windowed notice board collector
//!
//! This crate crawls remote notice boards that expose their records only as
//! numbered pages, resolves the minimal page range covering a caller-supplied
//! date interval, and emits the matching records as markdown lines.

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod resolver;
pub mod source;

use thiserror::Error;

/// Main error type for gleaner operations
#[derive(Debug, Error)]
pub enum GleanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] source::FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("All {0} configured sources failed")]
    AllSourcesFailed(usize),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for gleaner operations
pub type Result<T> = std::result::Result<T, GleanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{CatalogItem, DateInterval, ItemKey, Page};
pub use config::Config;
pub use resolver::{ResolvedRange, SourceOrdering};
pub use source::PageSource;
