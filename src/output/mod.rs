//! Report output
//!
//! Renders collected records as markdown lines, grouped under one section
//! heading per source.

mod markdown;

pub use markdown::{format_item, render_report, write_report};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
