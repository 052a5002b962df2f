//! Configuration loading and validation
//!
//! Gleaner is driven by a TOML file: one `[crawl]` window, one `[output]`
//! target, and a `[[source]]` table per remote board describing how to page
//! through it and how to read its listing markup.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{
    Config, CrawlConfig, DateFilterConfig, LinkRule, OutputConfig, PaginationConfig,
    PaginationMode, SelectorConfig, SourceConfig,
};
pub use validation::validate;
