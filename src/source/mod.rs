//! Page sources
//!
//! A page source turns a page index into a parsed [`Page`]. The production
//! implementation drives a remote notice board over HTTP; tests script
//! in-memory boards behind the same trait.

mod board;
mod extract;

pub use board::{build_http_client, HttpBoardSource};
pub use extract::{parse_listing, parse_total_pages, Listing};

use crate::catalog::Page;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while fetching or reading a listing page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for page {page} failed: {source}")]
    Http {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("page {page} returned HTTP {status}")]
    Status { page: u32, status: u16 },

    #[error("invalid CSS selector `{0}`")]
    Selector(String),
}

/// Result type alias for page source operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// A remote catalog exposed only as numbered pages
///
/// `fetch` must be deterministic for a fixed index within one crawl run.
/// A page with no items is the end-of-catalog signal; any transport or
/// status failure is fatal for the crawl of that source.
#[async_trait]
pub trait PageSource {
    async fn fetch(&self, page_index: u32) -> FetchResult<Page>;
}
