//! Page range resolution
//!
//! Given a date interval and what a board promises about its ordering, the
//! resolver determines which listing pages could contain records inside the
//! interval, spending as few fetches as the ordering guarantee allows:
//! binary boundary search for globally descending boards, a forward scan
//! with per-page date extremes for weakly descending ones, and no search at
//! all for unordered or server-filtered boards.

mod forward;
mod monotonic;

use crate::catalog::DateInterval;
use crate::source::{FetchResult, PageSource};
use serde::Deserialize;
use std::time::Duration;

/// What the resolver may assume about a board's date ordering
///
/// A static property of each board, configured once per source and never
/// derived from observed responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceOrdering {
    /// Page 1 holds the newest records and every page is internally sorted
    /// descending; boundary pages can be binary searched.
    GloballyDescending,

    /// Dates trend descending across pages but single pages may hold
    /// out-of-order entries (pinned notices); only per-page date extremes
    /// are trustworthy.
    WeaklyDescending,

    /// No usable ordering, or the board already filters by date
    /// server-side; every page must be visited.
    Unordered,
}

/// The page range a collection pass must fetch
///
/// Produced once per source and consumed once by assembly; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    /// First page to fetch
    pub start_page: u32,

    /// Last page to fetch; `None` means scan until the empty-page sentinel
    pub end_page: Option<u32>,

    /// The ordering the range was resolved under
    pub strategy: SourceOrdering,
}

impl ResolvedRange {
    /// Whether collection fetches over this range must be paced
    ///
    /// The binary-search strategy issues only a logarithmic number of
    /// fetches and skips pacing; the scanning strategies pace every fetch.
    pub fn paced(&self) -> bool {
        !matches!(self.strategy, SourceOrdering::GloballyDescending)
    }
}

/// Resolves the page range for one source
///
/// # Arguments
///
/// * `source` - The board to probe
/// * `ordering` - The ordering guarantee the board is configured with
/// * `interval` - The date window being collected
/// * `total_pages` - Page count to search within; ignored by `Unordered`
/// * `pacing` - Delay after each fetch of the forward scan
pub async fn resolve<S: PageSource>(
    source: &S,
    ordering: SourceOrdering,
    interval: &DateInterval,
    total_pages: u32,
    pacing: Duration,
) -> FetchResult<ResolvedRange> {
    match ordering {
        SourceOrdering::GloballyDescending => {
            monotonic::locate(source, interval, total_pages).await
        }
        SourceOrdering::WeaklyDescending => {
            forward::locate(source, interval, total_pages, pacing).await
        }
        SourceOrdering::Unordered => Ok(ResolvedRange {
            start_page: 1,
            end_page: None,
            strategy: SourceOrdering::Unordered,
        }),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::five_page_catalog;
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_unordered_resolves_to_unbounded_scan_without_fetching() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2023, 9, 30), date(2023, 12, 15));

        let range = resolve(
            &board,
            SourceOrdering::Unordered,
            &interval,
            1,
            Duration::ZERO,
        )
        .await
        .unwrap();

        assert_eq!(range.start_page, 1);
        assert_eq!(range.end_page, None);
        assert_eq!(board.fetch_count(), 0);
    }

    #[test]
    fn test_only_the_binary_search_strategy_skips_pacing() {
        let bounded = |strategy| ResolvedRange {
            start_page: 1,
            end_page: Some(3),
            strategy,
        };

        assert!(!bounded(SourceOrdering::GloballyDescending).paced());
        assert!(bounded(SourceOrdering::WeaklyDescending).paced());
        assert!(bounded(SourceOrdering::Unordered).paced());
    }
}
