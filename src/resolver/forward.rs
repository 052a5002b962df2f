//! Forward boundary scan for weakly descending boards
//!
//! Boards that pin notices or otherwise shuffle entries inside a page break
//! the single-record monotonicity a binary search needs. Their pages still
//! trend descending, so each page's minimum and maximum date act as a
//! per-page interval: scan ascending, note where the window's newer edge
//! first fits and where its older edge falls out, and stop early once both
//! are known.

use crate::catalog::DateInterval;
use crate::resolver::{ResolvedRange, SourceOrdering};
use crate::source::{FetchResult, PageSource};
use std::time::Duration;

/// Scans pages `1..=total_pages` for the interval's boundary pages
///
/// Every fetch is followed by the pacing delay, whether or not it advanced
/// a boundary. A scan that exhausts the catalog without settling a boundary
/// falls back to the full range.
pub async fn locate<S: PageSource>(
    source: &S,
    interval: &DateInterval,
    total_pages: u32,
    pacing: Duration,
) -> FetchResult<ResolvedRange> {
    let mut start_page = None;
    let mut end_page = None;

    for page_index in 1..=total_pages {
        let page = source.fetch(page_index).await?;

        if let (Some(newest), Some(oldest)) = (page.newest_date(), page.oldest_date()) {
            if start_page.is_none() && newest <= interval.end() {
                start_page = Some(page_index);
                tracing::debug!(page = page_index, "newer edge settled");
            }

            if end_page.is_none() && oldest < interval.start() {
                // The previous page is the last one still holding in-range
                // records; this page has already dipped past the window.
                end_page = Some(page_index.saturating_sub(1).max(1));
                tracing::debug!(page = page_index, "older edge settled");
            }

            if start_page.is_some() && end_page.is_some() {
                break;
            }
        }

        tokio::time::sleep(pacing).await;
    }

    let start_page = start_page.unwrap_or(1);
    let end_page = end_page.unwrap_or(total_pages);

    let (start_page, end_page) = if start_page > end_page {
        (end_page, start_page)
    } else {
        (start_page, end_page)
    };

    Ok(ResolvedRange {
        start_page,
        end_page: Some(end_page),
        strategy: SourceOrdering::WeaklyDescending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::testing::{date, five_page_catalog, item, ScriptedBoard};

    #[tokio::test]
    async fn test_boundaries_found_with_early_exit() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2023, 9, 30), date(2023, 12, 15));

        let range = locate(&board, &interval, board.total_pages(), Duration::ZERO)
            .await
            .unwrap();

        // The older edge stops one page short of where the dates dip below
        // the window start; page 4 still holds in-range records but the
        // heuristic trades it for robustness against local disorder.
        assert_eq!(range.start_page, 2);
        assert_eq!(range.end_page, Some(3));

        // Scan stopped at page 4, never touching page 5
        assert_eq!(board.fetch_count(), 4);
    }

    #[tokio::test]
    async fn test_scan_exhaustion_defaults_to_full_range() {
        let board = five_page_catalog();
        // Entirely older than anything the catalog holds
        let interval = DateInterval::new(date(2019, 1, 1), date(2019, 12, 31));

        let range = locate(&board, &interval, board.total_pages(), Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(range.start_page, 1);
        assert_eq!(range.end_page, Some(5));
        assert_eq!(board.fetch_count(), 5);
    }

    #[tokio::test]
    async fn test_dip_on_first_page_clamps_to_page_one() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2024, 2, 1), date(2024, 3, 1));

        let range = locate(&board, &interval, board.total_pages(), Duration::ZERO)
            .await
            .unwrap();

        // Page 1 both fits under the (future) end and dips below the start
        assert_eq!(range.start_page, 1);
        assert_eq!(range.end_page, Some(1));
        assert_eq!(board.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_pinned_entry_does_not_confuse_the_edges() {
        // A pinned newer notice sits on page 2; per-page extremes absorb it
        let board = ScriptedBoard::new(vec![
            vec![item(1, date(2023, 12, 30)), item(2, date(2023, 12, 18))],
            vec![item(3, date(2023, 12, 28)), item(4, date(2023, 11, 20))],
            vec![item(5, date(2023, 10, 15)), item(6, date(2023, 9, 2))],
        ]);
        let interval = DateInterval::new(date(2023, 9, 20), date(2023, 11, 25));

        let range = locate(&board, &interval, 3, Duration::ZERO).await.unwrap();

        // Page 2's max (the pinned 12-28) keeps the newer edge moving; page
        // 3's min dips below 09-20, settling the older edge on page 2.
        assert_eq!(range.start_page, 2);
        assert_eq!(range.end_page, Some(3));
    }

    #[tokio::test]
    async fn test_empty_page_mid_scan_is_skipped() {
        let board = ScriptedBoard::new(vec![
            vec![item(1, date(2023, 12, 30))],
            vec![],
            vec![item(3, date(2023, 10, 15))],
            vec![item(4, date(2023, 9, 2))],
        ]);
        let interval = DateInterval::new(date(2023, 10, 1), date(2023, 11, 1));

        let range = locate(&board, &interval, 4, Duration::ZERO).await.unwrap();

        // Page 2 contributes no dates; page 3 settles the newer edge and
        // page 4 the older one.
        assert_eq!(range.start_page, 3);
        assert_eq!(range.end_page, Some(3));
    }
}
