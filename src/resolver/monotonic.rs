//! Boundary search for globally descending boards
//!
//! When page 1 holds the newest records and dates fall monotonically with
//! the page index, each edge of the interval can be located with an
//! independent binary search over `[1, total_pages]` instead of a scan.
//! Each probe must complete before the next is chosen, so the searches are
//! strictly sequential.

use crate::catalog::DateInterval;
use crate::resolver::{ResolvedRange, SourceOrdering};
use crate::source::{FetchResult, PageSource};
use chrono::NaiveDate;

/// Locates the pages containing both interval edges
pub async fn locate<S: PageSource>(
    source: &S,
    interval: &DateInterval,
    total_pages: u32,
) -> FetchResult<ResolvedRange> {
    let start_edge = find_start_edge(source, interval.start(), total_pages).await?;
    let end_edge = find_end_edge(source, interval.end(), total_pages).await?;

    tracing::debug!(start_edge, end_edge, "boundary searches finished");

    // The older edge normally resolves to the higher page index; order the
    // pair so collection always walks ascending.
    let (start_page, end_page) = if start_edge > end_edge {
        (end_edge, start_edge)
    } else {
        (start_edge, end_edge)
    };

    Ok(ResolvedRange {
        start_page,
        end_page: Some(end_page),
        strategy: SourceOrdering::GloballyDescending,
    })
}

/// Smallest page index whose oldest record is at or before the interval start
///
/// If no page satisfies this the whole catalog is newer than the interval
/// start and the candidate stays clamped to the last page.
async fn find_start_edge<S: PageSource>(
    source: &S,
    start: NaiveDate,
    total_pages: u32,
) -> FetchResult<u32> {
    let (mut low, mut high) = (1, total_pages);
    let mut candidate = total_pages;

    while low <= high {
        let mid = (low + high) / 2;
        let page = source.fetch(mid).await?;

        let Some(oldest) = page.oldest_date() else {
            // An empty page makes the boundary unreliable; keep the best
            // candidate found so far.
            tracing::debug!(page = mid, "empty page during start-edge search");
            break;
        };

        if oldest > start {
            low = mid + 1;
        } else {
            candidate = mid;
            high = mid - 1;
        }
    }

    Ok(candidate)
}

/// Smallest page index whose newest record is at or before the interval end
async fn find_end_edge<S: PageSource>(
    source: &S,
    end: NaiveDate,
    total_pages: u32,
) -> FetchResult<u32> {
    let (mut low, mut high) = (1, total_pages);
    let mut candidate = 1;

    while low <= high {
        let mid = (low + high) / 2;
        let page = source.fetch(mid).await?;

        let Some(newest) = page.newest_date() else {
            tracing::debug!(page = mid, "empty page during end-edge search");
            break;
        };

        if newest > end {
            low = mid + 1;
        } else {
            candidate = mid;
            high = mid - 1;
        }
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::testing::{date, five_page_catalog, item, ScriptedBoard};

    #[tokio::test]
    async fn test_interval_straddling_the_catalog_middle() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2023, 9, 30), date(2023, 12, 15));

        let range = locate(&board, &interval, board.total_pages()).await.unwrap();

        // Start edge 2023-09-30 falls on page 4, end edge 2023-12-15 on
        // page 2; the range walks ascending between them.
        assert_eq!(range.start_page, 2);
        assert_eq!(range.end_page, Some(4));
    }

    #[tokio::test]
    async fn test_fetch_count_stays_logarithmic() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2023, 9, 30), date(2023, 12, 15));

        locate(&board, &interval, board.total_pages()).await.unwrap();

        // Two binary searches over five pages: at most 3 probes each
        assert!(board.fetch_count() <= 6, "took {}", board.fetch_count());
    }

    #[tokio::test]
    async fn test_interval_older_than_whole_catalog() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2020, 1, 1), date(2020, 2, 1));

        let range = locate(&board, &interval, board.total_pages()).await.unwrap();

        // Start edge clamps to the last page, end edge never moves off 1
        assert_eq!(range.start_page, 1);
        assert_eq!(range.end_page, Some(5));
    }

    #[tokio::test]
    async fn test_interval_newer_than_whole_catalog() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2024, 1, 1), date(2024, 6, 30));

        let range = locate(&board, &interval, board.total_pages()).await.unwrap();

        assert_eq!(range.start_page, 1);
        assert_eq!(range.end_page, Some(1));
    }

    #[tokio::test]
    async fn test_empty_page_terminates_search_keeping_candidate() {
        // Page 3 (the first probe of a 5-page search) is empty
        let board = ScriptedBoard::new(vec![
            vec![item(1, date(2023, 12, 31))],
            vec![item(2, date(2023, 12, 1))],
            vec![],
            vec![],
            vec![item(5, date(2023, 9, 5))],
        ]);
        let interval = DateInterval::new(date(2023, 10, 1), date(2023, 11, 30));

        let range = locate(&board, &interval, 5).await.unwrap();

        // Both searches probe page 3 first, hit the empty page, and fall
        // back to their initial candidates.
        assert_eq!(range.start_page, 1);
        assert_eq!(range.end_page, Some(5));
        assert_eq!(board.fetch_count(), 2);
    }
}
