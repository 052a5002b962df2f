//! Collection assembly
//!
//! Walks a resolved page range in ascending order, keeps the records inside
//! the requested interval, drops duplicates, and sorts the survivors
//! newest-first. The interval filter runs even when the board is expected
//! to have filtered server-side.

use crate::catalog::{CatalogItem, DateInterval, ItemKey};
use crate::resolver::ResolvedRange;
use crate::source::{FetchResult, PageSource};
use std::collections::HashSet;
use std::time::Duration;

/// Counters accumulated while assembling one source's collection
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectStats {
    pub pages_fetched: u32,
    pub items_collected: u32,
    pub items_skipped: u32,
    pub duplicates_dropped: u32,
}

/// The assembled, ordered record set for one source
#[derive(Debug)]
pub struct Collection {
    pub items: Vec<CatalogItem>,
    pub stats: CollectStats,
}

/// Fetches the resolved range and assembles the final record list
///
/// Pages are fetched strictly one at a time in ascending index order. An
/// unbounded range stops at the first empty page; inside a bounded range an
/// empty page just contributes nothing.
pub async fn collect<S: PageSource>(
    source: &S,
    range: &ResolvedRange,
    interval: &DateInterval,
    pacing: Duration,
) -> FetchResult<Collection> {
    let mut items: Vec<CatalogItem> = Vec::new();
    let mut seen: HashSet<ItemKey> = HashSet::new();
    let mut stats = CollectStats::default();

    let mut page_index = range.start_page;
    loop {
        if let Some(end_page) = range.end_page {
            if page_index > end_page {
                break;
            }
        }

        let page = source.fetch(page_index).await?;
        stats.pages_fetched += 1;
        stats.items_skipped += page.skipped;

        if page.is_empty() && range.end_page.is_none() {
            tracing::debug!(page = page_index, "empty page ends the scan");
            break;
        }

        for item in page.items {
            if !interval.contains(item.published) {
                continue;
            }
            if seen.insert(item.key()) {
                items.push(item);
            } else {
                stats.duplicates_dropped += 1;
            }
        }

        page_index += 1;
        if range.paced() {
            tokio::time::sleep(pacing).await;
        }
    }

    // Stable sort: records sharing a date keep the order they were fetched in
    items.sort_by(|a, b| b.published.cmp(&a.published));
    stats.items_collected = items.len() as u32;

    Ok(Collection { items, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::testing::{date, five_page_catalog, item, ScriptedBoard};
    use crate::resolver::SourceOrdering;

    fn bounded(start_page: u32, end_page: u32) -> ResolvedRange {
        ResolvedRange {
            start_page,
            end_page: Some(end_page),
            strategy: SourceOrdering::GloballyDescending,
        }
    }

    fn unbounded() -> ResolvedRange {
        ResolvedRange {
            start_page: 1,
            end_page: None,
            strategy: SourceOrdering::Unordered,
        }
    }

    #[tokio::test]
    async fn test_bounded_range_filters_inclusively() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2023, 10, 3), date(2023, 12, 1));

        let collection = collect(&board, &bounded(1, 5), &interval, Duration::ZERO)
            .await
            .unwrap();

        let dates: Vec<_> = collection.items.iter().map(|i| i.published).collect();
        // Both endpoints are part of the matching set
        assert_eq!(
            dates,
            vec![
                date(2023, 12, 1),
                date(2023, 11, 22),
                date(2023, 11, 14),
                date(2023, 11, 5),
                date(2023, 10, 28),
                date(2023, 10, 20),
                date(2023, 10, 11),
                date(2023, 10, 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_unbounded_scan_stops_at_first_empty_page() {
        let board = ScriptedBoard::new(vec![
            vec![item(1, date(2023, 12, 1)), item(2, date(2023, 11, 20))],
            vec![item(3, date(2023, 11, 5))],
            vec![],
            vec![item(9, date(2023, 10, 1))],
        ]);
        let interval = DateInterval::new(date(2023, 1, 1), date(2023, 12, 31));

        let collection = collect(&board, &unbounded(), &interval, Duration::ZERO)
            .await
            .unwrap();

        // The sentinel at page 3 stops the scan; page 4 is never requested
        assert_eq!(board.fetch_count(), 3);
        assert_eq!(collection.items.len(), 3);
        assert_eq!(collection.stats.pages_fetched, 3);
    }

    #[tokio::test]
    async fn test_bounded_range_tolerates_interior_empty_page() {
        let board = ScriptedBoard::new(vec![
            vec![item(1, date(2023, 12, 1))],
            vec![],
            vec![item(3, date(2023, 10, 5))],
        ]);
        let interval = DateInterval::new(date(2023, 1, 1), date(2023, 12, 31));

        let collection = collect(&board, &bounded(1, 3), &interval, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(board.fetch_count(), 3);
        let titles: Vec<_> = collection.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Item1", "Item3"]);
    }

    #[tokio::test]
    async fn test_duplicate_across_pages_kept_once() {
        let repeated = item(7, date(2023, 11, 1));
        let board = ScriptedBoard::new(vec![
            vec![item(1, date(2023, 12, 1)), repeated.clone()],
            vec![repeated.clone(), item(3, date(2023, 10, 5))],
        ]);
        let interval = DateInterval::new(date(2023, 1, 1), date(2023, 12, 31));

        let collection = collect(&board, &bounded(1, 2), &interval, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(collection.items.len(), 3);
        assert_eq!(collection.stats.duplicates_dropped, 1);
        assert_eq!(
            collection
                .items
                .iter()
                .filter(|i| i.id.as_deref() == Some("7"))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_sort_is_newest_first_and_stable_on_ties() {
        let board = ScriptedBoard::new(vec![
            vec![item(1, date(2023, 11, 1))],
            vec![item(2, date(2023, 12, 1)), item(3, date(2023, 11, 1))],
        ]);
        let interval = DateInterval::new(date(2023, 1, 1), date(2023, 12, 31));

        let collection = collect(&board, &bounded(1, 2), &interval, Duration::ZERO)
            .await
            .unwrap();

        let titles: Vec<_> = collection.items.iter().map(|i| i.title.as_str()).collect();
        // Item1 and Item3 share a date; fetch order decides between them
        assert_eq!(titles, vec!["Item2", "Item1", "Item3"]);
    }

    #[tokio::test]
    async fn test_boundary_search_plus_collection_matches_brute_force() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2023, 9, 30), date(2023, 12, 31));

        let range = crate::resolver::resolve(
            &board,
            SourceOrdering::GloballyDescending,
            &interval,
            board.total_pages(),
            Duration::ZERO,
        )
        .await
        .unwrap();
        let resolved = collect(&board, &range, &interval, Duration::ZERO)
            .await
            .unwrap();

        let brute_force = collect(
            &five_page_catalog(),
            &bounded(1, 5),
            &interval,
            Duration::ZERO,
        )
        .await
        .unwrap();

        assert_eq!(resolved.items, brute_force.items);
        // The boundary search spared at least the final page
        assert_eq!(range.end_page, Some(4));
    }

    #[tokio::test]
    async fn test_interval_outside_catalog_yields_empty_result() {
        let board = five_page_catalog();
        let interval = DateInterval::new(date(2020, 1, 1), date(2020, 6, 30));

        let collection = collect(&board, &bounded(1, 5), &interval, Duration::ZERO)
            .await
            .unwrap();

        assert!(collection.items.is_empty());
        assert_eq!(collection.stats.items_collected, 0);
    }
}
