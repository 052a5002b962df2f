use crate::catalog::CatalogItem;
use chrono::NaiveDate;

/// One page of a remote board's listing
///
/// A page with no items is the end-of-catalog sentinel; the boards offer no
/// other way to say "no more pages".
#[derive(Debug, Clone)]
pub struct Page {
    /// 1-based page index as requested from the board
    pub index: u32,

    /// Items in the order the board rendered them
    pub items: Vec<CatalogItem>,

    /// Items dropped during extraction (missing fields, unparseable dates)
    pub skipped: u32,

    /// Total page count the board reported on this page, if it did
    pub reported_total: Option<u32>,
}

impl Page {
    /// Whether this page is the end-of-catalog sentinel
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Most recent publication date on this page
    pub fn newest_date(&self) -> Option<NaiveDate> {
        self.items.iter().map(|item| item.published).max()
    }

    /// Oldest publication date on this page
    pub fn oldest_date(&self) -> Option<NaiveDate> {
        self.items.iter().map(|item| item.published).min()
    }
}
