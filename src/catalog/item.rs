use chrono::NaiveDate;

/// One record of a remote notice board
///
/// Items are constructed by listing extraction and never mutated afterwards.
/// They live only for the duration of a single crawl invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Opaque provider key, when the board exposes one
    pub id: Option<String>,

    /// Record title, whitespace-trimmed
    pub title: String,

    /// Publication date (calendar date, no time component)
    pub published: NaiveDate,

    /// Absolute URL of the record's detail page
    pub detail_url: String,
}

/// Deduplication key for a catalog item
///
/// Boards occasionally repeat a record across neighboring pages. Two items
/// are the same record when their provider keys match; boards without
/// provider keys fall back to title plus publication date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Provider(String),
    TitleDate(String, NaiveDate),
}

impl CatalogItem {
    pub fn key(&self) -> ItemKey {
        match &self.id {
            Some(id) => ItemKey::Provider(id.clone()),
            None => ItemKey::TitleDate(self.title.clone(), self.published),
        }
    }
}
