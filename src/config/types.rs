use crate::resolver::SourceOrdering;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for gleaner
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceConfig>,
}

/// Crawl window and pacing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// First day of the collection window (inclusive)
    #[serde(rename = "start-date")]
    pub start_date: NaiveDate,

    /// Last day of the collection window (inclusive)
    #[serde(rename = "end-date")]
    pub end_date: NaiveDate,

    /// Delay between fetches for the paced strategies (milliseconds)
    #[serde(rename = "pacing-ms", default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

fn default_pacing_ms() -> u64 {
    200
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the markdown report file
    #[serde(rename = "report-path")]
    pub report_path: String,
}

/// One remote notice board
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Short identifier used in logs
    pub name: String,

    /// Section heading this source's records appear under in the report
    pub heading: String,

    /// URL of the paged listing endpoint
    #[serde(rename = "list-url")]
    pub list_url: String,

    /// What the resolver may assume about the board's date ordering
    pub ordering: SourceOrdering,

    /// Known total page count; spares the metadata fetch when present
    #[serde(rename = "total-pages-hint", default)]
    pub total_pages_hint: Option<u32>,

    pub pagination: PaginationConfig,
    pub selectors: SelectorConfig,
    pub link: LinkRule,
}

/// How to request a numbered page from the board
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    pub mode: PaginationMode,

    /// Name of the request parameter carrying the page index
    #[serde(rename = "page-param")]
    pub page_param: String,

    /// Static parameters sent with every page request
    #[serde(default)]
    pub extra: BTreeMap<String, String>,

    /// Interval request parameters for boards that filter server-side
    #[serde(rename = "date-filter", default)]
    pub date_filter: Option<DateFilterConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationMode {
    /// GET with query-string parameters
    Query,
    /// POST with form-encoded parameters
    Form,
}

/// Request parameter names for server-side date filtering
#[derive(Debug, Clone, Deserialize)]
pub struct DateFilterConfig {
    #[serde(rename = "start-param")]
    pub start_param: String,

    #[serde(rename = "end-param")]
    pub end_param: String,

    /// strftime format the board expects the dates in
    #[serde(default = "default_date_param_format")]
    pub format: String,
}

fn default_date_param_format() -> String {
    "%Y-%m-%d".to_string()
}

/// CSS selectors describing the listing markup
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// Selects one listing row per record
    pub item: String,

    /// Selects the title anchor inside a row
    pub title: String,

    /// Selects the publication date inside a row
    pub date: String,

    /// strftime format of the date text (e.g. `%Y-%m-%d`, `%Y.%m.%d`)
    #[serde(rename = "date-format")]
    pub date_format: String,

    /// Selects the pager element whose text reads like `1/438 페이지`
    #[serde(rename = "total-pages", default)]
    pub total_pages: Option<String>,
}

/// How to turn a listing row's title anchor into a detail URL
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum LinkRule {
    /// Resolve the anchor's `href` against a base URL
    Href {
        #[serde(rename = "base-url")]
        base_url: String,
    },

    /// Extract the quoted arguments of the anchor's `onclick` call and
    /// substitute them into a URL template (`{0}`, `{1}`, ...). The joined
    /// argument list doubles as the record's provider key.
    Onclick {
        #[serde(rename = "url-template")]
        url_template: String,
    },
}
