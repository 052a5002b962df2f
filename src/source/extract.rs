//! Listing extraction
//!
//! Turns one page of board markup into catalog items using the source's
//! configured selectors. Rows that cannot be read completely are dropped
//! and counted, never silently lost.

use crate::catalog::CatalogItem;
use crate::config::{LinkRule, SelectorConfig};
use crate::source::{FetchError, FetchResult};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// One parsed listing page
#[derive(Debug)]
pub struct Listing {
    pub items: Vec<CatalogItem>,
    pub skipped: u32,
    pub reported_total: Option<u32>,
}

/// Parses a listing page's markup into items plus pager metadata
pub fn parse_listing(
    html: &str,
    selectors: &SelectorConfig,
    link: &LinkRule,
) -> FetchResult<Listing> {
    let document = Html::parse_document(html);

    let item_sel = compile(&selectors.item)?;
    let title_sel = compile(&selectors.title)?;
    let date_sel = compile(&selectors.date)?;

    let mut items = Vec::new();
    let mut skipped = 0u32;

    for row in document.select(&item_sel) {
        match extract_item(row, &title_sel, &date_sel, &selectors.date_format, link) {
            Ok(item) => items.push(item),
            Err(reason) => {
                tracing::debug!(reason, "dropping listing row");
                skipped += 1;
            }
        }
    }

    let reported_total = match &selectors.total_pages {
        Some(selector) => {
            let pager_sel = compile(selector)?;
            document
                .select(&pager_sel)
                .next()
                .and_then(|el| parse_total_pages(&collect_text(el)))
        }
        None => None,
    };

    Ok(Listing {
        items,
        skipped,
        reported_total,
    })
}

fn extract_item(
    row: ElementRef<'_>,
    title_sel: &Selector,
    date_sel: &Selector,
    date_format: &str,
    link: &LinkRule,
) -> Result<CatalogItem, &'static str> {
    let title_el = row.select(title_sel).next().ok_or("missing title element")?;
    let title = collect_text(title_el);
    if title.is_empty() {
        return Err("empty title");
    }

    let date_el = row.select(date_sel).next().ok_or("missing date element")?;
    let date_text = collect_text(date_el);
    let published =
        NaiveDate::parse_from_str(&date_text, date_format).map_err(|_| "unparseable date")?;

    let (id, detail_url) = match link {
        LinkRule::Href { base_url } => {
            let href = title_el.value().attr("href").ok_or("missing href")?;
            let resolved = Url::parse(base_url)
                .and_then(|base| base.join(href))
                .map_err(|_| "unresolvable href")?;
            (None, resolved.to_string())
        }
        LinkRule::Onclick { url_template } => {
            let onclick = title_el.value().attr("onclick").ok_or("missing onclick")?;
            let args = onclick_args(onclick);
            if args.is_empty() {
                return Err("onclick carries no arguments");
            }
            let url = fill_template(url_template, &args);
            // The argument list as a whole is the provider key; a lone
            // leading argument is often just a constant board code.
            (Some(args.join(":")), url)
        }
    };

    Ok(CatalogItem {
        id,
        title,
        published,
        detail_url,
    })
}

/// Extracts the quoted arguments of a javascript call attribute
///
/// `javascript:fn_detail('acc0102','11765342006138');` yields
/// `["acc0102", "11765342006138"]`.
fn onclick_args(onclick: &str) -> Vec<String> {
    let Some(open) = onclick.find('(') else {
        return Vec::new();
    };
    let Some(close) = onclick.rfind(')') else {
        return Vec::new();
    };
    if close <= open {
        return Vec::new();
    }

    onclick[open + 1..close]
        .split(',')
        .map(|arg| arg.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|arg| !arg.is_empty())
        .collect()
}

/// Substitutes positional arguments into a URL template
fn fill_template(template: &str, args: &[String]) -> String {
    let mut url = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        url = url.replace(&format!("{{{i}}}"), arg);
    }
    url
}

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses pager text like `1/438 페이지` into the total page count
///
/// Falls back to the figure before the slash (the current page) when the
/// total cannot be read, so a present-but-odd pager never raises.
pub fn parse_total_pages(text: &str) -> Option<u32> {
    if let Some(total) = text.split('/').nth(1).and_then(leading_number) {
        return Some(total);
    }
    leading_number(text)
}

fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn compile(selector: &str) -> FetchResult<Selector> {
    Selector::parse(selector).map_err(|_| FetchError::Selector(selector.to_string()))
}
