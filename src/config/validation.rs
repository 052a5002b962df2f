use crate::config::types::{Config, LinkRule, SelectorConfig, SourceConfig};
use crate::resolver::SourceOrdering;
use crate::ConfigError;
use scraper::Selector;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[source]] table is required".to_string(),
        ));
    }

    if config.crawl.pacing_ms > 10_000 {
        return Err(ConfigError::Validation(format!(
            "pacing-ms must be <= 10000, got {}",
            config.crawl.pacing_ms
        )));
    }

    if config.output.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for source in &config.sources {
        validate_source(source)?;
        if !names.insert(source.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name '{}'",
                source.name
            )));
        }
    }

    Ok(())
}

/// Validates one source table
fn validate_source(source: &SourceConfig) -> Result<(), ConfigError> {
    if source.name.is_empty() {
        return Err(ConfigError::Validation(
            "source name cannot be empty".to_string(),
        ));
    }

    if source.heading.is_empty() {
        return Err(ConfigError::Validation(format!(
            "source '{}' has an empty heading",
            source.name
        )));
    }

    Url::parse(&source.list_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("list-url of source '{}': {}", source.name, e))
    })?;

    if source.pagination.page_param.is_empty() {
        return Err(ConfigError::Validation(format!(
            "source '{}' has an empty page-param",
            source.name
        )));
    }

    validate_selectors(&source.name, &source.selectors)?;

    match &source.link {
        LinkRule::Href { base_url } => {
            Url::parse(base_url).map_err(|e| {
                ConfigError::InvalidUrl(format!(
                    "link base-url of source '{}': {}",
                    source.name, e
                ))
            })?;
        }
        LinkRule::Onclick { url_template } => {
            if !url_template.contains("{0}") {
                return Err(ConfigError::Validation(format!(
                    "link url-template of source '{}' never references argument {{0}}",
                    source.name
                )));
            }
        }
    }

    if source.total_pages_hint == Some(0) {
        return Err(ConfigError::Validation(format!(
            "total-pages-hint of source '{}' must be >= 1",
            source.name
        )));
    }

    // Boundary-locating strategies need a page count to search within
    let needs_total = matches!(
        source.ordering,
        SourceOrdering::GloballyDescending | SourceOrdering::WeaklyDescending
    );
    if needs_total && source.total_pages_hint.is_none() && source.selectors.total_pages.is_none() {
        return Err(ConfigError::Validation(format!(
            "source '{}' needs total-pages-hint or a total-pages selector for its ordering",
            source.name
        )));
    }

    Ok(())
}

/// Checks every configured selector for valid CSS syntax
fn validate_selectors(name: &str, selectors: &SelectorConfig) -> Result<(), ConfigError> {
    check_selector(name, "item", &selectors.item)?;
    check_selector(name, "title", &selectors.title)?;
    check_selector(name, "date", &selectors.date)?;
    if let Some(total) = &selectors.total_pages {
        check_selector(name, "total-pages", total)?;
    }

    if selectors.date_format.is_empty() {
        return Err(ConfigError::Validation(format!(
            "source '{name}' has an empty date-format"
        )));
    }

    Ok(())
}

fn check_selector(name: &str, field: &str, selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector).map_err(|_| {
        ConfigError::InvalidSelector(format!("{field} selector of source '{name}': `{selector}`"))
    })?;
    Ok(())
}
