//! Crawl orchestration
//!
//! The coordinator drives the per-source pipeline in sequence: pick the
//! resolution strategy the source is configured with, resolve the page
//! range, assemble the collection, and report. Sources are independent;
//! a failure in one never touches the others.

mod coordinator;

pub use coordinator::{Coordinator, SourceReport};

use crate::catalog::DateInterval;
use crate::config::Config;
use crate::Result;

/// Harvests every configured source over the given interval
///
/// This is the main entry point for a crawl run. It will:
/// 1. Build the shared HTTP client
/// 2. Resolve each source's page range with its configured strategy
/// 3. Assemble, filter, deduplicate, and sort each source's records
///
/// # Arguments
///
/// * `config` - The crawl configuration
/// * `interval` - The inclusive date window to collect
///
/// # Returns
///
/// One report per source that succeeded, in configuration order.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use gleaner::catalog::DateInterval;
/// use gleaner::config::load_config;
/// use gleaner::crawler::harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let interval = DateInterval::new(
///     NaiveDate::from_ymd_opt(2023, 9, 30).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
/// );
/// let reports = harvest(config, interval).await?;
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: Config, interval: DateInterval) -> Result<Vec<SourceReport>> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run(interval).await
}
