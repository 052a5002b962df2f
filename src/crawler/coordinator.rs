use crate::assembler::{self, CollectStats};
use crate::catalog::{CatalogItem, DateInterval};
use crate::config::{Config, SourceConfig};
use crate::resolver::{self, SourceOrdering};
use crate::source::{build_http_client, HttpBoardSource, PageSource};
use crate::{GleanError, Result};
use reqwest::Client;
use std::time::Duration;

/// The harvested records of one source
#[derive(Debug)]
pub struct SourceReport {
    pub name: String,
    pub heading: String,
    pub items: Vec<CatalogItem>,
    pub stats: CollectStats,
}

/// Drives the resolve-then-assemble pipeline across the configured sources
pub struct Coordinator {
    config: Config,
    client: Client,
}

impl Coordinator {
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.crawl)?;
        Ok(Self { config, client })
    }

    /// Runs every configured source in sequence
    ///
    /// A source failure is logged and skipped; the run only fails as a
    /// whole when no source produced a report.
    pub async fn run(&self, interval: DateInterval) -> Result<Vec<SourceReport>> {
        let pacing = Duration::from_millis(self.config.crawl.pacing_ms);
        let mut reports = Vec::new();
        let mut failures = 0usize;

        for source_config in &self.config.sources {
            tracing::info!(source = %source_config.name, "harvesting source");

            match self.harvest_source(source_config, interval, pacing).await {
                Ok(report) => {
                    tracing::info!(
                        source = %source_config.name,
                        pages = report.stats.pages_fetched,
                        collected = report.stats.items_collected,
                        "source harvested"
                    );
                    if report.stats.items_skipped > 0 {
                        tracing::warn!(
                            source = %source_config.name,
                            skipped = report.stats.items_skipped,
                            "listing rows were dropped during extraction"
                        );
                    }
                    reports.push(report);
                }
                Err(e) => {
                    failures += 1;
                    tracing::error!(
                        source = %source_config.name,
                        error = %e,
                        "source failed, continuing with the remaining sources"
                    );
                }
            }
        }

        if reports.is_empty() && failures > 0 {
            return Err(GleanError::AllSourcesFailed(failures));
        }

        Ok(reports)
    }

    async fn harvest_source(
        &self,
        source_config: &SourceConfig,
        interval: DateInterval,
        pacing: Duration,
    ) -> Result<SourceReport> {
        let source = HttpBoardSource::new(self.client.clone(), source_config.clone(), interval);

        // The unbounded scan never consults the page count
        let total_pages = match source_config.ordering {
            SourceOrdering::Unordered => 1,
            _ => self.total_pages(&source, source_config).await?,
        };

        let range = resolver::resolve(
            &source,
            source_config.ordering,
            &interval,
            total_pages,
            pacing,
        )
        .await?;

        tracing::info!(
            source = %source_config.name,
            start_page = range.start_page,
            end_page = ?range.end_page,
            "resolved page range"
        );

        let collection = assembler::collect(&source, &range, &interval, pacing).await?;

        Ok(SourceReport {
            name: source_config.name.clone(),
            heading: source_config.heading.clone(),
            items: collection.items,
            stats: collection.stats,
        })
    }

    /// Total page count from the configured hint, else page 1's pager metadata
    async fn total_pages(
        &self,
        source: &HttpBoardSource,
        source_config: &SourceConfig,
    ) -> Result<u32> {
        if let Some(hint) = source_config.total_pages_hint {
            tracing::debug!(source = %source_config.name, hint, "using configured page count");
            return Ok(hint);
        }

        let first = source.fetch(1).await?;
        Ok(first.reported_total.unwrap_or_else(|| {
            tracing::warn!(
                source = %source_config.name,
                "board reported no total page count, assuming 1"
            );
            1
        }))
    }
}
