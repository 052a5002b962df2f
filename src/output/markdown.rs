use crate::catalog::CatalogItem;
use crate::crawler::SourceReport;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Renders one record as its canonical line: `- (YY-MM-DD) [title](url)`
///
/// Downstream consumers parse this back by pattern; the prefix, the
/// two-digit year, and the separators are all load-bearing. Title text is
/// used verbatim apart from whitespace trimming.
pub fn format_item(item: &CatalogItem) -> String {
    format!(
        "- ({}) [{}]({})",
        item.published.format("%y-%m-%d"),
        item.title.trim(),
        item.detail_url
    )
}

/// Renders the full report, one `##` section per source in the given order
pub fn render_report(reports: &[SourceReport]) -> String {
    let mut md = String::new();

    for report in reports {
        md.push_str(&format!("## {}\n\n", report.heading));
        for item in &report.items {
            md.push_str(&format_item(item));
            md.push('\n');
        }
        md.push('\n');
    }

    md
}

/// Writes the rendered report to a file
pub fn write_report(reports: &[SourceReport], output_path: &Path) -> OutputResult<()> {
    let markdown = render_report(reports);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}
