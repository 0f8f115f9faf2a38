//! Output formatting for price reports (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::ebay::{ListingRecord, Region};
use crate::stats::{format_price, PriceReport, SoldSummary};

/// Guidance shown when a search finds nothing.
pub const NO_RESULTS_MESSAGE: &str = "No sold listings found. Try a broader or simpler keyword.";

const CSV_HEADER: &str = "title,price,date,link";

/// Formats price reports for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a report for the regions that were searched.
    pub fn format_report(&self, report: &PriceReport, regions: &[Region]) -> String {
        let summary = match report {
            PriceReport::Found(summary) => summary,
            PriceReport::NoResults => {
                return match self.format {
                    OutputFormat::Json => self.json_report(report),
                    OutputFormat::Csv => CSV_HEADER.to_string(),
                    _ => NO_RESULTS_MESSAGE.to_string(),
                };
            }
        };

        match self.format {
            OutputFormat::Json => self.json_report(report),
            OutputFormat::Table => self.table_report(summary, regions),
            OutputFormat::Markdown => self.markdown_report(summary, regions),
            OutputFormat::Csv => self.csv_listings(&summary.listings),
        }
    }

    // JSON formatting

    fn json_report(&self, report: &PriceReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_report(&self, summary: &SoldSummary, regions: &[Region]) -> String {
        let title_width = 50;
        let price_width = 12;
        let date_width = 18;

        let mut lines = Vec::new();

        lines.push(found_line(summary, regions));
        lines.push(String::new());

        lines.push(format!(
            "{:<title_width$}  {:>price_width$}  {:<date_width$}  {}",
            "Title", "Price", "Date", "Link"
        ));
        lines.push(format!(
            "{:-<title_width$}  {:-<price_width$}  {:-<date_width$}  {:-<20}",
            "", "", "", ""
        ));

        for listing in &summary.listings {
            lines.push(format!(
                "{:<title_width$}  {:>price_width$}  {:<date_width$}  {}",
                truncate(&listing.title, title_width),
                format_price(listing.price),
                truncate(&listing.date, date_width),
                listing.link
            ));
        }

        lines.push(String::new());
        lines.push("Category Breakdown (by exact title)".to_string());
        lines.push(format!(
            "{:<title_width$}  {:>5}  {:>price_width$}  {:>price_width$}  {:>price_width$}",
            "Title", "Count", "Average", "Lowest", "Highest"
        ));
        lines.push(format!(
            "{:-<title_width$}  {:-<5}  {:-<price_width$}  {:-<price_width$}  {:-<price_width$}",
            "", "", "", "", ""
        ));

        for category in &summary.categories {
            lines.push(format!(
                "{:<title_width$}  {:>5}  {:>price_width$}  {:>price_width$}  {:>price_width$}",
                truncate(&category.title, title_width),
                category.count,
                format_price(category.mean),
                format_price(category.min),
                format_price(category.max)
            ));
        }

        lines.push(String::new());
        lines.push("Overall Stats Across All Categories".to_string());
        lines.extend(overall_lines(summary).into_iter().map(|l| format!("  {}", l)));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_report(&self, summary: &SoldSummary, regions: &[Region]) -> String {
        let mut lines = Vec::new();

        lines.push(format!("*{}*", found_line(summary, regions)));
        lines.push(String::new());

        lines.push("| Title | Price | Date | Link |".to_string());
        lines.push("|-------|-------|------|------|".to_string());
        for listing in &summary.listings {
            lines.push(format!(
                "| {} | {} | {} | [View]({}) |",
                markdown_escape(&listing.title),
                format_price(listing.price),
                markdown_escape(&listing.date),
                listing.link
            ));
        }

        lines.push(String::new());
        lines.push("#### Category Breakdown (by exact title)".to_string());
        lines.push(String::new());
        lines.push("| Title | Count | Average Price | Lowest Price | Highest Price |".to_string());
        lines.push("|-------|-------|---------------|--------------|---------------|".to_string());
        for category in &summary.categories {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                markdown_escape(&category.title),
                category.count,
                format_price(category.mean),
                format_price(category.min),
                format_price(category.max)
            ));
        }

        lines.push(String::new());
        lines.push("#### Overall Stats Across All Categories".to_string());
        lines.push(String::new());
        lines.extend(overall_lines(summary).into_iter().map(|l| format!("- {}", l)));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_listings(&self, listings: &[ListingRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(CSV_HEADER.to_string());

        for listing in listings {
            lines.push(format!(
                "{},{:.2},{},{}",
                Self::csv_escape(&listing.title),
                listing.price,
                Self::csv_escape(&listing.date),
                Self::csv_escape(&listing.link)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn found_line(summary: &SoldSummary, regions: &[Region]) -> String {
    let domains: Vec<_> = regions.iter().map(|r| r.domain()).collect();
    format!(
        "{} total sold listings found across {}.",
        summary.listings.len(),
        domains.join(" & ")
    )
}

fn overall_lines(summary: &SoldSummary) -> Vec<String> {
    let overall = &summary.overall;
    vec![
        format!("Median price: {}", format_price(overall.median)),
        format!("Average price: {}", format_price(overall.mean)),
        format!("Lowest sold price: {}", format_price(overall.min)),
        format!("Highest sold price: {}", format_price(overall.max)),
    ]
}

/// Shortens text to `width` characters, ending in `...` when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn markdown_escape(text: &str) -> String {
    text.replace('|', "\\|")
}
