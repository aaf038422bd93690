//! Output formatting for the CLI.

use crate::stats::Stats;
use crate::types::Record;

/// Output format for list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Format the record set as markdown.
pub fn format_records_markdown(records: &[Record]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Records ({})\n\n", records.len()));

    for record in records {
        md.push_str(&format_record_short(record));
    }

    md
}

/// One-line record summary for lists.
fn format_record_short(record: &Record) -> String {
    let pending_marker = if record.is_local() { "* " } else { "" };

    let shop = record
        .shop_name
        .as_ref()
        .map(|name| format!(" ({})", name))
        .unwrap_or_default();

    let road = record
        .road
        .map(|road| format!(" ถนน{}", road.label()))
        .unwrap_or_default();

    format!(
        "- {}{}{} `{}` | {} {}{}, {} คน\n",
        pending_marker,
        record.full_name,
        shop,
        record.id,
        record.community.label(),
        record.address,
        road,
        record.residents_count,
    )
}

/// Format aggregates as markdown.
pub fn format_stats_markdown(stats: &Stats) -> String {
    let mut md = String::new();

    md.push_str("# Summary\n\n");
    md.push_str(&format!("- **records**: {}\n", stats.total_records));
    md.push_str(&format!("- **residents**: {}\n", stats.total_residents));
    md.push_str(&format!("- **pending (local only)**: {}\n", stats.local_pending));

    md.push_str("\n## By community\n\n");
    for (label, count) in &stats.by_community {
        md.push_str(&format!("- {}: {}\n", label, count));
    }

    md.push_str("\n## Household waste\n\n");
    for (label, count) in &stats.by_household_waste {
        md.push_str(&format!("- {}: {}\n", label, count));
    }

    md.push_str("\n## Wastewater\n\n");
    for (label, count) in &stats.by_wastewater {
        md.push_str(&format!("- {}: {}\n", label, count));
    }

    md
}
