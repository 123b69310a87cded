//! Stats command implementation.
//!
//! Collection-wide care statistics: health, per-type breakdown and the
//! blooming headline.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tabled::builder::Builder;

use saintpaulia_core::{
    CareBreakdown, CareEngine, CollectionCareStats, HealthBand, Snapshot, blooming_headline,
};
use saintpaulia_types::CareType;

use crate::cli::OutputFormat;
use crate::format::FormatOptions;
use crate::style;
use crate::util::write_output;

pub fn cmd_stats(
    snapshot: &Snapshot,
    engine: &CareEngine,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let stats = engine.collection_stats(&snapshot.plants);
    let headline = blooming_headline(&snapshot.plants);

    let content = match format {
        OutputFormat::Json => format_stats_json(&stats, headline.as_deref(), opts)?,
        OutputFormat::Csv => format_stats_csv(&stats, opts),
        OutputFormat::Text => format_stats_text(&stats, headline.as_deref(), opts),
    };

    write_output(output, &content)?;
    Ok(())
}

fn format_stats_text(
    stats: &CollectionCareStats,
    headline: Option<&str>,
    opts: &FormatOptions,
) -> String {
    let mut output = format!(
        "{}\n\n",
        style::format_title("Collection Health", opts.no_color)
    );

    if stats.total_plants == 0 {
        output.push_str("No plants in the collection yet.\n");
        return output;
    }

    if !opts.is_plain() {
        output.push_str(&style::format_health_bar(stats.health_percentage, opts.no_color));
        output.push(' ');
    }
    output.push_str(&format!(
        "{} {} ({} of {} plants up to date)\n",
        style::format_health_colored(stats.health_percentage, opts.no_color),
        stats.health_band(),
        stats.healthy_count,
        stats.total_plants,
    ));
    output.push_str(&format!("{}\n\n", stats.encouragement()));

    let mut table = breakdown_table(&stats.care_breakdown).build();
    style::apply_table_style(&mut table, opts.style);
    output.push_str(&table.to_string());
    output.push_str("\n\n");

    if let Some(care_type) = stats.most_neglected_care_type {
        output.push_str(&format!(
            "Most neglected:  {} ({} overdue)\n",
            care_type.label(),
            stats.care_breakdown.get(care_type).overdue
        ));
    }
    output.push_str(&format!(
        "Best maintained: {}\n",
        stats.best_maintained_care_type.label()
    ));
    if let Some(headline) = headline {
        output.push_str(&format!("{}\n", headline));
    }
    output
}

/// Per-type counts, one row per care type
fn breakdown_table(breakdown: &CareBreakdown) -> Builder {
    let mut builder = Builder::default();
    builder.push_record(["Care", "Good", "Soon", "Overdue", "Up to date"]);
    for (care_type, counts) in breakdown.iter() {
        builder.push_record([
            care_type.label().to_string(),
            counts.good.to_string(),
            counts.soon.to_string(),
            counts.overdue.to_string(),
            format!("{}/{}", counts.up_to_date(), counts.total()),
        ]);
    }
    builder
}

fn format_stats_json(
    stats: &CollectionCareStats,
    headline: Option<&str>,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct StatsJson<'a> {
        #[serde(flatten)]
        stats: &'a CollectionCareStats,
        needs_care_count: usize,
        health_band: HealthBand,
        encouragement: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        blooming_headline: Option<&'a str>,
    }

    opts.as_json(&StatsJson {
        stats,
        needs_care_count: stats.needs_care_count(),
        health_band: stats.health_band(),
        encouragement: stats.encouragement(),
        blooming_headline: headline,
    })
}

/// Format the breakdown as CSV, one row per care type
fn format_stats_csv(stats: &CollectionCareStats, opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "care_type,good,soon,overdue,total_plants,health_percentage,most_neglected,best_maintained\n"
            .to_string()
    };
    let most_neglected = stats
        .most_neglected_care_type
        .map(|t| t.key())
        .unwrap_or_default();
    for care_type in CareType::ALL {
        let counts = stats.care_breakdown.get(care_type);
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            care_type.key(),
            counts.good,
            counts.soon,
            counts.overdue,
            stats.total_plants,
            stats.health_percentage,
            most_neglected,
            stats.best_maintained_care_type.key(),
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use saintpaulia_types::Plant;
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};

    const NOW: OffsetDateTime = datetime!(2024-06-15 12:00:00 UTC);

    fn collection() -> Vec<Plant> {
        let mut healthy = Plant::new("1", "Rob's Vanilla Trail");
        for care_type in CareType::ALL {
            healthy.set_last_care(care_type, Some(NOW - Duration::days(1)));
        }
        healthy.is_blooming = true;
        vec![healthy, Plant::new("2", "Optimara EverGrace")]
    }

    fn stats() -> CollectionCareStats {
        CareEngine::default().at(NOW).collection_stats(&collection())
    }

    fn opts() -> FormatOptions {
        FormatOptions::new(true, crate::cli::StyleMode::Plain)
    }

    #[test]
    fn test_stats_text_summary() {
        let text = format_stats_text(&stats(), Some("Rob's Vanilla Trail is blooming!"), &opts());
        assert!(text.contains("\n50% Fair (1 of 2 plants up to date)"));
        assert!(text.contains("Good progress! A few plants could use some attention."));
        assert!(text.contains("Most neglected:  Watering (1 overdue)"));
        assert!(text.contains("Best maintained: Watering"));
        assert!(text.contains("is blooming!"));
    }

    #[test]
    fn test_stats_text_rich_has_bar() {
        let rich = FormatOptions::new(true, crate::cli::StyleMode::Rich);
        let text = format_stats_text(&stats(), None, &rich);
        assert!(text.contains("█████░░░░░ 50% Fair"));
    }

    #[test]
    fn test_stats_text_empty_collection() {
        let empty = CareEngine::default().at(NOW).collection_stats(&[]);
        let text = format_stats_text(&empty, None, &opts());
        assert!(text.contains("No plants in the collection yet."));
    }

    #[test]
    fn test_stats_json_includes_derived_fields() {
        let json = format_stats_json(&stats(), None, &opts()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_plants"], 2);
        assert_eq!(value["health_percentage"], 50);
        assert_eq!(value["needs_care_count"], 1);
        assert_eq!(value["health_band"], "fair");
        assert_eq!(value["care_breakdown"]["watering"]["overdue"], 1);
        assert_eq!(value["most_neglected_care_type"], "watering");
        assert!(value.get("blooming_headline").is_none());
    }

    #[test]
    fn test_stats_csv() {
        let csv = format_stats_csv(&stats(), &opts());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "watering,1,0,1,2,50,watering,watering");
        assert_eq!(lines[2], "fertilizing,1,0,1,2,50,watering,watering");
    }
}
