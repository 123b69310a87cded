//! Attention command implementation.
//!
//! Lists the plants with overdue care, most overdue types first.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use saintpaulia_core::{AttentionItem, CareEngine, CareLevel, Snapshot, needs_attention};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, csv_escape, format_days_ago};
use crate::style;
use crate::util::write_output;

pub fn cmd_attention(
    snapshot: &Snapshot,
    engine: &CareEngine,
    limit: usize,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let mut items = needs_attention(&snapshot.plants, engine);
    let total = items.len();
    if limit > 0 {
        items.truncate(limit);
    }

    let content = match format {
        OutputFormat::Json => format_attention_json(&items, total, opts)?,
        OutputFormat::Csv => format_attention_csv(&items, opts),
        OutputFormat::Text => format_attention_text(&items, total, opts),
    };

    write_output(output, &content)?;
    Ok(())
}

fn format_attention_text(items: &[AttentionItem<'_>], total: usize, opts: &FormatOptions) -> String {
    if total == 0 {
        return format!(
            "{}\n",
            style::format_success("All plants are cared for.", opts.no_color)
        );
    }

    let mut output = format!(
        "{}\n\n",
        style::format_title(&format!("Needs Attention ({})", total), opts.no_color)
    );
    for item in items {
        let needs: Vec<String> = item
            .overdue
            .iter()
            .map(|care_type| {
                let since = format_days_ago(item.statuses.get(*care_type).days).to_lowercase();
                format!("{} ({})", care_type.label(), since)
            })
            .collect();
        output.push_str(&format!(
            "{}  {}\n",
            style::format_plant_name(item.plant.display_name(), opts.no_color),
            style::paint_level(&needs.join(", "), CareLevel::Overdue, opts.no_color)
        ));
    }
    if items.len() < total {
        output.push_str(&format!("... and {} more\n", total - items.len()));
    }
    output
}

fn format_attention_json(
    items: &[AttentionItem<'_>],
    total: usize,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct AttentionJson<'a> {
        id: &'a str,
        name: &'a str,
        overdue: Vec<&'static str>,
    }

    #[derive(Serialize)]
    struct AttentionList<'a> {
        count: usize,
        plants: Vec<AttentionJson<'a>>,
    }

    let plants = items
        .iter()
        .map(|item| AttentionJson {
            id: &item.plant.id,
            name: item.plant.display_name(),
            overdue: item.overdue.iter().map(|t| t.key()).collect(),
        })
        .collect();

    opts.as_json(&AttentionList {
        count: total,
        plants,
    })
}

fn format_attention_csv(items: &[AttentionItem<'_>], opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "plant_id,name,overdue\n".to_string()
    };
    for item in items {
        let overdue: Vec<&str> = item.overdue.iter().map(|t| t.key()).collect();
        output.push_str(&format!(
            "{},{},{}\n",
            csv_escape(&item.plant.id),
            csv_escape(item.plant.display_name()),
            overdue.join(";")
        ));
    }
    output
}
