//! Status command implementation.

use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Serialize;

use saintpaulia_core::{CareEngine, CareLevel, PlantCareStatuses, Snapshot};
use saintpaulia_types::Plant;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, csv_escape, describe_status, format_instant, format_level};
use crate::style;
use crate::util::write_output;

pub fn cmd_status(
    snapshot: &Snapshot,
    engine: &CareEngine,
    query: &str,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let Some(plant) = snapshot.find_plant(query) else {
        bail!(
            "No plant matches '{}'. Run 'saintpaulia list' to see the collection.",
            query
        );
    };

    let statuses = engine.plant_statuses(plant);

    let content = match format {
        OutputFormat::Json => format_status_json(plant, &statuses, opts)?,
        OutputFormat::Csv => format_status_csv(plant, &statuses, opts),
        OutputFormat::Text => format_status_text(plant, &statuses, opts),
    };

    write_output(output, &content)?;
    Ok(())
}

/// Format statuses as one line per care type
fn format_status_text(plant: &Plant, statuses: &PlantCareStatuses, opts: &FormatOptions) -> String {
    let mut output = format!(
        "{}\n",
        style::format_title(plant.display_name(), opts.no_color)
    );
    if plant.nickname.as_deref().is_some_and(|n| !n.trim().is_empty()) {
        output.push_str(&format!("{}\n", plant.cultivar_name));
    }
    output.push('\n');

    for (care_type, status) in statuses.iter() {
        output.push_str(&format!(
            "{:<12} {:<10} {}\n",
            care_type.label(),
            format_level(status.status, opts.no_color),
            style::paint_level(&describe_status(&status), status.status, opts.no_color)
        ));
    }

    let overdue = statuses.overdue_types();
    output.push('\n');
    if overdue.is_empty() {
        output.push_str(&style::format_success("All care is up to date.", opts.no_color));
    } else {
        let needs: Vec<&str> = overdue.iter().map(|t| t.key()).collect();
        output.push_str(&format!("Needs: {}", needs.join(", ")));
    }
    output.push('\n');

    if plant.is_blooming {
        output.push_str("In bloom\n");
    }
    output
}

/// Format statuses as JSON output
fn format_status_json(
    plant: &Plant,
    statuses: &PlantCareStatuses,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct StatusJson<'a> {
        id: &'a str,
        name: &'a str,
        cultivar_name: &'a str,
        is_blooming: bool,
        needs_care: bool,
        worst: CareLevel,
        statuses: &'a PlantCareStatuses,
        overdue: Vec<&'static str>,
    }

    let json = StatusJson {
        id: &plant.id,
        name: plant.display_name(),
        cultivar_name: &plant.cultivar_name,
        is_blooming: plant.is_blooming,
        needs_care: statuses.needs_care(),
        worst: statuses.worst(),
        statuses,
        overdue: statuses.overdue_types().iter().map(|t| t.key()).collect(),
    };

    opts.as_json(&json)
}

/// Format statuses as CSV, one row per care type
fn format_status_csv(plant: &Plant, statuses: &PlantCareStatuses, opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "plant_id,name,care_type,status,days,last_care\n".to_string()
    };
    for (care_type, status) in statuses.iter() {
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_escape(&plant.id),
            csv_escape(plant.display_name()),
            care_type.key(),
            status.status.key(),
            status.days.map(|d| d.to_string()).unwrap_or_default(),
            format_instant(plant.last_care(care_type)),
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};

    const NOW: OffsetDateTime = datetime!(2024-06-15 12:00:00 UTC);

    fn plant() -> Plant {
        let mut plant = Plant::new("p-1", "Optimara EverGrace");
        plant.nickname = Some("Grace".to_string());
        plant.last_watered = Some(NOW - Duration::days(10));
        plant.last_fertilized = Some(NOW - Duration::days(12));
        plant
    }

    fn statuses(plant: &Plant) -> PlantCareStatuses {
        CareEngine::default().at(NOW).plant_statuses(plant)
    }

    fn opts() -> FormatOptions {
        FormatOptions::new(true, crate::cli::StyleMode::Rich)
    }

    #[test]
    fn test_status_text_lists_every_care_type() {
        let plant = plant();
        let text = format_status_text(&plant, &statuses(&plant), &opts());
        assert!(text.starts_with("Grace\n"));
        assert!(text.contains("Optimara EverGrace"));
        assert!(text.contains("[OVERDUE]  10 days ago (overdue)"));
        assert!(text.contains("[SOON]     12 days ago (due soon)"));
        assert!(text.contains("Never (overdue)"));
        assert!(text.contains("Needs: watering, grooming"));
    }

    #[test]
    fn test_status_json_shape() {
        let plant = plant();
        let json = format_status_json(&plant, &statuses(&plant), &opts()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "p-1");
        assert_eq!(value["needs_care"], true);
        assert_eq!(value["worst"], "overdue");
        assert_eq!(value["statuses"]["fertilizing"]["status"], "soon");
        assert_eq!(value["statuses"]["grooming"]["days"], serde_json::Value::Null);
        assert_eq!(value["overdue"], serde_json::json!(["watering", "grooming"]));
    }

    #[test]
    fn test_status_csv_rows() {
        let plant = plant();
        let csv = format_status_csv(&plant, &statuses(&plant), &opts());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "plant_id,name,care_type,status,days,last_care");
        assert_eq!(lines[1], "p-1,Grace,watering,overdue,10,2024-06-05T12:00:00Z");
        assert_eq!(lines[3], "p-1,Grace,grooming,overdue,,");

        let headless = format_status_csv(&plant, &statuses(&plant), &opts().with_no_header(true));
        assert_eq!(headless.lines().count(), 3);
    }
}
