//! Activity command implementation.
//!
//! The recent care feed, collection-wide or for one plant.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Serialize;
use time::OffsetDateTime;

use saintpaulia_core::{PLANT_HISTORY_LIMIT, RECENT_ACTIVITY_LIMIT, Snapshot, recent_activity};
use saintpaulia_types::{CareLog, Plant, UNNAMED_PLANT};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, csv_escape, fertilizer_label, format_instant, format_log_age};
use crate::style;
use crate::util::write_output;

pub fn cmd_activity(
    snapshot: &Snapshot,
    plant: Option<&str>,
    limit: Option<usize>,
    now: OffsetDateTime,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let plant_id = match plant {
        Some(query) => match snapshot.find_plant(query) {
            Some(plant) => Some(plant.id.as_str()),
            None => bail!("No plant matches '{}'", query),
        },
        None => None,
    };
    let limit = limit.unwrap_or(if plant_id.is_some() {
        PLANT_HISTORY_LIMIT
    } else {
        RECENT_ACTIVITY_LIMIT
    });

    let logs = recent_activity(&snapshot.care_logs, plant_id, limit);
    let names = PlantNames::new(&snapshot.plants);

    let content = match format {
        OutputFormat::Json => format_activity_json(&logs, &names, opts)?,
        OutputFormat::Csv => format_activity_csv(&logs, &names, opts),
        OutputFormat::Text => format_activity_text(&logs, &names, now, opts),
    };

    write_output(output, &content)?;
    Ok(())
}

/// Display names by plant id
struct PlantNames<'a>(HashMap<&'a str, &'a str>);

impl<'a> PlantNames<'a> {
    fn new(plants: &'a [Plant]) -> Self {
        Self(
            plants
                .iter()
                .map(|p| (p.id.as_str(), p.display_name()))
                .collect(),
        )
    }

    /// Name for a log's plant; logs for unknown plants get a placeholder
    fn of(&self, log: &CareLog) -> &'a str {
        self.0
            .get(log.plant_id.as_str())
            .copied()
            .unwrap_or(UNNAMED_PLANT)
    }
}

fn format_activity_text(
    logs: &[&CareLog],
    names: &PlantNames<'_>,
    now: OffsetDateTime,
    opts: &FormatOptions,
) -> String {
    if logs.is_empty() {
        return format!("{}\n", style::format_info("No care logged yet.", opts.no_color));
    }

    let mut output = format!("{}\n\n", style::format_title("Recent Activity", opts.no_color));
    for log in logs {
        let mut line = format!(
            "{:<11} {:<12} {}",
            format_log_age(log.care_date, now),
            log.care_type.label(),
            style::format_plant_name(names.of(log), opts.no_color)
        );
        if let Some(fertilizer) = &log.fertilizer_type {
            line.push_str(&format!(" ({})", fertilizer_label(fertilizer)));
        }
        if let Some(notes) = &log.notes {
            line.push_str(&format!(": {}", notes));
        }
        output.push_str(&line);
        output.push('\n');
    }
    output
}

fn format_activity_json(
    logs: &[&CareLog],
    names: &PlantNames<'_>,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct ActivityJson<'a> {
        #[serde(flatten)]
        log: &'a CareLog,
        plant_name: &'a str,
    }

    let entries: Vec<ActivityJson<'_>> = logs
        .iter()
        .map(|log| ActivityJson {
            log,
            plant_name: names.of(log),
        })
        .collect();

    opts.as_json(&entries)
}

fn format_activity_csv(
    logs: &[&CareLog],
    names: &PlantNames<'_>,
    opts: &FormatOptions,
) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "care_date,plant_id,plant_name,care_type,fertilizer_type,notes\n".to_string()
    };
    for log in logs {
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            format_instant(Some(log.care_date)),
            csv_escape(&log.plant_id),
            csv_escape(names.of(log)),
            log.care_type.key(),
            csv_escape(log.fertilizer_type.as_deref().unwrap_or_default()),
            csv_escape(log.notes.as_deref().unwrap_or_default()),
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use saintpaulia_types::CareType;
    use time::Duration;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-06-15 12:00:00 UTC);

    fn logs() -> Vec<CareLog> {
        vec![
            CareLog::new("1", CareType::Watering, NOW - Duration::hours(3)),
            CareLog::new("1", CareType::Fertilizing, NOW - Duration::days(2))
                .with_fertilizer("bloom")
                .with_notes("Quarter strength, wicking"),
        ]
    }

    fn plants() -> Vec<Plant> {
        let mut plant = Plant::new("1", "Optimara EverGrace");
        plant.nickname = Some("Grace".to_string());
        vec![plant]
    }

    fn opts() -> FormatOptions {
        FormatOptions::new(true, crate::cli::StyleMode::Plain)
    }

    #[test]
    fn test_activity_text() {
        let plants = plants();
        let logs = logs();
        let refs: Vec<&CareLog> = logs.iter().collect();
        let text = format_activity_text(&refs, &PlantNames::new(&plants), NOW, &opts());
        assert!(text.contains("3h ago      Watering     Grace\n"));
        assert!(text.contains(
            "2 days ago  Fertilizing  Grace (Bloom Booster): Quarter strength, wicking\n"
        ));
    }

    #[test]
    fn test_activity_text_empty() {
        assert_eq!(
            format_activity_text(&[], &PlantNames::new(&[]), NOW, &opts()),
            "[--] No care logged yet.\n"
        );
    }

    #[test]
    fn test_activity_json_and_csv() {
        let plants = plants();
        let logs = logs();
        let refs: Vec<&CareLog> = logs.iter().collect();

        let json = format_activity_json(&refs, &PlantNames::new(&plants), &opts()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["care_type"], "watering");
        assert_eq!(value[0]["plant_name"], "Grace");
        assert_eq!(value[1]["fertilizer_type"], "bloom");

        let csv = format_activity_csv(&refs, &PlantNames::new(&plants), &opts());
        assert!(csv.contains(",1,Grace,fertilizing,bloom,\"Quarter strength, wicking\"\n"));
    }
}
