//! List command implementation.
//!
//! The plant library: search, filter, sort and paginate the collection,
//! shown as a table (grid view) or one line per plant (list view).

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tabled::builder::Builder;

use saintpaulia_core::{
    CareEngine, LibraryFilter, LibraryPage, LibraryQuery, LibrarySort, PlantCareStatuses,
    Snapshot,
};
use saintpaulia_types::{CareType, Plant};

use crate::cli::{OutputFormat, ViewMode};
use crate::format::{FormatOptions, csv_escape, format_date, format_days_ago, format_instant};
use crate::style;
use crate::util::write_output;

/// Terminal width below which the grid drops its secondary columns
const NARROW_WIDTH: usize = 100;

/// Arguments for the list command
pub struct ListArgs {
    pub search: Option<String>,
    pub filter: LibraryFilter,
    pub sort: LibrarySort,
    pub page: usize,
    pub per_page: usize,
    pub view: ViewMode,
}

pub fn cmd_list(
    snapshot: &Snapshot,
    engine: &CareEngine,
    args: ListArgs,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let engine = engine.pinned();
    let mut query = LibraryQuery::new()
        .filter(args.filter)
        .sort(args.sort)
        .page(args.page)
        .per_page(args.per_page);
    if let Some(search) = args.search {
        query = query.search(search);
    }
    let page = query.run(&snapshot.plants, &engine);
    let rows: Vec<(&Plant, PlantCareStatuses)> = page
        .plants
        .iter()
        .map(|plant| (*plant, engine.plant_statuses(plant)))
        .collect();

    let content = match format {
        OutputFormat::Json => format_list_json(&page, &rows, opts)?,
        OutputFormat::Csv => format_list_csv(&rows, opts),
        OutputFormat::Text => match args.view {
            ViewMode::Grid => format_list_grid(&page, &rows, opts, style::terminal_width()),
            ViewMode::List => format_list_lines(&page, &rows, opts),
        },
    };

    write_output(output, &content)?;
    Ok(())
}

/// "Page 1 of 3 (50 plants)"
fn page_footer(page: &LibraryPage<'_>) -> String {
    let noun = if page.total_matches == 1 { "plant" } else { "plants" };
    format!(
        "Page {} of {} ({} {})\n",
        page.page, page.pages, page.total_matches, noun
    )
}

fn care_cell(statuses: &PlantCareStatuses, care_type: CareType, opts: &FormatOptions) -> String {
    let status = statuses.get(care_type);
    style::paint_level(&format_days_ago(status.days), status.status, opts.no_color)
}

fn format_list_grid(
    page: &LibraryPage<'_>,
    rows: &[(&Plant, PlantCareStatuses)],
    opts: &FormatOptions,
    width: usize,
) -> String {
    if page.total_matches == 0 {
        return "No plants found.\n".to_string();
    }

    let narrow = width < NARROW_WIDTH;
    let mut builder = Builder::default();
    let mut header = vec!["Name"];
    if !narrow {
        header.extend(["Cultivar", "Location"]);
    }
    header.extend(["Watering", "Fertilizing", "Grooming", "Bloom"]);
    builder.push_record(header);

    for (plant, statuses) in rows {
        let mut record = vec![plant.display_name().to_string()];
        if !narrow {
            record.push(plant.cultivar_name.clone());
            record.push(plant.location.clone().unwrap_or_else(|| "-".to_string()));
        }
        for care_type in CareType::ALL {
            record.push(care_cell(statuses, care_type, opts));
        }
        record.push(if plant.is_blooming { "yes" } else { "" }.to_string());
        builder.push_record(record);
    }

    let mut table = builder.build();
    style::apply_table_style(&mut table, opts.style);
    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&page_footer(page));
    output
}

fn format_list_lines(
    page: &LibraryPage<'_>,
    rows: &[(&Plant, PlantCareStatuses)],
    opts: &FormatOptions,
) -> String {
    if page.total_matches == 0 {
        return "No plants found.\n".to_string();
    }

    let mut output = String::new();
    for (plant, statuses) in rows {
        let overdue = statuses.overdue_types();
        let state = if overdue.is_empty() {
            "up to date".to_string()
        } else {
            let needs: Vec<&str> = overdue.iter().map(|t| t.key()).collect();
            format!("needs {}", needs.join(", "))
        };
        let bloom = if plant.is_blooming { " [blooming]" } else { "" };
        output.push_str(&format!(
            "{}  {}{}\n",
            style::format_plant_name(plant.display_name(), opts.no_color),
            style::paint_level(&state, statuses.worst(), opts.no_color),
            bloom
        ));
    }
    output.push_str(&page_footer(page));
    output
}

fn format_list_json(
    page: &LibraryPage<'_>,
    rows: &[(&Plant, PlantCareStatuses)],
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct PlantJson<'a> {
        #[serde(flatten)]
        plant: &'a Plant,
        needs_care: bool,
        care_status: &'a PlantCareStatuses,
    }

    #[derive(Serialize)]
    struct PageJson<'a> {
        total_matches: usize,
        page: usize,
        pages: usize,
        plants: Vec<PlantJson<'a>>,
    }

    let plants = rows
        .iter()
        .map(|(plant, statuses)| PlantJson {
            plant,
            needs_care: statuses.needs_care(),
            care_status: statuses,
        })
        .collect();

    opts.as_json(&PageJson {
        total_matches: page.total_matches,
        page: page.page,
        pages: page.pages,
        plants,
    })
}

fn format_list_csv(rows: &[(&Plant, PlantCareStatuses)], opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "id,name,cultivar_name,location,is_blooming,acquired_date,last_watered,last_fertilized,last_groomed,needs_care\n"
            .to_string()
    };
    for (plant, statuses) in rows {
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            csv_escape(&plant.id),
            csv_escape(plant.display_name()),
            csv_escape(&plant.cultivar_name),
            csv_escape(plant.location.as_deref().unwrap_or_default()),
            plant.is_blooming,
            plant
                .acquired_date
                .map(|d| format_date(Some(d)))
                .unwrap_or_default(),
            format_instant(plant.last_watered),
            format_instant(plant.last_fertilized),
            format_instant(plant.last_groomed),
            statuses.needs_care(),
        ));
    }
    output
}
