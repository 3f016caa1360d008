//! Excel export of the aggregated tables.

use crate::aggregate::Aggregates;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use std::path::Path;

/// Write one sheet per table plus a Summary sheet. Returns a short report of what was written.
pub fn export_workbook(aggregates: &Aggregates, source: &Path, output: &Path) -> Result<String> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    // ---------------------------------------------------------------
    // Summary sheet (first tab)
    // ---------------------------------------------------------------
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;

        let title_fmt = Format::new().set_bold().set_font_size(16);
        let left_fmt = Format::new().set_align(FormatAlign::Left);
        let mut row: u32 = 0;

        sheet.write_string_with_format(row, 0, "IPL 2024 Analysis", &title_fmt)?;
        row += 2;

        let source_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("(unknown)");
        sheet.write_string_with_format(row, 0, "Source CSV", &bold)?;
        sheet.write_string_with_format(row, 1, source_name, &left_fmt)?;
        row += 1;

        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        sheet.write_string_with_format(row, 0, "Generated", &bold)?;
        sheet.write_string_with_format(row, 1, &now, &left_fmt)?;
        row += 2;

        let counts = [
            ("Teams", aggregates.teams.len()),
            ("Venues", aggregates.venues.len()),
            ("Top Batters", aggregates.top_batters.len()),
            ("Top Bowlers", aggregates.top_bowlers.len()),
        ];
        for (label, count) in counts {
            sheet.write_string_with_format(row, 0, label, &bold)?;
            sheet.write_number_with_format(row, 1, count as f64, &left_fmt)?;
            row += 1;
        }

        sheet.set_column_width(0, 18)?;
        sheet.set_column_width(1, 28)?;
    }

    // ---------------------------------------------------------------
    // Table sheets
    // ---------------------------------------------------------------
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Teams")?;
        let rows: Vec<(&str, Vec<u64>)> = aggregates
            .teams
            .iter()
            .map(|t| (t.team.as_str(), vec![t.total_runs, t.total_wickets]))
            .collect();
        write_table(sheet, &["Team", "Total Runs", "Total Wickets"], &rows, &bold)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Top Batters")?;
        let rows: Vec<(&str, Vec<u64>)> = aggregates
            .top_batters
            .iter()
            .map(|b| (b.striker.as_str(), vec![b.total_runs]))
            .collect();
        write_table(sheet, &["Batter", "Total Runs"], &rows, &bold)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Top Bowlers")?;
        let rows: Vec<(&str, Vec<u64>)> = aggregates
            .top_bowlers
            .iter()
            .map(|b| (b.bowler.as_str(), vec![b.total_wickets]))
            .collect();
        write_table(sheet, &["Bowler", "Total Wickets"], &rows, &bold)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Venues")?;
        let rows: Vec<(&str, Vec<u64>)> = aggregates
            .venues
            .iter()
            .map(|v| (v.venue.as_str(), vec![v.total_runs, v.total_wickets]))
            .collect();
        write_table(sheet, &["Venue", "Total Runs", "Total Wickets"], &rows, &bold)?;
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    workbook
        .save(output)
        .map_err(|e| anyhow::anyhow!("Failed to save workbook: {}", e))?;

    log::info!("Wrote workbook {}", output.display());

    Ok(format!(
        "Workbook created: {}\n  Teams: {}\n  Venues: {}\n  Top batters: {}\n  Top bowlers: {}",
        output.display(),
        aggregates.teams.len(),
        aggregates.venues.len(),
        aggregates.top_batters.len(),
        aggregates.top_bowlers.len(),
    ))
}

/// Header row, then one row per entry: name in column A, numbers after it.
fn write_table(
    sheet: &mut Worksheet,
    headers: &[&str],
    rows: &[(&str, Vec<u64>)],
    header_fmt: &Format,
) -> Result<()> {
    for (col, h) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *h, header_fmt)?;
    }

    let mut name_width = headers[0].len();
    for (i, (name, values)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, *name)?;
        for (j, value) in values.iter().enumerate() {
            sheet.write_number(row, (j + 1) as u16, *value as f64)?;
        }
        name_width = name_width.max(name.chars().count());
    }

    sheet.set_column_width(0, (name_width + 2) as f64)?;
    for col in 1..headers.len() {
        sheet.set_column_width(col as u16, 15)?;
    }

    if !rows.is_empty() {
        sheet.autofilter(0, 0, rows.len() as u32, (headers.len() - 1) as u16)?;
    }
    Ok(())
}
