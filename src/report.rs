//! Plain-text rendering of the dashboard: fixed-width tables and text bar charts.

use crate::aggregate::Aggregates;
use crate::chart::{self, BarChart};
use crate::selection::{FilteredView, Selection};
use anyhow::Result;
use std::fmt::Write;

/// Width of the name column in tables and charts.
const NAME_WIDTH: usize = 32;

/// Default bar length for text charts, in characters.
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// All four tables in full, as produced by the pipeline, followed by the five
/// charts drawn over those tables with nothing highlighted.
pub fn render_summary(aggregates: &Aggregates) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "{:=^72}", " Team Performance ")?;
    write_team_header(&mut out)?;
    for t in &aggregates.teams {
        write_perf_row(&mut out, &t.team, t.total_runs, t.total_wickets)?;
    }

    writeln!(out, "\n{:=^72}", " Venue Performance ")?;
    write_venue_header(&mut out)?;
    for v in &aggregates.venues {
        write_perf_row(&mut out, &v.venue, v.total_runs, v.total_wickets)?;
    }

    writeln!(out, "\n{:=^72}", " Top Batters ")?;
    write_batters(&mut out, &aggregates.top_batters)?;

    writeln!(out, "\n{:=^72}", " Top Bowlers ")?;
    write_bowlers(&mut out, &aggregates.top_bowlers)?;

    let full = FilteredView {
        team: None,
        venue: None,
        batters: &aggregates.top_batters,
        bowlers: &aggregates.top_bowlers,
    };
    write_charts(&mut out, aggregates, &full)?;

    Ok(out)
}

/// The filtered tables for one selection.
pub fn render_tables(view: &FilteredView<'_>) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "{:=^72}", " Team Performance ")?;
    write_team_header(&mut out)?;
    match view.team {
        Some(t) => write_perf_row(&mut out, &t.team, t.total_runs, t.total_wickets)?,
        None => writeln!(out, "(no rows)")?,
    }

    writeln!(out, "\n{:=^72}", " Venue Performance ")?;
    write_venue_header(&mut out)?;
    match view.venue {
        Some(v) => write_perf_row(&mut out, &v.venue, v.total_runs, v.total_wickets)?,
        None => writeln!(out, "(no rows)")?,
    }

    writeln!(out, "\n{:=^72}", " Top Batters ")?;
    write_batters(&mut out, view.batters)?;

    writeln!(out, "\n{:=^72}", " Top Bowlers ")?;
    write_bowlers(&mut out, view.bowlers)?;

    Ok(out)
}

/// Draw a horizontal bar chart. Bars are scaled so the largest value spans `width`
/// characters; the highlighted bar is marked with `>`.
pub fn render_chart(chart: &BarChart, width: usize) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", chart.title)?;
    writeln!(
        out,
        "  {:<w$} {}",
        chart.category_label,
        chart.value_label,
        w = NAME_WIDTH
    )?;

    if chart.bars.is_empty() {
        writeln!(out, "  (no data)")?;
        return Ok(out);
    }

    let max = chart.max_value();
    for bar in &chart.bars {
        let len = if max == 0 {
            0
        } else {
            ((bar.value as f64 / max as f64) * width as f64).round() as usize
        };
        let marker = if chart.is_highlighted(bar) { '>' } else { ' ' };
        writeln!(
            out,
            "{} {:<w$} {} {}",
            marker,
            truncate_name(&bar.label, NAME_WIDTH),
            "#".repeat(len),
            bar.value,
            w = NAME_WIDTH
        )?;
    }
    Ok(out)
}

/// Filtered tables followed by the five charts: the whole dashboard as text.
pub fn render_dashboard(aggregates: &Aggregates, selection: &Selection) -> Result<String> {
    let view = selection.apply(aggregates);
    let mut out = String::new();

    writeln!(out, "IPL 2024 Analysis Dashboard")?;
    writeln!(
        out,
        "Team: {}   Venue: {}   Top batters: {}   Top bowlers: {}\n",
        selection.team.as_deref().unwrap_or("-"),
        selection.venue.as_deref().unwrap_or("-"),
        selection.top_batters,
        selection.top_bowlers
    )?;

    out.push_str(&render_tables(&view)?);
    write_charts(&mut out, aggregates, &view)?;

    Ok(out)
}

fn write_charts(out: &mut String, aggregates: &Aggregates, view: &FilteredView<'_>) -> Result<()> {
    writeln!(out, "\n{:=^72}", " Visualizations ")?;
    for c in chart::dashboard_charts(aggregates, view) {
        writeln!(out)?;
        out.push_str(&render_chart(&c, DEFAULT_BAR_WIDTH)?);
    }
    Ok(())
}

/// One team or venue row: name, runs, wickets.
fn write_perf_row(out: &mut String, name: &str, runs: u64, wickets: u64) -> Result<()> {
    writeln!(
        out,
        "{:<w$} {:>12} {:>12}",
        truncate_name(name, NAME_WIDTH),
        runs,
        wickets,
        w = NAME_WIDTH
    )?;
    Ok(())
}

fn write_team_header(out: &mut String) -> Result<()> {
    writeln!(
        out,
        "{:<w$} {:>12} {:>12}",
        "Team",
        "Runs",
        "Wickets",
        w = NAME_WIDTH
    )?;
    writeln!(out, "{:-<72}", "")?;
    Ok(())
}

fn write_venue_header(out: &mut String) -> Result<()> {
    writeln!(
        out,
        "{:<w$} {:>12} {:>12}",
        "Venue",
        "Runs",
        "Wickets",
        w = NAME_WIDTH
    )?;
    writeln!(out, "{:-<72}", "")?;
    Ok(())
}

fn write_batters(out: &mut String, rows: &[crate::aggregate::BatterRuns]) -> Result<()> {
    writeln!(out, "{:>4} {:<w$} {:>12}", "#", "Batter", "Runs", w = NAME_WIDTH)?;
    writeln!(out, "{:-<72}", "")?;
    if rows.is_empty() {
        writeln!(out, "(no rows)")?;
    }
    for (i, b) in rows.iter().enumerate() {
        writeln!(
            out,
            "{:>4} {:<w$} {:>12}",
            i + 1,
            truncate_name(&b.striker, NAME_WIDTH),
            b.total_runs,
            w = NAME_WIDTH
        )?;
    }
    Ok(())
}

fn write_bowlers(out: &mut String, rows: &[crate::aggregate::BowlerWickets]) -> Result<()> {
    writeln!(out, "{:>4} {:<w$} {:>12}", "#", "Bowler", "Wickets", w = NAME_WIDTH)?;
    writeln!(out, "{:-<72}", "")?;
    if rows.is_empty() {
        writeln!(out, "(no rows)")?;
    }
    for (i, b) in rows.iter().enumerate() {
        writeln!(
            out,
            "{:>4} {:<w$} {:>12}",
            i + 1,
            truncate_name(&b.bowler, NAME_WIDTH),
            b.total_wickets,
            w = NAME_WIDTH
        )?;
    }
    Ok(())
}

/// Shorten a name to `max_len` characters, ending in `..` when cut.
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        let kept: String = name.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", kept)
    }
}
