//! Horizontal bar-chart model shared by every front end.
//!
//! Adapters only decide how a bar looks; which bars exist, their order and which
//! one is highlighted are fixed here.

use crate::aggregate::Aggregates;
use crate::selection::FilteredView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChart {
    pub title: String,
    /// Axis holding the bar labels
    pub category_label: String,
    /// Axis holding the bar lengths
    pub value_label: String,
    pub bars: Vec<Bar>,
    /// Label of the bar matching the current selection, if any
    pub highlight: Option<String>,
}

impl BarChart {
    fn new(title: &str, category_label: &str, value_label: &str) -> Self {
        BarChart {
            title: title.to_string(),
            category_label: category_label.to_string(),
            value_label: value_label.to_string(),
            bars: Vec::new(),
            highlight: None,
        }
    }

    fn with_bars(mut self, bars: impl IntoIterator<Item = (String, u64)>) -> Self {
        self.bars = bars
            .into_iter()
            .map(|(label, value)| Bar { label, value })
            .collect();
        self
    }

    fn with_highlight(mut self, label: Option<&str>) -> Self {
        self.highlight = label.map(|s| s.to_string());
        self
    }

    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }

    pub fn is_highlighted(&self, bar: &Bar) -> bool {
        self.highlight.as_deref() == Some(bar.label.as_str())
    }
}

pub fn runs_by_team(aggregates: &Aggregates, view: &FilteredView<'_>) -> BarChart {
    BarChart::new("Total Runs by Team", "Team", "Total Runs")
        .with_bars(aggregates.teams.iter().map(|t| (t.team.clone(), t.total_runs)))
        .with_highlight(view.team.map(|t| t.team.as_str()))
}

pub fn top_batters(view: &FilteredView<'_>) -> BarChart {
    BarChart::new("Top Batters", "Batter", "Total Runs")
        .with_bars(view.batters.iter().map(|b| (b.striker.clone(), b.total_runs)))
}

pub fn top_bowlers(view: &FilteredView<'_>) -> BarChart {
    BarChart::new("Top Bowlers", "Bowler", "Total Wickets")
        .with_bars(view.bowlers.iter().map(|b| (b.bowler.clone(), b.total_wickets)))
}

pub fn runs_by_venue(aggregates: &Aggregates, view: &FilteredView<'_>) -> BarChart {
    BarChart::new("Total Runs by Venue", "Venue", "Total Runs")
        .with_bars(aggregates.venues.iter().map(|v| (v.venue.clone(), v.total_runs)))
        .with_highlight(view.venue.map(|v| v.venue.as_str()))
}

pub fn wickets_by_venue(aggregates: &Aggregates, view: &FilteredView<'_>) -> BarChart {
    BarChart::new("Total Wickets by Venue", "Venue", "Total Wickets")
        .with_bars(
            aggregates
                .venues
                .iter()
                .map(|v| (v.venue.clone(), v.total_wickets)),
        )
        .with_highlight(view.venue.map(|v| v.venue.as_str()))
}

/// The five dashboard charts in display order.
pub fn dashboard_charts(aggregates: &Aggregates, view: &FilteredView<'_>) -> Vec<BarChart> {
    vec![
        runs_by_team(aggregates, view),
        top_batters(view),
        top_bowlers(view),
        runs_by_venue(aggregates, view),
        wickets_by_venue(aggregates, view),
    ]
}
