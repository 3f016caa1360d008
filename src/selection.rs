//! Filter/selection over the aggregated tables. Pure slicing, no aggregation.

use crate::aggregate::{Aggregates, BatterRuns, BowlerWickets, TeamPerformance, VenuePerformance};
use std::fmt;

pub const TOP_N_MIN: u8 = 5;
pub const TOP_N_MAX: u8 = 20;
pub const TOP_N_DEFAULT: u8 = 10;

/// A top-N count held inside `TOP_N_MIN..=TOP_N_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TopN(u8);

impl TopN {
    /// Saturate `n` into the allowed range.
    pub fn clamped(n: usize) -> Self {
        let n = n.clamp(TOP_N_MIN as usize, TOP_N_MAX as usize);
        TopN(n as u8)
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        TopN(TOP_N_DEFAULT)
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User choices driving the filtered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub team: Option<String>,
    pub venue: Option<String>,
    pub top_batters: TopN,
    pub top_bowlers: TopN,
}

/// What the presentation layer shows for one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredView<'a> {
    /// The selected team's row, absent when the team is not in the joined table
    pub team: Option<&'a TeamPerformance>,
    pub venue: Option<&'a VenuePerformance>,
    pub batters: &'a [BatterRuns],
    pub bowlers: &'a [BowlerWickets],
}

impl Selection {
    /// First team and first venue selected, default top-N counts.
    pub fn defaults_for(aggregates: &Aggregates) -> Self {
        Selection {
            team: aggregates.teams.first().map(|t| t.team.clone()),
            venue: aggregates.venues.first().map(|v| v.venue.clone()),
            ..Default::default()
        }
    }

    /// Keep the current team/venue if they still exist, otherwise fall back to the
    /// first available option. Top-N counts are left alone.
    pub fn rebase(&self, aggregates: &Aggregates) -> Self {
        let defaults = Selection::defaults_for(aggregates);
        let team = match &self.team {
            Some(t) if aggregates.team(t).is_some() => Some(t.clone()),
            _ => defaults.team,
        };
        let venue = match &self.venue {
            Some(v) if aggregates.venue(v).is_some() => Some(v.clone()),
            _ => defaults.venue,
        };
        Selection {
            team,
            venue,
            top_batters: self.top_batters,
            top_bowlers: self.top_bowlers,
        }
    }

    pub fn apply<'a>(&self, aggregates: &'a Aggregates) -> FilteredView<'a> {
        FilteredView {
            team: self.team.as_deref().and_then(|t| aggregates.team(t)),
            venue: self.venue.as_deref().and_then(|v| aggregates.venue(v)),
            batters: prefix(&aggregates.top_batters, self.top_batters),
            bowlers: prefix(&aggregates.top_bowlers, self.top_bowlers),
        }
    }
}

fn prefix<T>(rows: &[T], n: TopN) -> &[T] {
    &rows[..n.get().min(rows.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Aggregates {
        Aggregates {
            teams: vec![
                TeamPerformance {
                    team: "CSK".to_string(),
                    total_runs: 100,
                    total_wickets: 7,
                },
                TeamPerformance {
                    team: "MI".to_string(),
                    total_runs: 90,
                    total_wickets: 9,
                },
            ],
            top_batters: (0..12)
                .map(|i| BatterRuns {
                    striker: format!("bat{:02}", i),
                    total_runs: 200 - i,
                })
                .collect(),
            top_bowlers: (0..3)
                .map(|i| BowlerWickets {
                    bowler: format!("bowl{}", i),
                    total_wickets: 10 - i,
                })
                .collect(),
            venues: vec![VenuePerformance {
                venue: "Chepauk".to_string(),
                total_runs: 190,
                total_wickets: 16,
            }],
        }
    }

    #[test]
    fn test_top_n_clamped() {
        assert_eq!(TopN::clamped(0).get(), 5);
        assert_eq!(TopN::clamped(12).get(), 12);
        assert_eq!(TopN::clamped(99).get(), 20);
        assert_eq!(TopN::default().get(), 10);
    }

    #[test]
    fn test_defaults_pick_first_options() {
        let agg = sample();
        let sel = Selection::defaults_for(&agg);
        assert_eq!(sel.team.as_deref(), Some("CSK"));
        assert_eq!(sel.venue.as_deref(), Some("Chepauk"));
    }

    #[test]
    fn test_apply_filters_and_slices() {
        let agg = sample();
        let sel = Selection {
            team: Some("MI".to_string()),
            venue: Some("Chepauk".to_string()),
            top_batters: TopN::clamped(5),
            top_bowlers: TopN::clamped(20),
        };
        let view = sel.apply(&agg);
        assert_eq!(view.team.map(|t| t.total_wickets), Some(9));
        assert_eq!(view.venue.map(|v| v.total_runs), Some(190));
        assert_eq!(view.batters.len(), 5);
        assert_eq!(view.batters[0].striker, "bat00");
        // Fewer bowlers than requested: the whole table
        assert_eq!(view.bowlers.len(), 3);
    }

    #[test]
    fn test_unknown_team_is_empty_not_error() {
        let agg = sample();
        let sel = Selection {
            team: Some("RCB".to_string()),
            venue: Some("Eden Gardens".to_string()),
            ..Default::default()
        };
        let view = sel.apply(&agg);
        assert!(view.team.is_none());
        assert!(view.venue.is_none());
        assert_eq!(view.batters.len(), 10);
    }

    #[test]
    fn test_rebase_keeps_valid_choice() {
        let agg = sample();
        let sel = Selection {
            team: Some("MI".to_string()),
            venue: Some("Gone".to_string()),
            top_batters: TopN::clamped(7),
            top_bowlers: TopN::default(),
        };
        let rebased = sel.rebase(&agg);
        assert_eq!(rebased.team.as_deref(), Some("MI"));
        assert_eq!(rebased.venue.as_deref(), Some("Chepauk"));
        assert_eq!(rebased.top_batters.get(), 7);
    }
}
