//! Aggregation pipeline: turns the delivery table into the dashboard's summary tables.
//!
//! Every grouping iterates its keys in ascending order, so two runs over the same
//! input produce identical tables and ranking ties always resolve the same way.
//! Team and venue tables are inner joins of a runs aggregate and a wickets
//! aggregate: a key present on only one side is dropped.

use crate::deliveries::Delivery;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ranking depth when none is requested.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamPerformance {
    pub team: String,
    /// Runs off the bat while batting
    pub total_runs: u64,
    /// Dismissals taken while bowling
    pub total_wickets: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatterRuns {
    pub striker: String,
    pub total_runs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BowlerWickets {
    pub bowler: String,
    pub total_wickets: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenuePerformance {
    pub venue: String,
    pub total_runs: u64,
    pub total_wickets: u64,
}

/// The four derived tables. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub teams: Vec<TeamPerformance>,
    pub top_batters: Vec<BatterRuns>,
    pub top_bowlers: Vec<BowlerWickets>,
    pub venues: Vec<VenuePerformance>,
}

impl Aggregates {
    /// Team selector options, in table order.
    pub fn team_names(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.team.clone()).collect()
    }

    /// Venue selector options, in table order.
    pub fn venue_names(&self) -> Vec<String> {
        self.venues.iter().map(|v| v.venue.clone()).collect()
    }

    pub fn team(&self, name: &str) -> Option<&TeamPerformance> {
        self.teams.iter().find(|t| t.team == name)
    }

    pub fn venue(&self, name: &str) -> Option<&VenuePerformance> {
        self.venues.iter().find(|v| v.venue == name)
    }
}

/// Run the full pipeline. Rankings keep at most `top_n` rows.
pub fn aggregate(deliveries: &[Delivery], top_n: usize) -> Aggregates {
    let teams = inner_join(&team_runs(deliveries), &team_wickets(deliveries))
        .into_iter()
        .map(|(team, total_runs, total_wickets)| TeamPerformance {
            team,
            total_runs,
            total_wickets,
        })
        .collect::<Vec<_>>();

    let venues = inner_join(&venue_runs(deliveries), &venue_wickets(deliveries))
        .into_iter()
        .map(|(venue, total_runs, total_wickets)| VenuePerformance {
            venue,
            total_runs,
            total_wickets,
        })
        .collect::<Vec<_>>();

    let top_batters = rank_top(batter_totals(deliveries), top_n)
        .into_iter()
        .map(|(striker, total_runs)| BatterRuns {
            striker,
            total_runs,
        })
        .collect::<Vec<_>>();

    let top_bowlers = rank_top(bowler_totals(deliveries), top_n)
        .into_iter()
        .map(|(bowler, total_wickets)| BowlerWickets {
            bowler,
            total_wickets,
        })
        .collect::<Vec<_>>();

    log::info!(
        "Aggregated {} deliveries: {} teams, {} venues, {} batters, {} bowlers",
        deliveries.len(),
        teams.len(),
        venues.len(),
        top_batters.len(),
        top_bowlers.len()
    );

    Aggregates {
        teams,
        top_batters,
        top_bowlers,
        venues,
    }
}

/// Runs off the bat summed per batting team.
pub fn team_runs(deliveries: &[Delivery]) -> BTreeMap<String, u64> {
    sum_by(deliveries, |d| d.batting_team.as_ref())
}

/// Dismissals counted per bowling team.
pub fn team_wickets(deliveries: &[Delivery]) -> BTreeMap<String, u64> {
    count_wickets_by(deliveries, |d| d.bowling_team.as_ref())
}

/// Runs off the bat summed per striker.
pub fn batter_totals(deliveries: &[Delivery]) -> BTreeMap<String, u64> {
    sum_by(deliveries, |d| d.striker.as_ref())
}

/// Dismissals credited per bowler.
pub fn bowler_totals(deliveries: &[Delivery]) -> BTreeMap<String, u64> {
    count_wickets_by(deliveries, |d| d.bowler.as_ref())
}

pub fn venue_runs(deliveries: &[Delivery]) -> BTreeMap<String, u64> {
    sum_by(deliveries, |d| d.venue.as_ref())
}

pub fn venue_wickets(deliveries: &[Delivery]) -> BTreeMap<String, u64> {
    count_wickets_by(deliveries, |d| d.venue.as_ref())
}

/// Sort descending by total and keep the first `n`. The sort is stable, so equal
/// totals stay in key order.
pub fn rank_top(totals: BTreeMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Rows with a missing key are left out of that grouping only.
fn sum_by<'a>(
    deliveries: &'a [Delivery],
    key: impl Fn(&'a Delivery) -> Option<&'a String>,
) -> BTreeMap<String, u64> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for d in deliveries {
        if let Some(k) = key(d) {
            *totals.entry(k.clone()).or_default() += u64::from(d.runs_of_bat);
        }
    }
    totals
}

fn count_wickets_by<'a>(
    deliveries: &'a [Delivery],
    key: impl Fn(&'a Delivery) -> Option<&'a String>,
) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for d in deliveries.iter().filter(|d| d.is_wicket()) {
        if let Some(k) = key(d) {
            *counts.entry(k.clone()).or_default() += 1;
        }
    }
    counts
}

/// Keys present in both maps, in `runs` key order.
fn inner_join(
    runs: &BTreeMap<String, u64>,
    wickets: &BTreeMap<String, u64>,
) -> Vec<(String, u64, u64)> {
    runs.iter()
        .filter_map(|(key, &r)| wickets.get(key).map(|&w| (key.clone(), r, w)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(bat: &str, bowl: &str, striker: &str, bowler: &str, venue: &str, runs: u32, out: Option<&str>) -> Delivery {
        Delivery {
            batting_team: Some(bat.to_string()),
            bowling_team: Some(bowl.to_string()),
            striker: Some(striker.to_string()),
            bowler: Some(bowler.to_string()),
            venue: Some(venue.to_string()),
            runs_of_bat: runs,
            player_dismissed: out.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_team_runs_and_wickets() {
        let data = vec![
            ball("A", "B", "X", "P", "V1", 4, None),
            ball("A", "B", "X", "P", "V1", 2, Some("X")),
            ball("B", "A", "Y", "Q", "V1", 6, None),
        ];
        let runs = team_runs(&data);
        assert_eq!(runs.get("A"), Some(&6));
        assert_eq!(runs.get("B"), Some(&6));

        let wickets = team_wickets(&data);
        assert_eq!(wickets.get("B"), Some(&1));
        assert_eq!(wickets.get("A"), None);
    }

    #[test]
    fn test_team_without_wickets_is_dropped() {
        let data = vec![
            ball("A", "B", "X", "P", "V1", 4, None),
            ball("B", "A", "Y", "Q", "V1", 1, Some("Y")),
        ];
        let agg = aggregate(&data, DEFAULT_TOP_N);
        // A took a wicket and scored runs; B scored runs but never took a wicket
        assert_eq!(agg.team_names(), vec!["A".to_string()]);
        assert_eq!(agg.teams[0].total_runs, 4);
        assert_eq!(agg.teams[0].total_wickets, 1);
    }

    #[test]
    fn test_rank_top_ties_keep_key_order() {
        let mut totals = BTreeMap::new();
        totals.insert("zed".to_string(), 5);
        totals.insert("amy".to_string(), 5);
        totals.insert("bob".to_string(), 9);
        totals.insert("cal".to_string(), 1);

        let ranked = rank_top(totals, 3);
        assert_eq!(
            ranked,
            vec![
                ("bob".to_string(), 9),
                ("amy".to_string(), 5),
                ("zed".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_rank_top_shorter_than_n() {
        let mut totals = BTreeMap::new();
        totals.insert("solo".to_string(), 3);
        assert_eq!(rank_top(totals, 10).len(), 1);
    }

    #[test]
    fn test_bowler_totals_ignore_dot_balls() {
        let data = vec![
            ball("A", "B", "X", "P", "V1", 0, None),
            ball("A", "B", "X", "P", "V1", 0, Some("X")),
            ball("A", "B", "W", "R", "V1", 0, Some("W")),
            ball("A", "B", "W", "P", "V1", 0, Some("W")),
        ];
        let totals = bowler_totals(&data);
        assert_eq!(totals.get("P"), Some(&2));
        assert_eq!(totals.get("R"), Some(&1));
    }

    #[test]
    fn test_venue_lookup() {
        let data = vec![
            ball("A", "B", "X", "P", "Wankhede", 3, Some("X")),
            ball("A", "B", "X", "P", "Eden", 3, None),
        ];
        let agg = aggregate(&data, DEFAULT_TOP_N);
        assert_eq!(agg.venue_names(), vec!["Wankhede".to_string()]);
        assert!(agg.venue("Eden").is_none());
        assert_eq!(agg.venue("Wankhede").map(|v| v.total_wickets), Some(1));
    }

    #[test]
    fn test_missing_keys_skip_only_their_grouping() {
        let mut no_venue = ball("A", "B", "X", "P", "V", 6, Some("X"));
        no_venue.venue = None;
        let mut no_striker = ball("A", "B", "X", "P", "V", 4, None);
        no_striker.striker = None;
        let mut no_bowler = ball("A", "B", "W", "P", "V", 0, Some("W"));
        no_bowler.bowler = None;
        let data = vec![no_venue, no_striker, no_bowler, ball("B", "A", "Y", "Q", "V", 1, Some("Y"))];

        let agg = aggregate(&data, DEFAULT_TOP_N);
        assert_eq!(agg.venue_names(), vec!["V".to_string()]);
        assert_eq!(agg.venue("V").map(|v| (v.total_runs, v.total_wickets)), Some((5, 2)));
        assert!(agg.top_batters.iter().all(|b| !b.striker.is_empty()));
        assert_eq!(agg.top_batters[0].striker, "X");
        assert_eq!(agg.top_batters[0].total_runs, 6);
        assert_eq!(
            agg.top_bowlers,
            vec![
                BowlerWickets {
                    bowler: "P".to_string(),
                    total_wickets: 1,
                },
                BowlerWickets {
                    bowler: "Q".to_string(),
                    total_wickets: 1,
                },
            ]
        );
        // Team grouping still sees every row
        assert_eq!(agg.team("A").map(|t| t.total_runs), Some(10));
    }

    #[test]
    fn test_empty_input() {
        let agg = aggregate(&[], DEFAULT_TOP_N);
        assert_eq!(agg, Aggregates::default());
    }
}
