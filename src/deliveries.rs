//! Ball-by-ball delivery records and the CSV loader.
//!
//! The loader is fail-fast: the header is checked for every required column
//! before any row is read, and the first row with a value of the wrong kind
//! aborts the load. Nothing is retried and nothing partial is returned.

use crate::error::{DashboardError, DashboardResult};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Dataset location used when nothing else is configured.
pub const DEFAULT_DATASET: &str = "dataset/ipl_2024_deliveries.csv";

pub const COL_BATTING_TEAM: &str = "batting_team";
pub const COL_BOWLING_TEAM: &str = "bowling_team";
pub const COL_STRIKER: &str = "striker";
pub const COL_BOWLER: &str = "bowler";
pub const COL_VENUE: &str = "venue";
pub const COL_RUNS_OF_BAT: &str = "runs_of_bat";
pub const COL_PLAYER_DISMISSED: &str = "player_dismissed";

/// Columns the aggregation pipeline depends on. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_BATTING_TEAM,
    COL_BOWLING_TEAM,
    COL_STRIKER,
    COL_BOWLER,
    COL_VENUE,
    COL_RUNS_OF_BAT,
    COL_PLAYER_DISMISSED,
];

/// Cell values read as missing. These are the default `na_values` pandas applies
/// when reading CSV, compared against the raw cell without trimming.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One ball bowled.
///
/// Name columns are `None` when the cell is missing; such a delivery still counts
/// towards every grouping whose key is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub batting_team: Option<String>,
    pub bowling_team: Option<String>,
    pub striker: Option<String>,
    pub bowler: Option<String>,
    pub venue: Option<String>,
    /// Runs credited to the striker off the bat
    pub runs_of_bat: u32,
    /// Name of the dismissed player, present only when a wicket fell
    pub player_dismissed: Option<String>,
}

impl Delivery {
    pub fn is_wicket(&self) -> bool {
        self.player_dismissed.is_some()
    }
}

/// Row shape as it appears in the CSV, before null normalization.
#[derive(Debug, Deserialize)]
struct RawDelivery {
    batting_team: Option<String>,
    bowling_team: Option<String>,
    striker: Option<String>,
    bowler: Option<String>,
    venue: Option<String>,
    runs_of_bat: Option<String>,
    player_dismissed: Option<String>,
}

impl RawDelivery {
    /// `row` is the 1-based data row, used in error messages.
    fn into_delivery(self, row: usize) -> DashboardResult<Delivery> {
        Ok(Delivery {
            runs_of_bat: parse_runs(self.runs_of_bat.as_deref(), row)?,
            batting_team: non_null(self.batting_team),
            bowling_team: non_null(self.bowling_team),
            striker: non_null(self.striker),
            bowler: non_null(self.bowler),
            venue: non_null(self.venue),
            player_dismissed: non_null(self.player_dismissed),
        })
    }
}

fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS.contains(&value)
}

fn non_null(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_null_marker(v))
}

/// Parse a runs cell. Missing values count as 0 runs; surrounding whitespace and
/// integral float text (`4.0`) are accepted. Anything else is a schema error.
fn parse_runs(cell: Option<&str>, row: usize) -> DashboardResult<u32> {
    let cell = match cell {
        Some(c) if !is_null_marker(c) => c.trim(),
        _ => return Ok(0),
    };
    if cell.is_empty() {
        return Ok(0);
    }
    if let Ok(runs) = cell.parse::<u32>() {
        return Ok(runs);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => {
            Ok(v as u32)
        }
        _ => Err(DashboardError::schema(format!(
            "row {}: column '{}' has an invalid value '{}' (expected a non-negative whole number)",
            row, COL_RUNS_OF_BAT, cell
        ))),
    }
}

/// Load every delivery from a CSV file.
pub fn load_deliveries(path: &Path) -> DashboardResult<Vec<Delivery>> {
    let file = File::open(path).map_err(|e| DashboardError::load(path, e.to_string()))?;
    let deliveries = read_deliveries(file, path)?;
    log::info!(
        "Loaded {} deliveries from {}",
        deliveries.len(),
        path.display()
    );
    Ok(deliveries)
}

/// Parse deliveries from any reader. Load errors are reported against `<input>`.
pub fn parse_deliveries<R: Read>(input: R) -> DashboardResult<Vec<Delivery>> {
    read_deliveries(input, Path::new("<input>"))
}

fn read_deliveries<R: Read>(input: R, source: &Path) -> DashboardResult<Vec<Delivery>> {
    let mut reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::load(source, e.to_string()))?
        .clone();
    check_required_columns(&headers)?;

    let mut deliveries = Vec::new();
    for (i, result) in reader.deserialize::<RawDelivery>().enumerate() {
        let raw = result.map_err(|e| classify_csv_error(e, &headers, source))?;
        deliveries.push(raw.into_delivery(i + 1)?);
    }

    Ok(deliveries)
}

/// Fail with a schema error naming every required column the header lacks.
pub fn check_required_columns(headers: &StringRecord) -> DashboardResult<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DashboardError::schema(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

/// Value-kind failures are schema errors; everything else the CSV reader reports
/// (I/O, bad UTF-8, ragged rows) is a load error.
fn classify_csv_error(err: csv::Error, headers: &StringRecord, source: &Path) -> DashboardError {
    match err.kind() {
        csv::ErrorKind::Deserialize { pos, err: de_err } => {
            let column = de_err
                .field()
                .and_then(|idx| headers.get(idx as usize))
                .unwrap_or("?");
            // Record 0 is the header, so the record index is already the 1-based data row
            let row = pos.as_ref().map(|p| p.record()).unwrap_or(0);
            DashboardError::schema(format!(
                "row {}: column '{}' has an invalid value ({})",
                row,
                column,
                de_err.kind()
            ))
        }
        _ => DashboardError::load(source, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "match_id,batting_team,bowling_team,striker,bowler,venue,runs_of_bat,player_dismissed";

    fn parse(body: &str) -> DashboardResult<Vec<Delivery>> {
        parse_deliveries(format!("{}\n{}", HEADER, body).as_bytes())
    }

    #[test]
    fn test_parse_basic_rows() {
        let rows = parse("1,CSK,MI,Gaikwad,Bumrah,Chepauk,4,\n1,CSK,MI,Gaikwad,Bumrah,Chepauk,0,Gaikwad\n")
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].batting_team.as_deref(), Some("CSK"));
        assert_eq!(rows[0].runs_of_bat, 4);
        assert!(!rows[0].is_wicket());
        assert_eq!(rows[1].player_dismissed.as_deref(), Some("Gaikwad"));
    }

    #[test]
    fn test_null_markers_are_not_wickets() {
        let rows = parse(
            "1,A,B,X,Y,V,1,NA\n1,A,B,X,Y,V,1,NaN\n1,A,B,X,Y,V,1,n/a\n1,A,B,X,Y,V,1,#N/A\n1,A,B,X,Y,V,1,-nan\n1,A,B,X,Y,V,1,None\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|d| !d.is_wicket()));
    }

    #[test]
    fn test_whitespace_dismissal_is_a_wicket() {
        // Only exact null markers are missing; a blank-looking cell is still a value
        let rows = parse("1,A,B,X,Y,V,0,  \n").unwrap();
        assert!(rows[0].is_wicket());
    }

    #[test]
    fn test_null_name_cells_become_none() {
        let rows = parse("1,NA,B,,Y,nan,2,\n").unwrap();
        assert_eq!(rows[0].batting_team, None);
        assert_eq!(rows[0].bowling_team.as_deref(), Some("B"));
        assert_eq!(rows[0].striker, None);
        assert_eq!(rows[0].venue, None);
        assert_eq!(rows[0].runs_of_bat, 2);
    }

    #[test]
    fn test_empty_runs_counts_as_zero() {
        let rows = parse("1,A,B,X,Y,V,,\n1,A,B,X,Y,V,NaN,\n").unwrap();
        assert_eq!(rows[0].runs_of_bat, 0);
        assert_eq!(rows[1].runs_of_bat, 0);
    }

    #[test]
    fn test_padded_and_float_runs_accepted() {
        let rows = parse("1,A,B,X,Y,V, 4,\n1,A,B,X,Y,V,6.0,\n1,A,B,X,Y,V, 2.0 ,\n").unwrap();
        let runs: Vec<u32> = rows.iter().map(|d| d.runs_of_bat).collect();
        assert_eq!(runs, vec![4, 6, 2]);
    }

    #[test]
    fn test_fractional_and_negative_runs_rejected() {
        for bad in ["2.5", "-1", "inf"] {
            let err = parse(&format!("1,A,B,X,Y,V,{},\n", bad)).unwrap_err();
            assert!(err.is_schema(), "{} should be a schema error", bad);
            assert!(err.to_string().contains(bad));
        }
    }

    #[test]
    fn test_missing_columns_listed() {
        let err = parse_deliveries("batting_team,striker,runs_of_bat\nA,X,1\n".as_bytes()).unwrap_err();
        assert!(err.is_schema());
        let msg = err.to_string();
        assert!(msg.contains("bowling_team"));
        assert!(msg.contains("bowler"));
        assert!(msg.contains("venue"));
        assert!(msg.contains("player_dismissed"));
        assert!(!msg.contains("runs_of_bat"));
    }

    #[test]
    fn test_non_numeric_runs_is_schema_error() {
        let err = parse("1,A,B,X,Y,V,1,\n1,A,B,X,Y,V,four,\n").unwrap_err();
        assert!(err.is_schema());
        let msg = err.to_string();
        assert!(msg.contains("row 2"), "{}", msg);
        assert!(msg.contains("runs_of_bat"), "{}", msg);
    }

    #[test]
    fn test_ragged_row_is_load_error() {
        let err = parse("1,A,B,X,Y,V,1\n").unwrap_err();
        assert!(!err.is_schema());
    }

    #[test]
    fn test_invalid_utf8_is_load_error() {
        let mut bytes = format!("{}\n1,A,B,", HEADER).into_bytes();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b",Y,V,1,\n");
        let err = parse_deliveries(bytes.as_slice()).unwrap_err();
        assert!(!err.is_schema());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_deliveries(&dir.path().join("nope.csv")).unwrap_err();
        match err {
            DashboardError::Load { path, .. } => assert!(path.ends_with("nope.csv")),
            other => panic!("expected load error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let rows = parse_deliveries(format!("{}\n", HEADER).as_bytes()).unwrap();
        assert!(rows.is_empty());
    }
}
