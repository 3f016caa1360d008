//! IPL Report - text and spreadsheet front end for the aggregation pipeline
//!
//! Loads the deliveries CSV, runs the aggregation pipeline and prints the
//! dashboard tables and charts, or exports them to an Excel workbook.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ipl_dashboard::aggregate::DEFAULT_TOP_N;
use ipl_dashboard::deliveries::DEFAULT_DATASET;
use ipl_dashboard::selection::{TOP_N_MAX, TOP_N_MIN};
use ipl_dashboard::{load_aggregates, report, workbook, Selection, TopN};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ipl-report")]
#[command(about = "Team, player and venue summaries from IPL ball-by-ball data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every aggregated table and chart
    Summary {
        /// Deliveries CSV file
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        input: PathBuf,

        /// Number of batters and bowlers to rank
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },

    /// Print the dashboard view for one team and venue
    Filter {
        /// Deliveries CSV file
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        input: PathBuf,

        /// Team to show (default: first team in the table)
        #[arg(short, long)]
        team: Option<String>,

        /// Venue to show (default: first venue in the table)
        #[arg(short, long)]
        venue: Option<String>,

        /// Number of top batters (5-20)
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(TOP_N_MIN as i64..=TOP_N_MAX as i64))]
        top_batters: u8,

        /// Number of top bowlers (5-20)
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(TOP_N_MIN as i64..=TOP_N_MAX as i64))]
        top_bowlers: u8,
    },

    /// List the teams present in the team performance table
    Teams {
        /// Deliveries CSV file
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        input: PathBuf,
    },

    /// List the venues present in the venue performance table
    Venues {
        /// Deliveries CSV file
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        input: PathBuf,
    },

    /// Export the aggregated tables to an Excel workbook
    Export {
        /// Deliveries CSV file
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        input: PathBuf,

        /// Output .xlsx file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of batters and bowlers to rank
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { input, top_n } => {
            let aggregates = load_aggregates(&input, top_n)?;
            print!("{}", report::render_summary(&aggregates)?);
        }
        Commands::Filter {
            input,
            team,
            venue,
            top_batters,
            top_bowlers,
        } => {
            // Rank as deep as the widest allowed view so any top-N is a prefix
            let aggregates = load_aggregates(&input, TOP_N_MAX as usize)?;
            let defaults = Selection::defaults_for(&aggregates);
            let selection = Selection {
                team: team.or(defaults.team),
                venue: venue.or(defaults.venue),
                top_batters: TopN::clamped(top_batters as usize),
                top_bowlers: TopN::clamped(top_bowlers as usize),
            };
            print!("{}", report::render_dashboard(&aggregates, &selection)?);
        }
        Commands::Teams { input } => {
            let aggregates = load_aggregates(&input, DEFAULT_TOP_N)?;
            for name in aggregates.team_names() {
                println!("{}", name);
            }
        }
        Commands::Venues { input } => {
            let aggregates = load_aggregates(&input, DEFAULT_TOP_N)?;
            for name in aggregates.venue_names() {
                println!("{}", name);
            }
        }
        Commands::Export {
            input,
            output,
            top_n,
        } => {
            let aggregates = load_aggregates(&input, top_n)?;
            let summary = workbook::export_workbook(&aggregates, &input, &output)
                .with_context(|| format!("Failed to export {}", output.display()))?;
            eprintln!("{}", summary);
        }
    }

    Ok(())
}
