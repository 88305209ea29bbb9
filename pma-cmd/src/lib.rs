//! Command implementations for the PMA dataset CLI.
//!
//! Provides subcommands for downloading the upstream source datasets,
//! validating local CSVs against their schemas, and querying the same
//! store the chart apps use, natively, without a browser.

use clap::Subcommand;
use std::path::PathBuf;

pub mod fetch;
pub mod rank;
pub mod summary;
pub mod validate;

#[derive(Subcommand)]
pub enum Command {
    /// Download the upstream source datasets into a local directory
    Fetch {
        /// Directory to write downloaded (and reshaped) CSVs into
        #[arg(short, long, default_value = "datasets")]
        out_dir: PathBuf,
    },

    /// Validate local dataset CSVs against their expected schemas
    Validate {
        /// Directory containing the dataset CSVs
        #[arg(short, long, default_value = "datasets")]
        datasets_dir: PathBuf,
    },

    /// Print per-dataset coverage and the cross-dataset common-year range
    Summary {
        /// Directory containing the dataset CSVs
        #[arg(short, long, default_value = "datasets")]
        datasets_dir: PathBuf,
    },

    /// Print the top-N countries by derived PM2.5 mortality rate
    Rank {
        /// Directory containing the dataset CSVs
        #[arg(short, long, default_value = "datasets")]
        datasets_dir: PathBuf,

        /// Year to rank
        #[arg(short, long)]
        year: String,

        /// How many countries to list
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch { out_dir } => fetch::run_fetch(&out_dir).await,
        Command::Validate { datasets_dir } => validate::run_validate(&datasets_dir),
        Command::Summary { datasets_dir } => summary::run_summary(&datasets_dir),
        Command::Rank {
            datasets_dir,
            year,
            count,
        } => {
            let year = pma_utils::years::parse_year(&year)?;
            rank::run_rank(&datasets_dir, year, count)
        }
    }
}
