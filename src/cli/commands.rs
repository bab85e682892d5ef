// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `run` and `deploy`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use crate::application::flow::FlowConfig;

/// The default reference date when the flow is invoked with no override.
/// Scheduled runs that want a different as-of date pass --date explicitly.
pub const DEFAULT_REFERENCE_DATE: &str = "2021-08-15";

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full flow: resolve monthly files, train, validate, persist
    Run(RunArgs),

    /// Write the monthly cron deployment spec as JSON
    Deploy(DeployArgs),
}

/// All arguments for the `run` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Reference date (YYYY-MM-DD) driving which monthly files are used:
    /// training = date - 2 months, validation = date - 1 month
    #[arg(long, default_value = DEFAULT_REFERENCE_DATE)]
    pub date: String,

    /// Directory containing fhv_tripdata_<YYYY-MM>.parquet files
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Directory where the model and vectorizer artifacts are saved
    #[arg(long, default_value = "./models")]
    pub models_dir: PathBuf,
}

impl RunArgs {
    /// Convert CLI RunArgs into the application-layer FlowConfig.
    /// This is the boundary between Layer 1 and Layer 2 —
    /// the application layer never sees clap types, and it receives
    /// the reference date already parsed.
    pub fn into_config(self, reference_date: NaiveDate) -> FlowConfig {
        FlowConfig {
            reference_date,
            data_dir:    self.data_dir,
            models_dir:  self.models_dir,
            categorical: FlowConfig::default_categorical(),
        }
    }
}

/// All arguments for the `deploy` command
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Where to write the deployment spec JSON
    #[arg(long, default_value = "deployment.json")]
    pub output: String,
}
