// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `run`    — runs the full train + validate flow for a date
//   2. `deploy` — writes the monthly cron deployment spec
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use commands::{Commands, RunArgs, DeployArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "trip-duration-flow",
    version = "0.1.0",
    about = "Train a trip-duration regression model on monthly FHV trip files."
)]
pub struct Cli {
    /// The subcommand to run (run or deploy)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)    => Self::run_flow(args),
            Commands::Deploy(args) => Self::run_deploy(args),
        }
    }

    /// Handles the `run` subcommand.
    /// Parses the reference date here, at the caller boundary, so the
    /// application layer always receives a concrete NaiveDate and never
    /// falls back to an implicit default on its own.
    fn run_flow(args: RunArgs) -> Result<()> {
        use crate::application::flow::TrainFlow;

        let reference_date = NaiveDate::parse_from_str(&args.date, "%Y-%m-%d")
            .with_context(|| {
                format!("Invalid --date '{}': expected YYYY-MM-DD", args.date)
            })?;

        tracing::info!("Starting trip-duration flow for {}", reference_date);

        // Convert CLI args → application config (separates presentation from domain)
        let flow    = TrainFlow::new(args.into_config(reference_date));
        let metrics = flow.execute()?;

        println!(
            "Flow complete. Training RMSE {:.4}, validation RMSE {:.4}. Artifacts saved.",
            metrics.train_rmse, metrics.val_rmse,
        );
        Ok(())
    }

    /// Handles the `deploy` subcommand.
    /// Writes the declarative cron deployment spec to disk.
    fn run_deploy(args: DeployArgs) -> Result<()> {
        use crate::infra::deployment::DeploymentSpec;

        let spec = DeploymentSpec::monthly_training();
        spec.write(&args.output)?;

        println!("Deployment spec written to '{}'", args.output);
        Ok(())
    }
}
