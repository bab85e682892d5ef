// ============================================================
// Layer 6 — Run Metrics Logger
// ============================================================
// Records the metrics of each flow run to a CSV file.
//
// Why log metrics to CSV?
//   - Easy to open in Excel or Google Sheets
//   - Can compare months to spot drift in the data
//   - Provides a permanent record of each scheduled run
//
// Metrics recorded per run:
//   - reference_date:      the run's as-of date
//   - train_mean_duration: mean duration of retained training rows
//   - val_mean_duration:   mean duration of retained validation rows
//   - feature_count:       width of the fitted feature space
//   - train_rmse:          in-sample training error
//   - val_rmse:            out-of-sample validation error
//
// Output file: models/metrics.csv
//
// Example CSV output:
//   reference_date,train_mean_duration,val_mean_duration,feature_count,train_rmse,val_rmse
//   2021-08-15,16.247351,16.859265,525,10.528519,11.014287
//
// The flow never branches on these values — there is no quality
// gate, only a record for the observability collaborator.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single flow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    /// The as-of date that selected the monthly files
    pub reference_date: NaiveDate,

    /// Mean duration (minutes) of the retained training rows
    pub train_mean_duration: f64,

    /// Mean duration (minutes) of the retained validation rows
    pub val_mean_duration: f64,

    /// Number of features in the fitted vectorizer vocabulary
    pub feature_count: usize,

    /// In-sample RMSE (train predictions vs. train targets)
    pub train_rmse: f64,

    /// Out-of-sample RMSE (val predictions vs. val targets)
    pub val_rmse: f64,
}

/// Logs run metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());

        // Create directory if it doesn't exist
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        // Write CSV header only if file is new
        // This allows appending across scheduled runs
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(
                f,
                "reference_date,train_mean_duration,val_mean_duration,feature_count,train_rmse,val_rmse"
            )?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one run's metrics as a new row in the CSV.
    pub fn log(&self, m: &RunMetrics) -> Result<()> {
        // Open in append mode — adds to end of file
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{},{:.6},{:.6}",
            m.reference_date,
            m.train_mean_duration,
            m.val_mean_duration,
            m.feature_count,
            m.train_rmse,
            m.val_rmse,
        )?;

        tracing::debug!(
            "Logged run {}: train_rmse={:.4}, val_rmse={:.4}",
            m.reference_date,
            m.train_rmse,
            m.val_rmse,
        );

        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("trip-metrics-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn sample_metrics() -> RunMetrics {
        RunMetrics {
            reference_date:      NaiveDate::from_ymd_opt(2021, 8, 15).unwrap(),
            train_mean_duration: 16.24,
            val_mean_duration:   16.85,
            feature_count:       525,
            train_rmse:          10.52,
            val_rmse:            11.01,
        }
    }

    #[test]
    fn test_header_written_once_and_rows_append() {
        let dir = scratch_dir("append");

        let logger = MetricsLogger::new(&dir).unwrap();
        logger.log(&sample_metrics()).unwrap();

        // A second logger on the same dir must not rewrite the header
        let logger2 = MetricsLogger::new(&dir).unwrap();
        logger2.log(&sample_metrics()).unwrap();

        let content = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("reference_date,"));
        assert!(lines[1].starts_with("2021-08-15,"));
        assert_eq!(lines[1], lines[2]);
    }
}
