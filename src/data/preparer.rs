// ============================================================
// Layer 4 — Feature Preparer
// ============================================================
// Turns a raw trip frame into a model-ready one.
//
// Steps (applied in order):
//   1. Derive `duration` in minutes from the pickup and dropoff
//      timestamps (dropOff_datetime - pickup_datetime)
//   2. Retain only trips with 1 <= duration <= 60 minutes.
//      This is a hard filter — out-of-range rows are dropped,
//      not flagged. Rows with a missing timestamp have no
//      duration and are dropped by the same filter.
//   3. Normalise the categorical zone columns: missing values
//      become -1, then every value is cast to integer and then
//      to string, so the vectorizer sees uniform string codes
//      ("42", "-1", ...) with no nulls left behind.
//
// The same preparation runs for the training and the validation
// frame; the `label` argument only tags the mean-duration log
// line, it never changes behaviour.
//
// Reference: Rust Book §13 (Iterators)
//            polars crate documentation

use anyhow::{bail, Context, Result};
use ndarray::Array1;
use polars::prelude::*;

/// Trip pickup timestamp column, as named by the data publisher
pub const PICKUP_COL: &str = "pickup_datetime";

/// Trip dropoff timestamp column (capital O, as in the raw files)
pub const DROPOFF_COL: &str = "dropOff_datetime";

/// The derived target column added by the preparer
pub const DURATION_COL: &str = "duration";

/// Trips shorter than this many minutes are dropped
const MIN_DURATION_MIN: f64 = 1.0;

/// Trips longer than this many minutes are dropped
const MAX_DURATION_MIN: f64 = 60.0;

/// A prepared frame plus the mean duration of the retained rows.
/// The mean is returned (not just logged) so the flow can record
/// it in the run metrics.
pub struct PreparedFrame {
    pub frame:         DataFrame,
    pub mean_duration: f64,
}

/// Prepares raw trip frames for vectorization.
pub struct FeaturePreparer {
    /// Categorical columns to normalise into string codes
    categorical: Vec<String>,
}

impl FeaturePreparer {
    /// Create a preparer for the given categorical columns
    pub fn new(categorical: Vec<String>) -> Self {
        Self { categorical }
    }

    /// Run all preparation steps on a raw frame.
    /// `label` tags the log output ("training" / "validation").
    pub fn prepare(&self, df: DataFrame, label: &str) -> Result<PreparedFrame> {
        // ── Step 1: derive duration in minutes ────────────────────────────────
        let durations = trip_durations_minutes(&df)?;

        let mut df = df;
        df.with_column(Series::new(DURATION_COL, durations.clone()))
            .context("Cannot attach duration column")?;

        // ── Step 2: hard filter to the valid duration range ───────────────────
        // A None duration (missing timestamp) never passes the range test
        let keep: Vec<bool> = durations
            .iter()
            .map(|d| matches!(d, Some(m) if (MIN_DURATION_MIN..=MAX_DURATION_MIN).contains(m)))
            .collect();

        let mask = Series::new("keep", keep);
        let df   = df
            .filter(mask.bool().context("Boolean mask")?)
            .context("Cannot filter on duration")?;

        if df.height() == 0 {
            bail!(
                "No {} trips with duration in [{}, {}] minutes — nothing to fit",
                label, MIN_DURATION_MIN, MAX_DURATION_MIN
            );
        }

        let mean_duration = df
            .column(DURATION_COL)?
            .mean()
            .context("Mean duration of an empty column")?;

        tracing::info!("The mean duration of {} is {}", label, mean_duration);

        // ── Step 3: normalise categorical columns to string codes ─────────────
        let mut df = df;
        for name in &self.categorical {
            let coded = zone_codes(&df, name)?;
            df.with_column(coded)
                .with_context(|| format!("Cannot replace categorical column '{}'", name))?;
        }

        Ok(PreparedFrame { frame: df, mean_duration })
    }
}

/// Per-trip duration in minutes; None when either timestamp is missing.
///
/// Both timestamp columns are cast to microsecond resolution first,
/// so files that store milliseconds or nanoseconds all subtract in
/// the same unit.
fn trip_durations_minutes(df: &DataFrame) -> Result<Vec<Option<f64>>> {
    let pickup  = timestamp_micros(df, PICKUP_COL)?;
    let dropoff = timestamp_micros(df, DROPOFF_COL)?;

    let durations = pickup
        .into_iter()
        .zip(dropoff)
        .map(|(pu, doff)| match (pu, doff) {
            (Some(pu), Some(doff)) => Some((doff - pu) as f64 / 60_000_000.0),
            _ => None,
        })
        .collect();

    Ok(durations)
}

/// A timestamp column as microseconds since the epoch.
fn timestamp_micros(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let micros = df
        .column(name)
        .with_context(|| format!("Missing timestamp column '{}'", name))?
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))
        .with_context(|| format!("Column '{}' is not a timestamp", name))?
        .cast(&DataType::Int64)?;

    Ok(micros.i64()?.into_iter().collect())
}

/// One categorical column as string codes: null → -1, then int → string.
fn zone_codes(df: &DataFrame, name: &str) -> Result<Series> {
    let ints = df
        .column(name)
        .with_context(|| format!("Missing categorical column '{}'", name))?
        .cast(&DataType::Int64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;

    let codes: Vec<String> = ints
        .i64()?
        .into_iter()
        .map(|v| v.unwrap_or(-1).to_string())
        .collect();

    Ok(Series::new(name, codes))
}

/// The duration column of a prepared frame as regression targets.
pub fn duration_targets(df: &DataFrame) -> Result<Array1<f64>> {
    let values: Vec<f64> = df
        .column(DURATION_COL)
        .context("Frame has no duration column — was it prepared?")?
        .f64()?
        .into_iter()
        .flatten()
        .collect();

    Ok(Array1::from(values))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Build a raw trip frame with the given durations (minutes) and
    /// zone ids. Timestamps are stored as millisecond datetimes, like
    /// the real files.
    pub fn trips_frame(
        durations_min: &[f64],
        pu: Vec<Option<i64>>,
        doff: Vec<Option<i64>>,
    ) -> DataFrame {
        let base_ms = 1_622_548_800_000i64; // 2021-06-01 12:00:00
        let pickup_ms: Vec<i64> = durations_min.iter().map(|_| base_ms).collect();
        let dropoff_ms: Vec<i64> = durations_min
            .iter()
            .map(|d| base_ms + (d * 60_000.0) as i64)
            .collect();

        let mut df = df!(
            PICKUP_COL   => pickup_ms,
            DROPOFF_COL  => dropoff_ms,
            "PUlocationID" => pu,
            "DOlocationID" => doff,
        )
        .unwrap();

        for name in [PICKUP_COL, DROPOFF_COL] {
            let as_datetime = df
                .column(name)
                .unwrap()
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
                .unwrap();
            df.with_column(as_datetime).unwrap();
        }

        df
    }

    fn preparer() -> FeaturePreparer {
        FeaturePreparer::new(vec!["PUlocationID".to_string(), "DOlocationID".to_string()])
    }

    #[test]
    fn test_duration_filter_keeps_exactly_the_boundaries() {
        // 0.5 and 61 fall outside [1, 60]; 1 and 60 sit on the boundary
        let df = trips_frame(
            &[0.5, 1.0, 60.0, 61.0],
            vec![Some(1), Some(2), Some(3), Some(4)],
            vec![Some(1), Some(2), Some(3), Some(4)],
        );

        let prepared = preparer().prepare(df, "training").unwrap();
        let targets  = duration_targets(&prepared.frame).unwrap();

        assert_eq!(prepared.frame.height(), 2);
        assert!((targets[0] - 1.0).abs() < 1e-9);
        assert!((targets[1] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_zones_become_minus_one() {
        let df = trips_frame(
            &[10.0, 20.0],
            vec![Some(42), None],
            vec![None, Some(7)],
        );

        let prepared = preparer().prepare(df, "training").unwrap();
        let pu = prepared.frame.column("PUlocationID").unwrap();
        let doff = prepared.frame.column("DOlocationID").unwrap();

        // No nulls survive preparation
        assert_eq!(pu.null_count(), 0);
        assert_eq!(doff.null_count(), 0);

        let pu_codes: Vec<String> = pu
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap().to_string())
            .collect();
        assert_eq!(pu_codes, vec!["42", "-1"]);
    }

    #[test]
    fn test_mean_duration_of_retained_rows() {
        // 100.0 is filtered out; mean of the rest is (10 + 20) / 2
        let df = trips_frame(
            &[10.0, 20.0, 100.0],
            vec![Some(1), Some(2), Some(3)],
            vec![Some(1), Some(2), Some(3)],
        );

        let prepared = preparer().prepare(df, "validation").unwrap();
        assert!((prepared.mean_duration - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_timestamp_rows_are_dropped() {
        let mut df = trips_frame(
            &[10.0, 20.0],
            vec![Some(1), Some(2)],
            vec![Some(1), Some(2)],
        );
        // Null out the second pickup timestamp
        let pickup = df.column(PICKUP_COL).unwrap();
        let nulled = Series::new(
            PICKUP_COL,
            vec![pickup.cast(&DataType::Int64).unwrap().i64().unwrap().get(0), None],
        )
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
        df.with_column(nulled).unwrap();

        let prepared = preparer().prepare(df, "training").unwrap();
        assert_eq!(prepared.frame.height(), 1);
    }

    #[test]
    fn test_all_rows_filtered_is_an_error() {
        let df = trips_frame(&[90.0, 120.0], vec![Some(1), Some(2)], vec![Some(1), Some(2)]);
        assert!(preparer().prepare(df, "training").is_err());
    }
}
