// ============================================================
// Layer 2 — TrainFlow
// ============================================================
// Orchestrates the full flow in order:
//
//   Step 1: Derive training/validation months  (Layer 3 - domain)
//   Step 2: Resolve both monthly file paths    (Layer 4 - data)
//   Step 3: Load + prepare the training month  (Layer 4 - data)
//   Step 4: Load + prepare the validation month(Layer 4 - data)
//   Step 5: Fit vectorizer and model           (Layer 5 - ml)
//   Step 6: Validate through fitted artifacts  (Layer 5 - ml)
//   Step 7: Persist model and vectorizer       (Layer 6 - infra)
//   Step 8: Append the run metrics row         (Layer 6 - infra)
//
// The chain is strictly sequential — every step consumes the
// previous step's output, and the first failure aborts the run.
// No partial artifacts are valid: the store is only written
// after training AND validation both succeeded.
//
// Reference: Rust Book §13 (Iterators and Closures)

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::ParquetLoader,
    paths::TripPathResolver,
    preparer::FeaturePreparer,
};
use crate::domain::period::{training_period, validation_period};
use crate::infra::{
    artifacts::ArtifactStore,
    metrics::{MetricsLogger, RunMetrics},
};
use crate::ml::{evaluator::evaluate_model, trainer::train_model};

// ─── Flow Configuration ──────────────────────────────────────────────────────
// Everything a run needs to know, assembled by the CLI layer.
// The reference date is required — defaulting happens at the
// caller, never in here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    pub reference_date: NaiveDate,
    pub data_dir:       PathBuf,
    pub models_dir:     PathBuf,
    pub categorical:    Vec<String>,
}

impl FlowConfig {
    /// The two zone columns the model is trained on
    pub fn default_categorical() -> Vec<String> {
        vec!["PUlocationID".to_string(), "DOlocationID".to_string()]
    }
}

// ─── TrainFlow ────────────────────────────────────────────────────────────────
// Owns the config and runs the full flow.
pub struct TrainFlow {
    config: FlowConfig,
}

impl TrainFlow {
    /// Create a new TrainFlow with the given configuration
    pub fn new(config: FlowConfig) -> Self {
        Self { config }
    }

    /// Execute the full flow end to end and return the run metrics.
    pub fn execute(&self) -> Result<RunMetrics> {
        let cfg = &self.config;

        // ── Step 1: derive the two months from the reference date ─────────────
        let train_period = training_period(cfg.reference_date)?;
        let val_period   = validation_period(cfg.reference_date)?;
        tracing::info!(
            "Reference {} → training month {}, validation month {}",
            cfg.reference_date, train_period, val_period
        );

        // ── Step 2: resolve both monthly files up front ───────────────────────
        // Resolving eagerly means a missing validation file aborts
        // the run before any training work is spent
        let resolver   = TripPathResolver::new(&cfg.data_dir);
        let train_path = resolver.resolve(train_period)?;
        let val_path   = resolver.resolve(val_period)?;

        // ── Step 3: load + prepare the training month ─────────────────────────
        let loader   = ParquetLoader::new();
        let preparer = FeaturePreparer::new(cfg.categorical.clone());

        let df_train   = loader.load(&train_path)?;
        let train_prep = preparer.prepare(df_train, "training")?;

        // ── Step 4: load + prepare the validation month ───────────────────────
        let df_val   = loader.load(&val_path)?;
        let val_prep = preparer.prepare(df_val, "validation")?;

        // ── Step 5: fit vectorizer and model on the training month ────────────
        let outcome = train_model(&train_prep.frame, &cfg.categorical)?;

        // ── Step 6: validate through the fitted artifacts (no refit) ──────────
        let val_rmse = evaluate_model(
            &val_prep.frame,
            &cfg.categorical,
            &outcome.vectorizer,
            &outcome.model,
        )?;

        // ── Step 7: persist both artifacts, named by the reference date ───────
        let store = ArtifactStore::new(&cfg.models_dir);
        store.save(&outcome.model, &outcome.vectorizer, cfg.reference_date)?;

        // ── Step 8: append the run's metrics row ──────────────────────────────
        let metrics = RunMetrics {
            reference_date:      cfg.reference_date,
            train_mean_duration: train_prep.mean_duration,
            val_mean_duration:   val_prep.mean_duration,
            feature_count:       outcome.vectorizer.n_features(),
            train_rmse:          outcome.train_rmse,
            val_rmse,
        };
        MetricsLogger::new(&cfg.models_dir)?.log(&metrics)?;

        tracing::info!("Flow complete for {}", cfg.reference_date);
        Ok(metrics)
    }
}
