// ============================================================
// Layer 5 — Trainer
// ============================================================
// Fits the vectorizer and the regression on the prepared
// training frame, in that order:
//
//   1. Turn the categorical columns into one dict per row
//   2. Fit the DictVectorizer and build the feature matrix
//   3. Fit ordinary least squares against the duration column
//   4. Report the in-sample training RMSE
//
// The returned model and vectorizer belong together — the
// vectorizer's feature ordering is what makes the model's
// coefficients meaningful, so the flow persists them as a pair.
//
// The training RMSE is deliberately in-sample (train predictions
// vs. train targets). The out-of-sample number comes from the
// evaluator, which runs on the next month's file.
//
// Reference: linfa crate documentation (linear module)

use anyhow::{anyhow, Result};
use linfa::prelude::*;
use linfa_linear::LinearRegression;
use polars::prelude::DataFrame;

use crate::data::preparer::duration_targets;
use crate::ml::metrics::rmse;
use crate::ml::model::DurationModel;
use crate::ml::vectorizer::{to_feature_rows, DictVectorizer};

/// Everything a training run produces.
pub struct TrainOutcome {
    pub model:      DurationModel,
    pub vectorizer: DictVectorizer,
    pub train_rmse: f64,
}

/// Fit the vectorizer and the linear model on a prepared frame.
pub fn train_model(df: &DataFrame, categorical: &[String]) -> Result<TrainOutcome> {
    // ── Vectorize the categorical columns ─────────────────────────────────────
    let train_rows = to_feature_rows(df, categorical)?;
    let (vectorizer, x_train) = DictVectorizer::fit_transform(&train_rows);
    let y_train = duration_targets(df)?;

    tracing::info!(
        "The shape of X_train is ({}, {})",
        x_train.nrows(),
        x_train.ncols()
    );
    tracing::info!("The DictVectorizer has {} features", vectorizer.n_features());

    // ── Fit ordinary least squares ────────────────────────────────────────────
    let dataset = Dataset::new(x_train.clone(), y_train.clone());
    let fitted  = LinearRegression::new()
        .fit(&dataset)
        .map_err(|e| anyhow!("Linear regression fit failed: {e}"))?;

    let model = DurationModel::from_fitted(&fitted);

    // ── In-sample training error ──────────────────────────────────────────────
    let y_pred     = model.predict(&x_train);
    let train_rmse = rmse(y_pred.view(), y_train.view());

    tracing::info!("The RMSE of training is: {}", train_rmse);

    Ok(TrainOutcome { model, vectorizer, train_rmse })
}
