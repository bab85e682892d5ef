// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Applies the fitted vectorizer and model to the prepared
// validation frame and reports the out-of-sample RMSE.
//
// The vectorizer arrives by shared reference and is only
// transformed with, never refitted — validation rows must pass
// through the TRAINING vocabulary. Zone values that never
// occurred in the training month contribute nothing to their
// row, exactly as a fitted one-hot encoding behaves.
//
// The flow does not branch on the returned value: there is no
// quality gate, the metric exists for the log and the metrics
// file.

use anyhow::Result;
use polars::prelude::DataFrame;

use crate::data::preparer::duration_targets;
use crate::ml::metrics::rmse;
use crate::ml::model::DurationModel;
use crate::ml::vectorizer::{to_feature_rows, DictVectorizer};

/// Compute the validation RMSE of a fitted model.
pub fn evaluate_model(
    df:          &DataFrame,
    categorical: &[String],
    vectorizer:  &DictVectorizer,
    model:       &DurationModel,
) -> Result<f64> {
    let val_rows = to_feature_rows(df, categorical)?;

    // transform() on the already-fitted vectorizer — no refit
    let x_val = vectorizer.transform(&val_rows);
    let y_val = duration_targets(df)?;

    let y_pred   = model.predict(&x_val);
    let val_rmse = rmse(y_pred.view(), y_val.view());

    tracing::info!("The RMSE of validation is: {}", val_rmse);

    Ok(val_rmse)
}
