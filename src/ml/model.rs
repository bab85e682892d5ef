// ============================================================
// Layer 5 — Duration Model
// ============================================================
// The fitted ordinary-least-squares regression, reduced to the
// two things prediction needs: a coefficient per feature column
// and an intercept.
//
// The solver (linfa) lives only in the trainer; once fitting is
// done the parameters are copied into this plain struct, so the
// serialized artifact carries no solver types and loading it
// back needs nothing but serde. The vectorizer's feature order
// is what gives the coefficients their meaning — model and
// vectorizer must always be saved and loaded as a pair.
//
// Reference: Rust Book §5 (Structs)
//            linfa crate documentation (linear module)

use std::path::Path;

use anyhow::{Context, Result};
use linfa_linear::FittedLinearRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::domain::traits::Persistable;

/// A fitted linear trip-duration model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationModel {
    /// One weight per vectorizer feature column
    coefficients: Array1<f64>,

    /// The bias term
    intercept: f64,
}

impl DurationModel {
    /// Capture the parameters of a freshly fitted solver result
    pub fn from_fitted(fitted: &FittedLinearRegression<f64>) -> Self {
        Self {
            coefficients: fitted.params().to_owned(),
            intercept:    fitted.intercept(),
        }
    }

    /// Build a model from raw parameters (used in tests)
    pub fn from_parameters(coefficients: Array1<f64>, intercept: f64) -> Self {
        Self { coefficients, intercept }
    }

    /// Predicted duration (minutes) for each row of the feature matrix:
    /// y = X·w + b
    pub fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        x.dot(&self.coefficients) + self.intercept
    }

    /// Number of feature columns this model was fitted on
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }
}

/// Save and restore the fitted parameters with bincode
impl Persistable for DurationModel {
    fn save(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serialize(self)
            .context("Cannot serialize model")?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Cannot write model to '{}'", path.display()))?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Cannot read model from '{}'", path.display()))?;
        bincode::deserialize(&bytes)
            .with_context(|| format!("Corrupt model file '{}'", path.display()))
    }
}
