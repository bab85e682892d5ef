// ============================================================
// Layer 5 — Dict Vectorizer
// ============================================================
// Maps rows of {column → string code} into a fixed-width
// one-hot numeric feature space.
//
// How the encoding works:
//   Every distinct (column, value) pair seen during fit becomes
//   one feature named "column=value". A row's matrix entry for
//   that feature is 1.0 when the row carries exactly that value,
//   otherwise 0.0. With two zone columns, each row has exactly
//   two non-zero entries — the matrix is almost all zeros.
//
// Two invariants matter downstream:
//   1. Feature names are sorted, so the column order is stable
//      and the model's coefficients can be interpreted by name.
//   2. transform() borrows an already-fitted vocabulary and can
//      never extend it — validation data MUST pass through the
//      training vocabulary unchanged. Values never seen during
//      fit simply contribute nothing to their row.
//
// Reference: Rust Book §8 (Collections: BTreeMap)
//            Rust Book §10 (Traits)

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::traits::Persistable;

/// One vectorizer input row: categorical column name → string code.
/// BTreeMap keeps the per-row iteration order deterministic.
pub type FeatureRow = BTreeMap<String, String>;

/// A fitted mapping from categorical rows to one-hot features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictVectorizer {
    /// "column=value" → column index in the feature matrix
    vocabulary: BTreeMap<String, usize>,

    /// Feature names in column order (sorted)
    feature_names: Vec<String>,
}

impl DictVectorizer {
    /// Fit a vocabulary over all (column, value) pairs in the rows.
    pub fn fit(rows: &[FeatureRow]) -> Self {
        // Collect distinct feature names first; BTreeSet sorts them
        let names: BTreeSet<String> = rows
            .iter()
            .flat_map(|row| row.iter().map(|(col, val)| feature_name(col, val)))
            .collect();

        let feature_names: Vec<String> = names.into_iter().collect();
        let vocabulary = feature_names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        Self { vocabulary, feature_names }
    }

    /// Encode rows against the fitted vocabulary.
    ///
    /// Takes &self: the vocabulary cannot grow here, so unseen
    /// values are silently ignored (their row stays 0.0 in every
    /// feature column they would have introduced).
    pub fn transform(&self, rows: &[FeatureRow]) -> Array2<f64> {
        let mut matrix = Array2::<f64>::zeros((rows.len(), self.feature_names.len()));

        for (i, row) in rows.iter().enumerate() {
            for (col, val) in row {
                if let Some(&j) = self.vocabulary.get(&feature_name(col, val)) {
                    matrix[[i, j]] = 1.0;
                }
            }
        }

        matrix
    }

    /// Fit on the rows, then transform the same rows
    pub fn fit_transform(rows: &[FeatureRow]) -> (Self, Array2<f64>) {
        let fitted = Self::fit(rows);
        let matrix = fitted.transform(rows);
        (fitted, matrix)
    }

    /// Feature names in matrix column order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Width of the feature matrix this vectorizer produces
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// The fitted vocabulary (used to verify it survives evaluation)
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }
}

/// "column=value" — the feature naming convention
fn feature_name(col: &str, val: &str) -> String {
    format!("{}={}", col, val)
}

/// Extract vectorizer input rows from a prepared frame.
/// The equivalent of turning the categorical columns into one
/// dictionary per row.
pub fn to_feature_rows(df: &DataFrame, categorical: &[String]) -> Result<Vec<FeatureRow>> {
    let mut rows = vec![FeatureRow::new(); df.height()];

    for name in categorical {
        let codes = df
            .column(name)
            .with_context(|| format!("Missing categorical column '{}'", name))?
            .str()
            .with_context(|| format!("Column '{}' is not a string code column", name))?;

        for (i, value) in codes.into_iter().enumerate() {
            // Prepared frames have no nulls here; "-1" is the
            // sentinel the preparer assigns to missing zones
            rows[i].insert(name.clone(), value.unwrap_or("-1").to_string());
        }
    }

    Ok(rows)
}

/// Save and restore the fitted vocabulary with bincode
impl Persistable for DictVectorizer {
    fn save(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serialize(self)
            .context("Cannot serialize vectorizer")?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Cannot write vectorizer to '{}'", path.display()))?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Cannot read vectorizer from '{}'", path.display()))?;
        bincode::deserialize(&bytes)
            .with_context(|| format!("Corrupt vectorizer file '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> FeatureRow {
        pairs
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_feature_names_are_sorted() {
        let rows = vec![
            row(&[("PU", "9"), ("DO", "5")]),
            row(&[("PU", "10"), ("DO", "5")]),
        ];
        let dv = DictVectorizer::fit(&rows);
        assert_eq!(dv.feature_names(), &["DO=5", "PU=10", "PU=9"]);
        assert_eq!(dv.n_features(), 3);
    }

    #[test]
    fn test_transform_sets_one_hot_entries() {
        let rows = vec![
            row(&[("PU", "1"), ("DO", "2")]),
            row(&[("PU", "3"), ("DO", "2")]),
        ];
        let (dv, x) = DictVectorizer::fit_transform(&rows);

        // names sorted: DO=2, PU=1, PU=3
        assert_eq!(x.shape(), &[2, 3]);
        assert_eq!(x[[0, 0]], 1.0); // DO=2
        assert_eq!(x[[0, 1]], 1.0); // PU=1
        assert_eq!(x[[0, 2]], 0.0);
        assert_eq!(x[[1, 0]], 1.0); // DO=2
        assert_eq!(x[[1, 1]], 0.0);
        assert_eq!(x[[1, 2]], 1.0); // PU=3

        // Every row carries exactly one 1.0 per categorical column
        assert_eq!(x.sum(), 4.0);
        assert_eq!(dv.n_features(), 3);
    }

    #[test]
    fn test_unseen_values_are_ignored() {
        let train = vec![row(&[("PU", "1")])];
        let dv    = DictVectorizer::fit(&train);

        let val = vec![row(&[("PU", "99")])];
        let x   = dv.transform(&val);

        // Same width as training, and the unseen value maps to nothing
        assert_eq!(x.shape(), &[1, 1]);
        assert_eq!(x.sum(), 0.0);
    }

    #[test]
    fn test_transform_does_not_change_the_vocabulary() {
        let train = vec![row(&[("PU", "1"), ("DO", "2")])];
        let dv    = DictVectorizer::fit(&train);

        let before = dv.vocabulary().clone();
        let _      = dv.transform(&[row(&[("PU", "7"), ("DO", "8")])]);

        assert_eq!(dv.vocabulary(), &before);
    }

    #[test]
    fn test_feature_rows_from_prepared_frame() {
        let df = df!(
            "PUlocationID" => ["42", "-1"],
            "DOlocationID" => ["7", "7"],
        )
        .unwrap();

        let cols = vec!["PUlocationID".to_string(), "DOlocationID".to_string()];
        let rows = to_feature_rows(&df, &cols).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["PUlocationID"], "42");
        assert_eq!(rows[1]["PUlocationID"], "-1");
        assert_eq!(rows[1]["DOlocationID"], "7");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let rows = vec![row(&[("PU", "1"), ("DO", "2")])];
        let dv   = DictVectorizer::fit(&rows);

        let path = std::env::temp_dir()
            .join(format!("dv-roundtrip-{}.bin", std::process::id()));
        dv.save(&path).unwrap();
        let restored = DictVectorizer::load(&path).unwrap();

        assert_eq!(dv, restored);
        let _ = std::fs::remove_file(&path);
    }
}
