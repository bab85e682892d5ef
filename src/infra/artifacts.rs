// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores the two artifacts of a flow run.
//
// What gets saved per run:
//   1. model-<date>.bin — the fitted regression parameters
//   2. dv-<date>.bin    — the fitted vectorizer vocabulary
//
// Why save the vectorizer separately?
//   The model's coefficients are positional. Without the
//   vectorizer that produced the feature ordering, the model
//   cannot be applied to new data. The two files always travel
//   as a pair named by the same reference date.
//
// File naming convention:
//   models/
//     model-2021-08-15.bin   ← regression parameters
//     dv-2021-08-15.bin      ← vectorizer vocabulary
//
// There is no versioning beyond the literal date string —
// re-running the same date overwrites both files silently.
// Serialization failures (disk full, permissions) propagate
// unchanged and abort the run.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::domain::traits::Persistable;
use crate::ml::model::DurationModel;
use crate::ml::vectorizer::DictVectorizer;

/// Manages saving and loading of run artifacts.
/// All files are stored in the configured directory.
pub struct ArtifactStore {
    /// Path to the directory where artifacts are stored
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a new ArtifactStore.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        // create_dir_all creates parent directories too, like `mkdir -p`
        // .ok() ignores the error if the directory already exists
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save both artifacts of a run, named by its reference date.
    pub fn save(
        &self,
        model:          &DurationModel,
        vectorizer:     &DictVectorizer,
        reference_date: NaiveDate,
    ) -> Result<()> {
        let model_path = self.model_path(reference_date);
        model
            .save(&model_path)
            .with_context(|| format!("Failed to save model to '{}'", model_path.display()))?;

        let dv_path = self.vectorizer_path(reference_date);
        vectorizer
            .save(&dv_path)
            .with_context(|| format!("Failed to save vectorizer to '{}'", dv_path.display()))?;

        tracing::info!(
            "Saved artifacts: '{}', '{}'",
            model_path.display(),
            dv_path.display()
        );
        tracing::info!("Artifact directory now holds: {:?}", self.list()?);

        Ok(())
    }

    /// Load the model saved for a reference date.
    pub fn load_model(&self, reference_date: NaiveDate) -> Result<DurationModel> {
        DurationModel::load(&self.model_path(reference_date))
    }

    /// Load the vectorizer saved for a reference date.
    pub fn load_vectorizer(&self, reference_date: NaiveDate) -> Result<DictVectorizer> {
        DictVectorizer::load(&self.vectorizer_path(reference_date))
    }

    /// Every file currently in the artifact directory, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read artifact directory '{}'", self.dir.display()))?
        {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        names.sort();
        Ok(names)
    }

    fn model_path(&self, reference_date: NaiveDate) -> PathBuf {
        self.dir.join(format!("model-{}.bin", reference_date))
    }

    fn vectorizer_path(&self, reference_date: NaiveDate) -> PathBuf {
        self.dir.join(format!("dv-{}.bin", reference_date))
    }
}
