// ============================================================
// Layer 4 — Trip File Path Resolver
// ============================================================
// Maps a calendar month to the parquet file holding that
// month's trip records.
//
// File naming convention (set by the upstream data publisher):
//   <data_dir>/fhv_tripdata_<YYYY-MM>.parquet
//
// The resolver enumerates the data directory and asserts that
// EXACTLY one file matches the month's pattern. Zero matches and
// multiple matches are distinct, named error conditions — a run
// must never silently pick the "first" of several candidates,
// and a missing month must be reported as such rather than as
// an index panic.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::period::MonthPeriod;

/// Why a month's trip file could not be resolved.
/// Both variants are fatal to the run.
#[derive(Debug, Error)]
pub enum PathResolveError {
    /// No file in the data directory matches the month's pattern
    #[error("no matching data file for month {period} in '{dir}'")]
    NotFound { period: MonthPeriod, dir: String },

    /// More than one file matches — the convention allows only one
    #[error("{} candidate files for month {period} in '{dir}': {candidates:?}", candidates.len())]
    Ambiguous {
        period:     MonthPeriod,
        dir:        String,
        candidates: Vec<String>,
    },

    /// The data directory itself could not be read
    #[error("cannot read data directory '{dir}': {source}")]
    DirUnreadable {
        dir: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves monthly trip files under a fixed data directory.
pub struct TripPathResolver {
    /// Directory holding the fhv_tripdata_*.parquet files
    data_dir: PathBuf,
}

impl TripPathResolver {
    /// Create a resolver rooted at the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Resolve the single trip file for a month.
    ///
    /// A file matches when its name starts with
    /// `fhv_tripdata_<YYYY-MM>` and ends with `.parquet`.
    pub fn resolve(&self, period: MonthPeriod) -> Result<PathBuf, PathResolveError> {
        let dir    = self.data_dir.display().to_string();
        let prefix = format!("fhv_tripdata_{}", period);

        let entries = fs::read_dir(&self.data_dir)
            .map_err(|source| PathResolveError::DirUnreadable { dir: dir.clone(), source })?;

        // Collect every candidate so an ambiguous directory can be
        // reported with the full list, not just the first hit
        let mut candidates: Vec<PathBuf> = Vec::new();

        for entry in entries {
            let entry = entry
                .map_err(|source| PathResolveError::DirUnreadable { dir: dir.clone(), source })?;
            let path = entry.path();

            if matches_convention(&path, &prefix) {
                candidates.push(path);
            }
        }

        // Sort for a deterministic error message
        candidates.sort();

        match candidates.len() {
            0 => Err(PathResolveError::NotFound { period, dir }),
            1 => Ok(candidates.remove(0)),
            _ => Err(PathResolveError::Ambiguous {
                period,
                dir,
                candidates: candidates
                    .iter()
                    .map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default())
                    .collect(),
            }),
        }
    }
}

/// True when the file name follows `fhv_tripdata_<YYYY-MM>*.parquet`
fn matches_convention(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.starts_with(prefix) && name.ends_with(".parquet"))
        .unwrap_or(false)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// A fresh empty directory under the system temp dir, unique per test
    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("trip-paths-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn june() -> MonthPeriod {
        MonthPeriod { year: 2021, month: 6 }
    }

    #[test]
    fn test_resolves_single_match() {
        let dir = scratch_dir("single");
        fs::write(dir.join("fhv_tripdata_2021-06.parquet"), b"").unwrap();
        // A neighbouring month must not interfere
        fs::write(dir.join("fhv_tripdata_2021-07.parquet"), b"").unwrap();

        let resolver = TripPathResolver::new(&dir);
        let path     = resolver.resolve(june()).unwrap();
        assert!(path.ends_with("fhv_tripdata_2021-06.parquet"));
    }

    #[test]
    fn test_zero_matches_is_not_found() {
        let dir      = scratch_dir("empty");
        let resolver = TripPathResolver::new(&dir);

        match resolver.resolve(june()) {
            Err(PathResolveError::NotFound { period, .. }) => {
                assert_eq!(period.to_string(), "2021-06");
            }
            other => panic!("expected NotFound, got {:?}", other.map(|p| p.display().to_string())),
        }
    }

    #[test]
    fn test_multiple_matches_is_ambiguous() {
        let dir = scratch_dir("ambiguous");
        fs::write(dir.join("fhv_tripdata_2021-06.parquet"), b"").unwrap();
        fs::write(dir.join("fhv_tripdata_2021-06_copy.parquet"), b"").unwrap();

        let resolver = TripPathResolver::new(&dir);
        match resolver.resolve(june()) {
            Err(PathResolveError::Ambiguous { candidates, .. }) => {
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected Ambiguous, got {:?}", other.map(|p| p.display().to_string())),
        }
    }

    #[test]
    fn test_non_parquet_files_ignored() {
        let dir = scratch_dir("extension");
        fs::write(dir.join("fhv_tripdata_2021-06.csv"), b"").unwrap();

        let resolver = TripPathResolver::new(&dir);
        assert!(matches!(
            resolver.resolve(june()),
            Err(PathResolveError::NotFound { .. })
        ));
    }
}
