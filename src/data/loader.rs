// ============================================================
// Layer 4 — Trip File Loader
// ============================================================
// Reads one monthly parquet trip file into a polars DataFrame.
//
// This is a direct parse with no transformation — every derived
// column and filter belongs to the FeaturePreparer, so that a
// loaded frame is always the file's raw content.
//
// A missing or malformed file is fatal to the run. There is no
// retry here; the surrounding scheduler owns retries.
//
// Reference: Rust Book §9 (Error Handling)
//            polars crate documentation (ParquetReader)

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Loads monthly trip files from disk.
pub struct ParquetLoader;

impl ParquetLoader {
    /// Create a new ParquetLoader
    pub fn new() -> Self {
        Self
    }

    /// Parse a parquet trip file into a DataFrame.
    pub fn load(&self, path: &Path) -> Result<DataFrame> {
        let file = File::open(path)
            .with_context(|| format!("Cannot open trip file '{}'", path.display()))?;

        let df = ParquetReader::new(file)
            .finish()
            .with_context(|| format!("Malformed parquet file '{}'", path.display()))?;

        tracing::info!(
            "Loaded {} rows and {} columns from '{}'",
            df.height(),
            df.width(),
            path.display()
        );

        Ok(df)
    }
}

impl Default for ParquetLoader {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = ParquetLoader::new();
        let result = loader.load(Path::new("/definitely/not/here.parquet"));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir()
            .join(format!("trip-loader-bad-{}.parquet", std::process::id()));
        fs::write(&path, b"this is not parquet").unwrap();

        let loader = ParquetLoader::new();
        assert!(loader.load(&path).is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_round_trips_a_written_frame() {
        let path = std::env::temp_dir()
            .join(format!("trip-loader-ok-{}.parquet", std::process::id()));

        let mut df = df!(
            "PUlocationID" => [Some(10i64), None, Some(42)],
            "DOlocationID" => [Some(5i64), Some(7), None],
        )
        .unwrap();

        let file = File::create(&path).unwrap();
        ParquetWriter::new(file).finish(&mut df).unwrap();

        let loaded = ParquetLoader::new().load(&path).unwrap();
        assert_eq!(loaded.height(), 3);
        assert_eq!(loaded.width(), 2);

        let _ = fs::remove_file(&path);
    }
}
