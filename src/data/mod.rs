// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the reference date
// all the way to a prepared, model-ready DataFrame.
//
// The pipeline flows in this order:
//
//   reference date
//       │
//       ▼
//   TripPathResolver  → picks the monthly parquet file
//       │
//       ▼
//   ParquetLoader     → parses the file into a DataFrame
//       │
//       ▼
//   FeaturePreparer   → derives duration, filters outliers,
//                       normalises the zone columns
//       │
//       ▼
//   ml layer          → vectorizes and fits the model
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            polars crate documentation

/// Resolves monthly trip-file paths from a reference period
pub mod paths;

/// Reads a parquet trip file into a DataFrame
pub mod loader;

/// Derives the duration target and normalises categorical columns
pub mod preparer;
