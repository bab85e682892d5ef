// ============================================================
// Layer 5 — ML / Model Layer (linfa)
// ============================================================
// This layer contains all vectorization and regression code.
// No other layer imports from linfa directly — only this one.
//
// Why isolate the ML code here?
//   - If the solver API changes, we only update this layer
//   - Other layers are testable without fitting anything
//   - The feature encoding is clearly separated from data
//     loading and application logic
//
// What's in this layer:
//
//   vectorizer.rs — Dict-style one-hot vectorizer
//                   Fits a vocabulary of column=value features on
//                   training rows and transforms rows into a
//                   fixed-width numeric matrix
//
//   model.rs      — The fitted linear model
//                   Plain coefficients + intercept, extracted
//                   from the solver so artifacts stay small and
//                   solver-free
//
//   trainer.rs    — Fits vectorizer and model on the training
//                   frame and reports the in-sample RMSE
//
//   evaluator.rs  — Applies the fitted vectorizer and model to
//                   the validation frame and reports RMSE
//
//   metrics.rs    — The RMSE formula shared by both
//
// Reference: linfa crate documentation (linear module)
//            Rust Book §7 (Modules)

/// Dict-style one-hot feature vectorizer
pub mod vectorizer;

/// Fitted ordinary-least-squares duration model
pub mod model;

/// Fits the vectorizer and model on training data
pub mod trainer;

/// Applies fitted artifacts to validation data
pub mod evaluator;

/// Root-mean-squared error
pub mod metrics;
