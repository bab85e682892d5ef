// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   artifacts.rs  — Saving and loading the run's artifacts
//                   (model-<date>.bin and dv-<date>.bin) via
//                   the Persistable trait. Re-running a date
//                   overwrites silently.
//
//   metrics.rs    — Run-metrics logging
//                   Appends one CSV row per flow run (mean
//                   durations, feature count, both RMSEs) for
//                   later analysis and plotting.
//
//   deployment.rs — The declarative cron deployment spec
//                   (monthly on the 15th at 09:00, fixed
//                   timezone), written as JSON. Configuration,
//                   not logic — the external scheduler owns
//                   the trigger.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap file artifacts for S3 cloud storage)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Artifact (model + vectorizer) saving and loading
pub mod artifacts;

/// Per-run metrics CSV logger
pub mod metrics;

/// Cron deployment spec for the external scheduler
pub mod deployment;
