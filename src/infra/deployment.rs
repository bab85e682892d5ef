// ============================================================
// Layer 6 — Deployment Spec
// ============================================================
// The declarative registration of the flow with the external
// scheduler: run the whole train + validate flow monthly, on
// the 15th at 09:00, in a fixed timezone.
//
// This is configuration, not logic. The crate does not run a
// scheduler; it emits a JSON document that the process-level
// deployment mechanism consumes. The cron expression reads:
//
//   0 9 15 * *
//   │ │  │ │ └── any weekday
//   │ │  │ └──── any month
//   │ │  └────── on the 15th
//   │ └───────── at hour 9
//   └─────────── at minute 0
//
// The 15th is late enough in the month that the previous
// month's trip file has been published by the data provider.
//
// Reference: Rust Book §5 (Structs)
//            serde_json crate documentation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// When the scheduler should trigger the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronSchedule {
    /// Standard five-field cron expression
    pub cron: String,

    /// IANA timezone the expression is evaluated in
    pub timezone: String,
}

/// A named, schedulable registration of the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSpec {
    /// Deployment name, as shown by the scheduler
    pub name: String,

    /// The command the scheduler re-invokes on each trigger
    pub command: String,

    /// The trigger schedule
    pub schedule: CronSchedule,
}

impl DeploymentSpec {
    /// The monthly training deployment: 15th of every month,
    /// 09:00 America/New_York.
    pub fn monthly_training() -> Self {
        Self {
            name:    "cron-schedule-deployment".to_string(),
            command: "trip-duration-flow run".to_string(),
            schedule: CronSchedule {
                cron:     "0 9 15 * *".to_string(),
                timezone: "America/New_York".to_string(),
            },
        }
    }

    /// Write the spec as pretty JSON.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        fs::write(path, json)
            .with_context(|| format!("Cannot write deployment spec to '{}'", path.display()))?;

        tracing::info!("Wrote deployment spec to '{}'", path.display());
        Ok(())
    }
}
