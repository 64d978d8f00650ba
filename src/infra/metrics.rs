// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one CSV row per training epoch:
//
//   epoch,train_loss,accuracy,batches,skipped_batches
//   1,2.197012,0.150000,4,0
//   2,2.011873,0.250000,4,0
//   ...
//
//   train_loss      — mean masked cross-entropy over the epoch
//   accuracy        — fraction of the evaluation set classified
//                     correctly after the epoch
//   skipped_batches — batches in which no sentence had a known
//                     word (nothing to train on)
//
// Output file: <metrics_dir>/metrics.csv

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:           usize,
    pub train_loss:      f64,
    pub accuracy:        f64,
    pub batches:         usize,
    pub skipped_batches: usize,
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the directory and write the CSV header if the file is new.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,accuracy,batches,skipped_batches")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            f,
            "{},{:.6},{:.6},{},{}",
            m.epoch, m.train_loss, m.accuracy, m.batches, m.skipped_batches,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
