//! Summary of a completed run

use crate::analysis::Stability;
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// What happened during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub rows: usize,
    pub columns: usize,
    /// Generations computed by this run
    pub generations_run: u64,
    /// Generation counter of the game when the run ended
    pub final_generation: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub peak_population: usize,
    /// Behavior recognised during the run, if any
    pub stability: Option<Stability>,
    /// Generation at which `stability` was recognised
    pub stable_at: Option<u64>,
    pub elapsed_ms: u64,
}

impl RunReport {
    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => self.to_json().context("Failed to serialize run report"),
        }
    }

    /// Save to file in the requested format
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, self.render(format)?)
            .with_context(|| format!("Failed to write run report: {}", path.display()))?;

        log::info!("saved run report to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run Summary:")?;
        writeln!(f, "  Grid: {}x{}", self.rows, self.columns)?;
        writeln!(f, "  Generations run: {}", self.generations_run)?;
        writeln!(f, "  Final generation: {}", self.final_generation)?;
        writeln!(
            f,
            "  Population: {} → {} (peak {})",
            self.initial_population, self.final_population, self.peak_population
        )?;
        match (self.stability, self.stable_at) {
            (Some(stability), Some(generation)) => {
                writeln!(f, "  Outcome: {} at generation {}", stability, generation)?
            }
            _ => writeln!(f, "  Outcome: still evolving")?,
        }
        writeln!(f, "  Elapsed: {}ms", self.elapsed_ms)?;
        Ok(())
    }
}
