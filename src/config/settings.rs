//! Configuration settings for the Game of Life runner

use crate::analysis::DEFAULT_WINDOW;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Maximum number of generations to compute
    pub generations: u64,
    /// Evaluate each phase on the rayon thread pool
    pub parallel: bool,
    /// End the run early once the universe dies out, freezes or repeats
    pub stop_when_stable: bool,
    /// Recent generations compared when looking for repeats, 0 disables
    /// detection
    #[serde(default = "default_stability_window")]
    pub stability_window: usize,
}

fn default_stability_window() -> usize {
    DEFAULT_WINDOW
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub initial_state_file: PathBuf,
    pub format: InputFormat,
    /// Dead cells added around the loaded pattern on every side
    pub margin: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    Coordinates,
    Bitmap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Pause between rendered generations
    pub frame_delay_ms: u64,
    /// Mark dead cells that have been alive before
    pub highlight_ever_alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Text,
    Compact,
    Coords,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Where to write the run report, stdout when absent
    pub report_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                generations: 10,
                parallel: false,
                stop_when_stable: false,
                stability_window: DEFAULT_WINDOW,
            },
            input: InputConfig {
                initial_state_file: PathBuf::from("input/coordinates/glider.txt"),
                format: InputFormat::Coordinates,
                margin: 0,
            },
            display: DisplayConfig {
                mode: DisplayMode::Text,
                frame_delay_ms: 100,
                highlight_ever_alive: false,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                report_file: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// The result is not validated; call [`Settings::validate`] once command
    /// line overrides have been applied.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        if self.simulation.stop_when_stable && self.simulation.stability_window == 0 {
            anyhow::bail!("Stopping when stable requires a positive stability window");
        }

        if !self.input.initial_state_file.exists() {
            anyhow::bail!(
                "Initial state file does not exist: {}",
                self.input.initial_state_file.display()
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if cli_overrides.parallel {
            self.simulation.parallel = true;
        }
        if cli_overrides.stop_when_stable {
            self.simulation.stop_when_stable = true;
        }
        if let Some(window) = cli_overrides.stability_window {
            self.simulation.stability_window = window;
        }
        if let Some(ref initial_state_file) = cli_overrides.initial_state_file {
            self.input.initial_state_file = initial_state_file.clone();
        }
        if let Some(format) = cli_overrides.input_format {
            self.input.format = format;
        }
        if let Some(margin) = cli_overrides.margin {
            self.input.margin = margin;
        }
        if let Some(mode) = cli_overrides.display_mode {
            self.display.mode = mode;
        }
        if let Some(frame_delay_ms) = cli_overrides.frame_delay_ms {
            self.display.frame_delay_ms = frame_delay_ms;
        }
        if let Some(format) = cli_overrides.output_format {
            self.output.format = format;
        }
        if let Some(ref report_file) = cli_overrides.report_file {
            self.output.report_file = Some(report_file.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<u64>,
    pub parallel: bool,
    pub stop_when_stable: bool,
    pub stability_window: Option<usize>,
    pub initial_state_file: Option<PathBuf>,
    pub input_format: Option<InputFormat>,
    pub margin: Option<usize>,
    pub display_mode: Option<DisplayMode>,
    pub frame_delay_ms: Option<u64>,
    pub output_format: Option<OutputFormat>,
    pub report_file: Option<PathBuf>,
}
