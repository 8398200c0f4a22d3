//! Configuration management for the Game of Life runner

pub mod settings;

pub use settings::{
    CliOverrides, DisplayConfig, DisplayMode, InputConfig, InputFormat, OutputConfig,
    OutputFormat, Settings, SimulationConfig,
};
