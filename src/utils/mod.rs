//! Output helpers shared by the runner and the CLI

pub mod display;

pub use display::{Color, ColorOutput, GridFormatter};
