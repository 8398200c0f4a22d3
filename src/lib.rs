//! Conway's Game of Life
//!
//! A finite-grid simulation engine with a two-phase (evolve, then advance)
//! generation update, plus the file loading, rendering and run reporting
//! used by the command-line player.

pub mod analysis;
pub mod config;
pub mod error;
pub mod life;
pub mod play;
pub mod utils;

pub use config::Settings;
pub use error::LifeError;
pub use life::{Cell, Game, Grid};
pub use play::{Player, RunReport};

use anyhow::Result;

/// Load the configured initial state and build a game from it
pub fn load_game(settings: &Settings) -> Result<Game> {
    let grid = life::load_grid_from_file(
        &settings.input.initial_state_file,
        settings.input.format,
        settings.input.margin,
    )?;
    Ok(Game::new(grid).with_parallel(settings.simulation.parallel))
}
