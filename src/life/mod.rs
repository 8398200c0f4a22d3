//! Game of Life simulation engine

pub mod cell;
pub mod game;
pub mod grid;
pub mod io;
pub mod rules;

pub use cell::Cell;
pub use game::Game;
pub use grid::Grid;
pub use io::{create_example_grids, load_grid_from_file, parse_grid_from_string, save_grid_to_file};
pub use rules::Transition;
