//! Terminal rendering of grids and status lines

use crate::config::DisplayMode;
use crate::life::{Cell, Game, Grid};

/// Renders generations for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Render one generation: a status line followed by the grid.
    ///
    /// [`DisplayMode::None`] renders nothing.
    pub fn format_generation(game: &Game, mode: DisplayMode, highlight_ever_alive: bool) -> String {
        let body = match mode {
            DisplayMode::None => return String::new(),
            DisplayMode::Text => Self::format_grid_text(game.grid(), highlight_ever_alive),
            DisplayMode::Compact => Self::format_grid_compact(game.grid(), highlight_ever_alive),
            DisplayMode::Coords => Self::format_grid_with_coords(game.grid(), highlight_ever_alive),
        };

        format!(
            "Generation = {}, Population = {}\n{}\n",
            game.generation(),
            game.population(),
            body
        )
    }

    /// `+` for live cells, `-` for dead ones (`:` if once alive)
    pub fn format_grid_text(grid: &Grid, highlight_ever_alive: bool) -> String {
        Self::render(grid, |cell| match Self::shade(cell, highlight_ever_alive) {
            Shade::Alive => "+",
            Shade::Remembered => ":",
            Shade::Dead => "-",
        })
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid, highlight_ever_alive: bool) -> String {
        Self::render(grid, |cell| match Self::shade(cell, highlight_ever_alive) {
            Shade::Alive => "█",
            Shade::Remembered => "░",
            Shade::Dead => "·",
        })
    }

    /// Format a grid with row and column indices
    pub fn format_grid_with_coords(grid: &Grid, highlight_ever_alive: bool) -> String {
        let mut output = String::from("   ");
        for column in 0..grid.columns() {
            output.push_str(&format!("{:>2}", column % 10));
        }
        output.push('\n');

        for (row, cells) in grid.iter_rows().enumerate() {
            output.push_str(&format!("{:2} ", row));
            for cell in cells {
                output.push_str(match Self::shade(cell, highlight_ever_alive) {
                    Shade::Alive => "██",
                    Shade::Remembered => "░░",
                    Shade::Dead => "··",
                });
            }
            output.push('\n');
        }

        output
    }

    fn render(grid: &Grid, symbol: impl Fn(&Cell) -> &'static str) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.columns() * 3 + 1));
        for row in grid.iter_rows() {
            for cell in row {
                output.push_str(symbol(cell));
            }
            output.push('\n');
        }
        output
    }

    fn shade(cell: &Cell, highlight_ever_alive: bool) -> Shade {
        if cell.is_alive() {
            Shade::Alive
        } else if highlight_ever_alive && cell.was_ever_alive() {
            Shade::Remembered
        } else {
            Shade::Dead
        }
    }
}

enum Shade {
    Alive,
    Remembered,
    Dead,
}

/// ANSI coloring for status lines
pub struct ColorOutput;

impl ColorOutput {
    /// Wrap text in the color's escape codes when the terminal allows it
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
