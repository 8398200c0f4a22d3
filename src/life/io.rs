//! Initial-state file formats
//!
//! Two plain-text layouts are understood:
//!
//! * coordinates: `rows columns` followed by one `row column` pair per live
//!   cell, whitespace separated
//! * bitmap: one line per row, `1` for a live cell and `0` for a dead one

use super::Grid;
use crate::config::InputFormat;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Load a grid from a file, adding `margin` dead cells on every side
pub fn load_grid_from_file<P: AsRef<Path>>(
    path: P,
    format: InputFormat,
    margin: usize,
) -> Result<Grid> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read initial state file: {}", path.display()))?;

    let grid = parse_grid_from_string(&content, format)
        .with_context(|| format!("Failed to parse initial state from file: {}", path.display()))?;

    log::info!(
        "loaded {}x{} grid with {} live cells from {}",
        grid.rows(),
        grid.columns(),
        grid.living_count(),
        path.display()
    );

    if margin == 0 {
        return Ok(grid);
    }
    Ok(grid.padded(margin)?)
}

/// Parse a grid in the given format
pub fn parse_grid_from_string(content: &str, format: InputFormat) -> Result<Grid> {
    match format {
        InputFormat::Coordinates => parse_coordinates(content),
        InputFormat::Bitmap => parse_bitmap(content),
    }
}

fn parse_coordinates(content: &str) -> Result<Grid> {
    let mut tokens = content.lines().enumerate().flat_map(|(i, line)| {
        line.split_whitespace().map(move |token| (i + 1, token))
    });

    let mut dimension = || -> Result<usize> {
        let (line, token) = tokens
            .next()
            .context("Invalid dimensions at line 1: expected `rows columns`")?;
        token
            .parse::<usize>()
            .with_context(|| format!("Invalid dimensions at line {}: `{}`", line, token))
    };
    let rows = dimension()?;
    let columns = dimension()?;

    let mut grid = Grid::new(rows, columns)?;

    while let Some((line, token)) = tokens.next() {
        let row = parse_coordinate(line, token)?;
        let (line, token) = tokens
            .next()
            .with_context(|| format!("Missing column for row {} at line {}", row, line))?;
        let column = parse_coordinate(line, token)?;

        log::debug!("setting initially live cell at {}, {}", row, column);
        grid.get_mut(row, column)
            .with_context(|| format!("Invalid live cell at line {}", line))?
            .make_alive();
    }

    Ok(grid)
}

fn parse_coordinate(line: usize, token: &str) -> Result<isize> {
    token
        .parse::<isize>()
        .with_context(|| format!("Could not read coordinates at line {}: `{}`", line, token))
}

fn parse_bitmap(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(anyhow::anyhow!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                )),
            })
            .collect::<Result<Vec<bool>>>()?;
        cells.push(row);
    }

    Grid::from_cells(cells)
}

/// Save a grid in the coordinate format
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, grid_to_coordinates(grid))
        .with_context(|| format!("Failed to write grid to file: {}", path.display()))?;

    log::info!("saved grid to {}", path.display());
    Ok(())
}

/// Render a grid in the coordinate format
pub fn grid_to_coordinates(grid: &Grid) -> String {
    let mut result = format!("{} {}\n", grid.rows(), grid.columns());
    for (row, column) in grid.living_cells() {
        // Writing to a String cannot fail.
        let _ = writeln!(result, "{} {}", row, column);
    }
    result
}

/// Render a grid in the bitmap format
pub fn grid_to_bitmap(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows() * (grid.columns() + 1));
    for row in grid.iter_rows() {
        result.extend(row.iter().map(|cell| if cell.is_alive() { '1' } else { '0' }));
        result.push('\n');
    }
    result
}

/// Write the bundled example patterns in both formats.
///
/// Coordinate files land in `<dir>/coordinates`, bitmaps in `<dir>/bitmap`.
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    let coordinates_dir = dir.join("coordinates");
    let bitmap_dir = dir.join("bitmap");

    for sub in [&coordinates_dir, &bitmap_dir] {
        std::fs::create_dir_all(sub)
            .with_context(|| format!("Failed to create directory: {}", sub.display()))?;
    }

    let patterns = [
        ("glider", "00100\n10100\n01100\n00000\n00000\n"),
        ("blinker", "00000\n00000\n01110\n00000\n00000\n"),
        ("block", "0000\n0110\n0110\n0000\n"),
        ("beacon", "110000\n110000\n001100\n001100\n"),
    ];

    for (name, bitmap) in patterns {
        let file_name = format!("{}.txt", name);
        let grid = parse_bitmap(bitmap)
            .with_context(|| format!("Invalid bundled pattern: {}", name))?;

        std::fs::write(bitmap_dir.join(&file_name), bitmap)
            .with_context(|| format!("Failed to write {}", file_name))?;
        save_grid_to_file(&grid, coordinates_dir.join(&file_name))?;
    }

    Ok(())
}
