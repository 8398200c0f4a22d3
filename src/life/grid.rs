//! Fixed-size rectangular arena of cells

use super::Cell;
use crate::error::LifeError;
use std::fmt;

/// A rectangular grid of cells with dimensions fixed at construction.
///
/// Cells are stored densely in row-major order. They hold no reference back
/// to the grid; neighbor queries receive the grid at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of dead cells
    pub fn new(rows: usize, columns: usize) -> Result<Self, LifeError> {
        if rows == 0 || columns == 0 {
            return Err(LifeError::InvalidDimensions { rows, columns });
        }
        if !Self::fits(rows, columns) {
            return Err(LifeError::DimensionsOverflow {
                rows,
                columns,
                margin: 0,
            });
        }

        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| Cell::new(row, column)))
            .collect();

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Create a grid from a 2D boolean matrix, `true` marking live cells
    pub fn from_cells(cells: Vec<Vec<bool>>) -> anyhow::Result<Self> {
        let rows = cells.len();
        let columns = cells.first().map_or(0, Vec::len);

        for (i, row) in cells.iter().enumerate() {
            if row.len() != columns {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), columns);
            }
        }

        let mut grid = Self::new(rows, columns)?;
        for (cell, alive) in grid.cells.iter_mut().zip(cells.into_iter().flatten()) {
            if alive {
                cell.make_alive();
            }
        }

        Ok(grid)
    }

    /// Copy of this grid surrounded by `margin` dead cells on every side
    pub fn padded(&self, margin: usize) -> Result<Self, LifeError> {
        let overflow = LifeError::DimensionsOverflow {
            rows: self.rows,
            columns: self.columns,
            margin,
        };
        let border = margin.checked_mul(2).ok_or_else(|| overflow.clone())?;
        let rows = self.rows.checked_add(border).ok_or_else(|| overflow.clone())?;
        let columns = self.columns.checked_add(border).ok_or_else(|| overflow.clone())?;
        if !Self::fits(rows, columns) {
            return Err(overflow);
        }

        let mut grid = Self::new(rows, columns)?;
        for (row, column) in self.living_cells() {
            let index = (row + margin) * grid.columns + column + margin;
            grid.cells[index].make_alive();
        }
        Ok(grid)
    }

    /// Whether `rows × columns` cells can be allocated at all
    fn fits(rows: usize, columns: usize) -> bool {
        rows.checked_mul(columns)
            .and_then(|count| count.checked_mul(std::mem::size_of::<Cell>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize)
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn index(&self, row: isize, column: isize) -> Option<usize> {
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        if row < self.rows && column < self.columns {
            Some(row * self.columns + column)
        } else {
            None
        }
    }

    /// Cell at the given coordinates, or `None` outside the grid
    pub fn cell_at(&self, row: isize, column: isize) -> Option<&Cell> {
        self.index(row, column).map(|i| &self.cells[i])
    }

    /// Mutable cell at the given coordinates, or `None` outside the grid
    pub fn cell_at_mut(&mut self, row: isize, column: isize) -> Option<&mut Cell> {
        match self.index(row, column) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// Cell lookup for callers outside the engine, reporting out-of-range
    /// coordinates as an error.
    pub fn get(&self, row: isize, column: isize) -> Result<&Cell, LifeError> {
        let err = self.out_of_bounds(row, column);
        self.cell_at(row, column).ok_or(err)
    }

    /// Mutable counterpart of [`Grid::get`], used for seeding
    pub fn get_mut(&mut self, row: isize, column: isize) -> Result<&mut Cell, LifeError> {
        let err = self.out_of_bounds(row, column);
        self.cell_at_mut(row, column).ok_or(err)
    }

    fn out_of_bounds(&self, row: isize, column: isize) -> LifeError {
        LifeError::OutOfBounds {
            row,
            column,
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Cells grouped by row
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.columns)
    }

    /// Current liveness of every cell in row-major order
    pub fn snapshot(&self) -> Vec<bool> {
        self.cells.iter().map(Cell::is_alive).collect()
    }

    /// Coordinates of all live cells in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|cell| cell.is_alive())
            .map(|cell| (cell.row(), cell.column()))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
