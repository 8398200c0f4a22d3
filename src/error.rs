//! Errors raised by the simulation engine

use thiserror::Error;

/// Failures surfaced by grid construction and external cell lookups.
///
/// Neighbor counting never produces these: out-of-range neighbors are simply
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("cannot construct a grid of size {rows}x{columns}: both dimensions must be positive")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("a grid of {rows}x{columns} cells plus a margin of {margin} is too large")]
    DimensionsOverflow {
        rows: usize,
        columns: usize,
        margin: usize,
    },

    #[error("cell ({row}, {column}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        row: isize,
        column: isize,
        rows: usize,
        columns: usize,
    },
}
