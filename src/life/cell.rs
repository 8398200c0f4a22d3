//! A single grid position and its two-phase update state

use super::rules::{self, MAX_NEIGHBORS};
use super::Grid;
use itertools::iproduct;
use std::fmt;

/// One position of the grid.
///
/// Besides its current liveness a cell carries the state computed by
/// [`Cell::evolve`] and committed by [`Cell::advance`]. The pending fields are
/// only meaningful between those two calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    alive: bool,
    pending_alive: bool,
    pending_changed: bool,
    ever_alive: bool,
    row: usize,
    column: usize,
}

impl Cell {
    /// Create a dead cell at the given coordinates
    pub(crate) fn new(row: usize, column: usize) -> Self {
        Self {
            alive: false,
            pending_alive: false,
            pending_changed: false,
            ever_alive: false,
            row,
            column,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether the cell has been alive at any point since the grid was built
    pub fn was_ever_alive(&self) -> bool {
        self.ever_alive
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Force the cell alive. Used for seeding and by [`Cell::advance`].
    pub fn make_alive(&mut self) {
        self.alive = true;
        self.ever_alive = true;
    }

    /// Force the cell dead. Used for seeding and by [`Cell::advance`].
    pub fn make_dead(&mut self) {
        self.alive = false;
    }

    /// Count live cells among the eight Moore neighbors.
    ///
    /// Positions outside `grid` contribute nothing; edges are hard boundaries.
    pub fn count_live_neighbors(&self, grid: &Grid) -> u8 {
        let row = self.row as isize;
        let column = self.column as isize;

        let count = iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter_map(|(dr, dc)| grid.cell_at(row + dr, column + dc))
            .filter(|neighbor| neighbor.is_alive())
            .count() as u8;

        debug_assert!(count <= MAX_NEIGHBORS);
        count
    }

    /// Compute the next state from the current one without committing it
    pub fn evolve(&mut self, live_neighbors: u8) {
        let transition = rules::next_state(self.alive, live_neighbors);
        self.pending_changed = transition.changes_state();
        // No-op transitions reaffirm the current state so the pending value
        // is never stale.
        self.pending_alive = if self.pending_changed {
            transition.next_alive()
        } else {
            self.alive
        };
    }

    /// Commit the state computed by the last [`Cell::evolve`].
    ///
    /// A second call without an intervening evolve does nothing.
    pub fn advance(&mut self) {
        if !self.pending_changed {
            return;
        }
        if self.pending_alive {
            self.make_alive();
        } else {
            self.make_dead();
        }
        self.pending_changed = false;
    }

    /// Whether the last evolve scheduled a change that has not been committed
    pub fn has_pending_change(&self) -> bool {
        self.pending_changed
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.alive { "+" } else { "-" })
    }
}
