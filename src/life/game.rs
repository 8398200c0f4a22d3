//! Generation driver: the two-phase evolve/advance protocol

use super::{Cell, Grid};
use crate::error::LifeError;
use rayon::prelude::*;

/// A running Game of Life universe.
///
/// Owns its grid exclusively and advances it one generation per
/// [`Game::step`]. Every cell computes its next state from the same frozen
/// generation before any cell commits.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    generation: u64,
    parallel: bool,
}

impl Game {
    /// Take ownership of a seeded grid, starting at generation 0
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
            parallel: false,
        }
    }

    /// Run both phases on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Compute every cell's pending state from the current generation.
    ///
    /// Neighbor counts are all taken before any cell is touched, so evaluation
    /// order cannot leak partially updated state.
    pub fn evolve_all(&mut self) {
        let grid = &self.grid;
        let counts: Vec<u8> = if self.parallel {
            grid.cells()
                .par_iter()
                .map(|cell| cell.count_live_neighbors(grid))
                .collect()
        } else {
            grid.cells()
                .iter()
                .map(|cell| cell.count_live_neighbors(grid))
                .collect()
        };

        let cells = self.grid.cells_mut();
        if self.parallel {
            cells
                .par_iter_mut()
                .zip(counts.par_iter())
                .for_each(|(cell, &count)| cell.evolve(count));
        } else {
            for (cell, &count) in cells.iter_mut().zip(&counts) {
                cell.evolve(count);
            }
        }
    }

    /// Commit every cell's pending state
    pub fn advance_all(&mut self) {
        let cells = self.grid.cells_mut();
        if self.parallel {
            cells.par_iter_mut().for_each(Cell::advance);
        } else {
            cells.iter_mut().for_each(Cell::advance);
        }
    }

    /// Advance the universe by exactly one generation
    pub fn step(&mut self) {
        self.evolve_all();
        self.advance_all();
        self.generation += 1;
        log::trace!(
            "generation {} population {}",
            self.generation,
            self.population()
        );
    }

    /// Advance the universe by `generations` generations
    pub fn step_many(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Number of completed steps
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells, by full scan
    pub fn population(&self) -> usize {
        self.grid.cells().iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn cell_at(&self, row: isize, column: isize) -> Option<&Cell> {
        self.grid.cell_at(row, column)
    }

    pub fn get(&self, row: isize, column: isize) -> Result<&Cell, LifeError> {
        self.grid.get(row, column)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(rows: usize, columns: usize, live: &[(isize, isize)]) -> Grid {
        let mut grid = Grid::new(rows, columns).unwrap();
        for &(row, column) in live {
            grid.get_mut(row, column).unwrap().make_alive();
        }
        grid
    }

    fn live_cells(game: &Game) -> Vec<(usize, usize)> {
        game.grid().living_cells()
    }

    /// Next generation computed independently from a frozen copy
    fn reference_step(cells: &[Vec<bool>]) -> Vec<Vec<bool>> {
        let rows = cells.len() as isize;
        let columns = cells[0].len() as isize;
        let alive = |r: isize, c: isize| {
            r >= 0 && c >= 0 && r < rows && c < columns && cells[r as usize][c as usize]
        };

        (0..rows)
            .map(|r| {
                (0..columns)
                    .map(|c| {
                        let mut n = 0;
                        for dr in -1..=1 {
                            for dc in -1..=1 {
                                if (dr, dc) != (0, 0) && alive(r + dr, c + dc) {
                                    n += 1;
                                }
                            }
                        }
                        matches!((alive(r, c), n), (true, 2) | (true, 3) | (false, 3))
                    })
                    .collect()
            })
            .collect()
    }

    fn to_matrix(game: &Game) -> Vec<Vec<bool>> {
        game.grid()
            .iter_rows()
            .map(|row| row.iter().map(Cell::is_alive).collect())
            .collect()
    }

    fn soup() -> Grid {
        // Deterministic pseudo-random fill
        let mut state = 0x2545_f491_u32;
        let cells = (0..12)
            .map(|_| {
                (0..15)
                    .map(|_| {
                        state ^= state << 13;
                        state ^= state >> 17;
                        state ^= state << 5;
                        state % 3 == 0
                    })
                    .collect()
            })
            .collect();
        Grid::from_cells(cells).unwrap()
    }

    #[test]
    fn test_single_cell_dies() {
        let mut game = Game::new(grid_with(3, 3, &[(1, 1)]));
        game.step();
        assert!(!game.get(1, 1).unwrap().is_alive());
        assert_eq!(game.population(), 0);
    }

    #[test]
    fn test_still_life_block() {
        let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
        let mut game = Game::new(grid_with(4, 4, &block));
        let before = live_cells(&game);

        game.step();
        assert_eq!(live_cells(&game), before);
        game.step();
        assert_eq!(live_cells(&game), before);
    }

    #[test]
    fn test_oscillator_blinker() {
        let mut game = Game::new(grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]));

        game.step();
        assert_eq!(live_cells(&game), vec![(1, 2), (2, 2), (3, 2)]);

        game.step();
        assert_eq!(live_cells(&game), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_birth() {
        let mut game = Game::new(grid_with(5, 5, &[(1, 1), (1, 3), (3, 2)]));
        game.step();
        assert!(game.get(2, 2).unwrap().is_alive());
    }

    #[test]
    fn test_simultaneity_matches_frozen_snapshot() {
        let mut game = Game::new(soup());
        for _ in 0..10 {
            let expected = reference_step(&to_matrix(&game));
            game.step();
            assert_eq!(to_matrix(&game), expected);
        }
    }

    #[test]
    fn test_evolve_all_does_not_change_current_state() {
        let mut game = Game::new(soup());
        let before = game.grid().snapshot();
        game.evolve_all();
        assert_eq!(game.grid().snapshot(), before);
        assert_eq!(game.generation(), 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = Game::new(soup());
        let mut b = Game::new(soup());
        for _ in 0..20 {
            a.step();
            b.step();
            assert_eq!(a.grid().snapshot(), b.grid().snapshot());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut sequential = Game::new(soup());
        let mut parallel = Game::new(soup()).with_parallel(true);
        assert!(parallel.is_parallel());

        for _ in 0..20 {
            sequential.step();
            parallel.step();
            assert_eq!(sequential.grid(), parallel.grid());
        }
    }

    #[test]
    fn test_population_and_generation_accounting() {
        let mut game = Game::new(soup());
        assert_eq!(game.generation(), 0);

        for expected_generation in 1..=15 {
            game.step();
            assert_eq!(game.generation(), expected_generation);

            let scanned = game.grid().snapshot().into_iter().filter(|&alive| alive).count();
            assert_eq!(game.population(), scanned);
        }

        game.step_many(5);
        assert_eq!(game.generation(), 20);
    }

    #[test]
    fn test_observation_is_idempotent() {
        let game = Game::new(soup());
        let population = game.population();
        let snapshot = game.grid().snapshot();
        for _ in 0..3 {
            assert_eq!(game.population(), population);
            assert_eq!(game.grid().snapshot(), snapshot);
        }
    }

    #[test]
    fn test_pass_through_queries() {
        let game = Game::new(grid_with(4, 6, &[(0, 5)]));
        assert_eq!(game.dimensions(), (4, 6));
        assert!(game.cell_at(0, 5).unwrap().is_alive());
        assert!(game.cell_at(4, 0).is_none());
        assert!(matches!(game.get(0, 6), Err(LifeError::OutOfBounds { .. })));
    }
}
