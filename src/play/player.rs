//! Paced, rendered runs of a game

use super::RunReport;
use crate::analysis::StabilityTracker;
use crate::config::{DisplayConfig, DisplayMode, Settings, SimulationConfig};
use crate::life::Game;
use crate::utils::GridFormatter;
use anyhow::{Context, Result};
use std::io::Write;
use std::time::{Duration, Instant};

/// Drives a [`Game`] through the configured number of generations,
/// rendering each one.
pub struct Player {
    simulation: SimulationConfig,
    display: DisplayConfig,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        Self {
            simulation: settings.simulation.clone(),
            display: settings.display.clone(),
        }
    }

    /// Play `game` forward, writing every rendered generation to `out`.
    ///
    /// Renders the starting generation, then steps until the configured
    /// number of generations has been computed. With `stop_when_stable` the
    /// run ends as soon as the universe dies out or repeats itself. A
    /// stability window of zero skips detection altogether.
    pub fn play<W: Write>(&self, game: &mut Game, out: &mut W) -> Result<RunReport> {
        let start_time = Instant::now();
        let start_generation = game.generation();
        let target_generation = start_generation + self.simulation.generations;

        let (rows, columns) = game.dimensions();
        let initial_population = game.population();
        let mut peak_population = initial_population;

        let window = self.simulation.stability_window;
        let mut tracker = (window > 0).then(|| StabilityTracker::with_window(window));
        let mut stability = tracker.as_mut().and_then(|tracker| tracker.observe(game));
        let mut stable_at = stability.map(|_| game.generation());
        if stability.is_some() {
            tracker = None;
        }

        self.render(game, out)?;

        while game.generation() < target_generation {
            if self.simulation.stop_when_stable && stability.is_some() {
                log::debug!("stopping early at generation {}", game.generation());
                break;
            }

            self.pause();
            game.step();
            peak_population = peak_population.max(game.population());
            self.render(game, out)?;

            if let Some(detected) = tracker.as_mut().and_then(|tracker| tracker.observe(game)) {
                log::info!("{} detected at generation {}", detected, game.generation());
                stability = Some(detected);
                stable_at = Some(game.generation());
                tracker = None;
            }
        }

        out.flush().context("Failed to flush output")?;

        Ok(RunReport {
            rows,
            columns,
            generations_run: game.generation() - start_generation,
            final_generation: game.generation(),
            initial_population,
            final_population: game.population(),
            peak_population,
            stability,
            stable_at,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    fn render<W: Write>(&self, game: &Game, out: &mut W) -> Result<()> {
        let frame = GridFormatter::format_generation(
            game,
            self.display.mode,
            self.display.highlight_ever_alive,
        );
        if !frame.is_empty() {
            out.write_all(frame.as_bytes())
                .context("Failed to write generation")?;
        }
        Ok(())
    }

    fn pause(&self) {
        if self.display.mode != DisplayMode::None && self.display.frame_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.display.frame_delay_ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Stability;
    use crate::life::Grid;

    fn settings(generations: u64, stop_when_stable: bool, mode: DisplayMode) -> Settings {
        let mut settings = Settings::default();
        settings.simulation.generations = generations;
        settings.simulation.stop_when_stable = stop_when_stable;
        settings.display.mode = mode;
        settings.display.frame_delay_ms = 0;
        settings
    }

    fn game(live: &[(isize, isize)]) -> Game {
        let mut grid = Grid::new(5, 5).unwrap();
        for &(row, column) in live {
            grid.get_mut(row, column).unwrap().make_alive();
        }
        Game::new(grid)
    }

    #[test]
    fn test_runs_all_generations() {
        let mut game = game(&[(2, 1), (2, 2), (2, 3)]);
        let mut out = Vec::new();
        let report = Player::new(&settings(5, false, DisplayMode::Text))
            .play(&mut game, &mut out)
            .unwrap();

        assert_eq!(report.generations_run, 5);
        assert_eq!(game.generation(), 5);
        assert_eq!(report.stability, Some(Stability::Oscillator { period: 2 }));
        assert_eq!(report.stable_at, Some(2));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Generation = ").count(), 6);
        assert!(text.starts_with("Generation = 0, Population = 3\n"));
    }

    #[test]
    fn test_stops_when_stable() {
        let mut game = game(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut out = Vec::new();
        let report = Player::new(&settings(100, true, DisplayMode::None))
            .play(&mut game, &mut out)
            .unwrap();

        assert!(out.is_empty());
        assert_eq!(report.generations_run, 1);
        assert_eq!(report.stability, Some(Stability::StillLife));
        assert_eq!(report.final_population, 4);
    }

    #[test]
    fn test_empty_universe_stops_immediately() {
        let mut game = game(&[]);
        let mut out = Vec::new();
        let report = Player::new(&settings(10, true, DisplayMode::Compact))
            .play(&mut game, &mut out)
            .unwrap();

        assert_eq!(report.generations_run, 0);
        assert_eq!(report.stability, Some(Stability::Extinct));
        assert_eq!(report.stable_at, Some(0));
    }

    #[test]
    fn test_population_tracking() {
        // The L-tromino becomes a block
        let mut game = game(&[(1, 1), (1, 2), (2, 1)]);
        let mut out = Vec::new();
        let report = Player::new(&settings(3, false, DisplayMode::None))
            .play(&mut game, &mut out)
            .unwrap();

        assert_eq!(report.initial_population, 3);
        assert_eq!(report.final_population, 4);
        assert_eq!(report.peak_population, 4);
        assert_eq!(report.stability, Some(Stability::StillLife));
    }

    #[test]
    fn test_zero_window_skips_detection() {
        let mut game = game(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut settings = settings(6, false, DisplayMode::None);
        settings.simulation.stability_window = 0;

        let report = Player::new(&settings).play(&mut game, &mut Vec::new()).unwrap();
        assert_eq!(report.generations_run, 6);
        assert_eq!(report.stability, None);
        assert_eq!(report.stable_at, None);
    }

    #[test]
    fn test_long_run_with_small_window() {
        // Period 2 fits a window of two generations
        let mut game = game(&[(2, 1), (2, 2), (2, 3)]);
        let mut settings = settings(500, false, DisplayMode::None);
        settings.simulation.stability_window = 2;

        let report = Player::new(&settings).play(&mut game, &mut Vec::new()).unwrap();
        assert_eq!(report.generations_run, 500);
        assert_eq!(report.stability, Some(Stability::Oscillator { period: 2 }));
        assert_eq!(report.stable_at, Some(2));
    }
}
