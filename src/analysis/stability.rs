//! Detection of universes that stopped changing

use crate::life::{Game, Grid};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Long-term behavior recognised from a run's history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Stability {
    /// No live cells remain
    Extinct,
    /// The current generation equals the previous one
    StillLife,
    /// The current generation equals one seen `period` generations earlier
    Oscillator { period: u64 },
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stability::Extinct => write!(f, "Extinct"),
            Stability::StillLife => write!(f, "Still Life"),
            Stability::Oscillator { period } => write!(f, "Oscillator (period {})", period),
        }
    }
}

/// Generations remembered by a tracker unless told otherwise
pub const DEFAULT_WINDOW: usize = 64;

#[derive(Debug)]
struct Observation {
    generation: u64,
    hash: u64,
    snapshot: Vec<bool>,
}

/// Remembers the most recent generations it has observed and reports the
/// first repeat.
///
/// Only the last `window` generations are kept, so oscillators with a longer
/// period go unrecognised.
#[derive(Debug)]
pub struct StabilityTracker {
    window: usize,
    recent: VecDeque<Observation>,
}

impl Default for StabilityTracker {
    fn default() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }
}

impl StabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker remembering at most `window` generations, at least one
    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            recent: VecDeque::with_capacity(window),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Record the game's current generation.
    ///
    /// Returns the detected behavior once the universe is extinct or repeats
    /// an earlier state, `None` while it is still developing. A generation
    /// that is not newer than the last one recorded is ignored.
    pub fn observe(&mut self, game: &Game) -> Option<Stability> {
        if game.population() == 0 {
            return Some(Stability::Extinct);
        }

        let generation = game.generation();
        if self
            .recent
            .back()
            .is_some_and(|last| generation <= last.generation)
        {
            log::debug!("ignoring generation {} observed out of order", generation);
            return None;
        }

        let snapshot = game.grid().snapshot();
        let mut hasher = DefaultHasher::new();
        snapshot.hash(&mut hasher);
        let hash = hasher.finish();

        let earlier = self
            .recent
            .iter()
            .rev()
            .find(|seen| seen.hash == hash && seen.snapshot == snapshot)
            .map(|seen| seen.generation);
        if let Some(earlier) = earlier {
            return match generation.checked_sub(earlier) {
                Some(1) => Some(Stability::StillLife),
                Some(period) if period > 1 => Some(Stability::Oscillator { period }),
                _ => None,
            };
        }

        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(Observation {
            generation,
            hash,
            snapshot,
        });
        None
    }

    /// Number of generations currently remembered
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

/// Run a copy of `grid` for up to `lookahead` generations.
///
/// Returns the generation at which the behavior was recognised along with
/// the behavior itself.
pub fn classify(grid: &Grid, lookahead: u64) -> Option<(u64, Stability)> {
    let mut game = Game::new(grid.clone());
    let mut tracker = StabilityTracker::new();

    loop {
        if let Some(stability) = tracker.observe(&game) {
            return Some((game.generation(), stability));
        }
        if game.generation() >= lookahead {
            return None;
        }
        game.step();
    }
}
