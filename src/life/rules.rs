//! Conway's B3/S23 rule

/// Largest possible live-neighbor count in the Moore neighborhood
pub const MAX_NEIGHBORS: u8 = 8;

/// Outcome of applying the rule to one cell for one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Dead cell with exactly three live neighbors
    Birth,
    /// Live cell with fewer than two or more than three live neighbors
    Death,
    /// Live cell with two or three live neighbors
    Survive,
    /// Dead cell without exactly three live neighbors
    StayDead,
}

impl Transition {
    /// Liveness after the transition is committed
    pub fn next_alive(self) -> bool {
        matches!(self, Transition::Birth | Transition::Survive)
    }

    /// Whether committing the transition mutates the cell
    pub fn changes_state(self) -> bool {
        matches!(self, Transition::Birth | Transition::Death)
    }
}

/// Apply the rule to a cell given its current state and live-neighbor count
pub fn next_state(alive: bool, live_neighbors: u8) -> Transition {
    match (alive, live_neighbors) {
        (false, 3) => Transition::Birth,
        (false, _) => Transition::StayDead,
        (true, 2) | (true, 3) => Transition::Survive,
        (true, _) => Transition::Death,
    }
}
