//! Long-term behavior analysis of a running universe

pub mod stability;

pub use stability::{classify, Stability, StabilityTracker, DEFAULT_WINDOW};
