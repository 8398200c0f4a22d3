//! Running games for display

pub mod player;
pub mod report;

pub use player::Player;
pub use report::RunReport;
