pub mod format;
pub mod ranking;

pub use ranking::{normalize, RankingRow};
