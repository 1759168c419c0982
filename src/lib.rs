pub mod models;
pub mod config;
pub mod scoring;
pub mod storage;
pub mod tui;
pub mod demo;

pub use models::{LeaderboardStats, RawStats, RankTier, RankResult, RankError, Result};
pub use config::Settings;
pub use scoring::{RankScoreCalculator, RankWeights, StandingsService};
