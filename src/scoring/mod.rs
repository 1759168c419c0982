pub mod algorithm;
pub mod weights;
pub mod position;
pub mod standings;

pub use algorithm::RankScoreCalculator;
pub use weights::{RankWeights, TierThresholds};
pub use position::{best_position, build_leaderboard, position_for_score};
pub use standings::StandingsService;
