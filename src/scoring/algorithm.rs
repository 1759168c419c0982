use crate::{
    models::{LeaderboardStats, RankResult, RawStats, ScoreBreakdown},
    scoring::{RankWeights, TierThresholds},
};

/// Reduces player statistics to a rank score and classifies it into a tier.
///
/// Pure: holds only the configured weights and thresholds.
#[derive(Debug, Clone, Default)]
pub struct RankScoreCalculator {
    weights: RankWeights,
    thresholds: TierThresholds,
}

impl RankScoreCalculator {
    pub fn new(weights: RankWeights, thresholds: TierThresholds) -> Self {
        Self { weights, thresholds }
    }

    pub fn weights(&self) -> &RankWeights {
        &self.weights
    }

    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    /// Combined, non-negative score for sorting and tier selection.
    pub fn calculate_rank_score(&self, stats: &LeaderboardStats, level: u32) -> f64 {
        let total = self.calculate_breakdown(stats, level).total();

        if total.is_finite() {
            total.max(0.0)
        } else {
            f64::MAX
        }
    }

    pub fn calculate_breakdown(&self, stats: &LeaderboardStats, level: u32) -> ScoreBreakdown {
        ScoreBreakdown {
            streak_score: stats.best_streak as f64 * self.weights.streak,
            time_score: self.calculate_time_component(stats),
            duel_score: stats.duel_wins as f64 * self.weights.duel_win,
            level_score: level as f64 * self.weights.level,
        }
    }

    fn calculate_time_component(&self, stats: &LeaderboardStats) -> f64 {
        let cap = self.weights.time_cap_seconds;

        match stats.recorded_time() {
            Some(seconds) if seconds < cap => {
                let speed_factor = (cap - seconds) as f64 / cap as f64;
                speed_factor * self.weights.time_mode
            }
            _ => 0.0,
        }
    }

    /// Classify a score. A score equal to a threshold lands in that tier.
    pub fn calculate_rank(&self, score: f64, level: u32) -> RankResult {
        let score = match score {
            s if s.is_nan() => 0.0,
            s if s == f64::INFINITY => f64::MAX,
            s => s.max(0.0),
        };
        let tier = self.thresholds.tier_for(score);
        let next_tier = tier.next();
        let points_to_next = next_tier.map(|next| self.thresholds.threshold(next) - score);

        RankResult {
            tier,
            badge: tier.badge().to_string(),
            score,
            level,
            next_tier,
            points_to_next,
        }
    }

    pub fn rank_stats(&self, stats: &LeaderboardStats, level: u32) -> RankResult {
        self.calculate_rank(self.calculate_rank_score(stats, level), level)
    }

    pub fn rank_raw(&self, raw: &RawStats) -> RankResult {
        let (stats, level) = raw.sanitize();
        self.rank_stats(&stats, level)
    }
}
