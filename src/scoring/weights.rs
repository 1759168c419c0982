use serde::{Deserialize, Serialize};

use crate::models::{RankTier, TIME_UNSET_LEGACY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankWeights {
    /// Points per streak step.
    pub streak: f64,
    /// Points per duel won.
    pub duel_win: f64,
    /// Points per level.
    pub level: f64,
    /// Points for an instant timed run; scales down linearly to zero at `time_cap_seconds`.
    pub time_mode: f64,
    pub time_cap_seconds: u32,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            streak: 10.0,
            duel_win: 15.0,
            level: 5.0,
            time_mode: 200.0,
            time_cap_seconds: 300,
        }
    }
}

impl RankWeights {
    pub fn validate(&self) -> Result<(), String> {
        let weights = [self.streak, self.duel_win, self.level, self.time_mode];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("All rank weights must be finite and non-negative".to_string());
        }

        if self.time_cap_seconds == 0 || self.time_cap_seconds >= TIME_UNSET_LEGACY {
            return Err(format!(
                "time_cap_seconds must be between 1 and {}, got {}",
                TIME_UNSET_LEGACY - 1,
                self.time_cap_seconds
            ));
        }

        Ok(())
    }
}

/// Minimum rank score of each tier above Bronze. Bronze always starts at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub silver: f64,
    pub gold: f64,
    pub platinum: f64,
    pub diamond: f64,
    pub masters: f64,
    pub legends: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            silver: 100.0,
            gold: 250.0,
            platinum: 500.0,
            diamond: 800.0,
            masters: 1200.0,
            legends: 1800.0,
        }
    }
}

impl TierThresholds {
    pub fn threshold(&self, tier: RankTier) -> f64 {
        match tier {
            RankTier::Bronze => 0.0,
            RankTier::Silver => self.silver,
            RankTier::Gold => self.gold,
            RankTier::Platinum => self.platinum,
            RankTier::Diamond => self.diamond,
            RankTier::Masters => self.masters,
            RankTier::Legends => self.legends,
        }
    }

    /// Highest tier whose threshold is at most `score`.
    pub fn tier_for(&self, score: f64) -> RankTier {
        RankTier::ALL
            .iter()
            .rev()
            .find(|tier| score >= self.threshold(**tier))
            .copied()
            .unwrap_or(RankTier::Bronze)
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut previous = 0.0;
        for tier in RankTier::ALL.iter().skip(1) {
            let threshold = self.threshold(*tier);
            if !threshold.is_finite() || threshold <= previous {
                return Err(format!(
                    "Tier thresholds must be strictly ascending, {} is {} after {}",
                    tier, threshold, previous
                ));
            }
            previous = threshold;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_valid() {
        assert!(RankWeights::default().validate().is_ok());
        assert!(TierThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = RankWeights { duel_win: -1.0, ..RankWeights::default() };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_time_cap_must_stay_below_sentinel() {
        let weights = RankWeights { time_cap_seconds: 9999, ..RankWeights::default() };
        assert!(weights.validate().is_err());

        let weights = RankWeights { time_cap_seconds: 0, ..RankWeights::default() };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let thresholds = TierThresholds { gold: 90.0, ..TierThresholds::default() };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_tier_for_boundaries() {
        let thresholds = TierThresholds::default();
        assert_eq!(thresholds.tier_for(0.0), RankTier::Bronze);
        assert_eq!(thresholds.tier_for(99.99), RankTier::Bronze);
        assert_eq!(thresholds.tier_for(100.0), RankTier::Silver);
        assert_eq!(thresholds.tier_for(1800.0), RankTier::Legends);
        assert_eq!(thresholds.tier_for(f64::MAX), RankTier::Legends);
    }
}
