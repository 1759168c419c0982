use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RankTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Masters,
    Legends,
}

impl RankTier {
    /// Lowest to highest.
    pub const ALL: [RankTier; 7] = [
        RankTier::Bronze,
        RankTier::Silver,
        RankTier::Gold,
        RankTier::Platinum,
        RankTier::Diamond,
        RankTier::Masters,
        RankTier::Legends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RankTier::Bronze => "Bronze",
            RankTier::Silver => "Silver",
            RankTier::Gold => "Gold",
            RankTier::Platinum => "Platinum",
            RankTier::Diamond => "Diamond",
            RankTier::Masters => "Masters",
            RankTier::Legends => "Legends",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            RankTier::Bronze => "/ranks/bronze.png",
            RankTier::Silver => "/ranks/silver.png",
            RankTier::Gold => "/ranks/gold.png",
            RankTier::Platinum => "/ranks/platinum.png",
            RankTier::Diamond => "/ranks/diamond.png",
            RankTier::Masters => "/ranks/masters.png",
            RankTier::Legends => "/ranks/legends.png",
        }
    }

    pub fn next(&self) -> Option<RankTier> {
        let idx = *self as usize;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a rank score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    pub tier: RankTier,
    pub badge: String,
    pub score: f64,
    pub level: u32,
    pub next_tier: Option<RankTier>,
    /// Score still missing to reach `next_tier`; `None` at the top tier.
    pub points_to_next: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order() {
        assert!(RankTier::Bronze < RankTier::Silver);
        assert!(RankTier::Masters < RankTier::Legends);
        assert_eq!(RankTier::Diamond.next(), Some(RankTier::Masters));
        assert_eq!(RankTier::Legends.next(), None);
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!(RankTier::from_str("gold"), Some(RankTier::Gold));
        assert_eq!(RankTier::from_str(" Legends "), Some(RankTier::Legends));
        assert_eq!(RankTier::from_str("wood"), None);
    }

    #[test]
    fn test_badges_are_distinct() {
        let mut badges: Vec<_> = RankTier::ALL.iter().map(|t| t.badge()).collect();
        badges.dedup();
        assert_eq!(badges.len(), RankTier::ALL.len());
    }
}
