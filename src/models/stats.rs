use serde::{Deserialize, Serialize};

/// Time-mode value stored for players who never finished a timed run.
pub const TIME_UNSET: u32 = 0;
/// Legacy placeholder written by older clients for "no timed run".
pub const TIME_UNSET_LEGACY: u32 = 9999;

/// Per-player statistics the rank score is computed from.
///
/// Derived on demand from the best score per game mode, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub best_streak: u32,
    /// Best timed-mode run in seconds, lower is better. `0` and `9999` mean unset.
    pub best_time_mode: u32,
    pub duel_wins: u32,
    /// 1-based position among all players by descending rank score.
    pub best_position: u32,
}

impl Default for LeaderboardStats {
    fn default() -> Self {
        Self {
            best_streak: 0,
            best_time_mode: TIME_UNSET,
            duel_wins: 0,
            best_position: 1,
        }
    }
}

impl LeaderboardStats {
    /// The timed-mode result, or `None` when only a sentinel is stored.
    pub fn recorded_time(&self) -> Option<u32> {
        is_recorded_time(self.best_time_mode).then_some(self.best_time_mode)
    }
}

/// Per-input contributions to a rank score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub streak_score: f64,
    pub time_score: f64,
    pub duel_score: f64,
    pub level_score: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.streak_score + self.time_score + self.duel_score + self.level_score
    }
}

/// Whether a stored time is a real measurement rather than a sentinel.
pub fn is_recorded_time(seconds: u32) -> bool {
    seconds != TIME_UNSET && seconds < TIME_UNSET_LEGACY
}

/// Statistics as they arrive from loosely-typed sources (JSON rows, CLI input).
///
/// Any field may be missing, negative or non-finite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStats {
    pub best_streak: Option<f64>,
    pub best_time_mode: Option<f64>,
    pub duel_wins: Option<f64>,
    pub best_position: Option<f64>,
    pub level: Option<f64>,
}

impl RawStats {
    /// Clamp every field into the typed model. Returns the stats and the level.
    pub fn sanitize(&self) -> (LeaderboardStats, u32) {
        let stats = LeaderboardStats {
            best_streak: clamp_count(self.best_streak),
            best_time_mode: clamp_time(self.best_time_mode),
            duel_wins: clamp_count(self.duel_wins),
            best_position: clamp_count(self.best_position).max(1),
        };

        (stats, clamp_count(self.level))
    }
}

/// Missing, negative and non-finite values become zero.
pub fn clamp_count(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.floor().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Like [`clamp_count`], but a positive sub-second time stays a real time
/// instead of collapsing into the `0` sentinel.
pub fn clamp_time(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => clamp_count(value).max(1),
        _ => TIME_UNSET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_not_recorded_times() {
        assert!(!is_recorded_time(0));
        assert!(!is_recorded_time(9999));
        assert!(!is_recorded_time(12_000));
        assert!(is_recorded_time(1));
        assert!(is_recorded_time(9998));
    }

    #[test]
    fn test_clamp_count() {
        assert_eq!(clamp_count(None), 0);
        assert_eq!(clamp_count(Some(-4.0)), 0);
        assert_eq!(clamp_count(Some(f64::NAN)), 0);
        assert_eq!(clamp_count(Some(f64::INFINITY)), 0);
        assert_eq!(clamp_count(Some(12.7)), 12);
        assert_eq!(clamp_count(Some(1e20)), u32::MAX);
    }

    #[test]
    fn test_clamp_time_keeps_sub_second_runs() {
        assert_eq!(clamp_time(Some(0.5)), 1);
        assert_eq!(clamp_time(Some(1.0)), 1);
        assert_eq!(clamp_time(Some(9998.5)), 9998);
        assert_eq!(clamp_time(Some(0.0)), TIME_UNSET);
        assert_eq!(clamp_time(Some(-0.5)), TIME_UNSET);
        assert_eq!(clamp_time(Some(f64::NAN)), TIME_UNSET);
        assert_eq!(clamp_time(None), TIME_UNSET);
    }

    #[test]
    fn test_sanitize_missing_fields() {
        let raw: RawStats = serde_json::from_str(r#"{"bestStreak": 7, "duelWins": null}"#).unwrap();
        let (stats, level) = raw.sanitize();

        assert_eq!(stats.best_streak, 7);
        assert_eq!(stats.duel_wins, 0);
        assert_eq!(stats.best_time_mode, TIME_UNSET);
        assert_eq!(stats.best_position, 1);
        assert_eq!(level, 0);
    }
}
