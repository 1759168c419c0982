use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::{LeaderboardStats, RankError, RankResult, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub username: String,
    pub level: u32,
    pub xp: u64,
    pub created_at: DateTime<Utc>,
}

impl PlayerProfile {
    pub fn new(id: impl Into<String>, username: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            level,
            xp: 0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Consecutive correct answers; best is the longest streak.
    Streak,
    /// Seconds to finish the timed round; best is the fastest real time.
    TimeTrial,
    /// One row per finished duel; value `1` is a win.
    Duel,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Streak => "streak",
            GameMode::TimeTrial => "time_trial",
            GameMode::Duel => "duel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "streak" => Some(GameMode::Streak),
            "time_trial" | "timetrial" | "time" => Some(GameMode::TimeTrial),
            "duel" | "duels" => Some(GameMode::Duel),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| RankError::InvalidGameMode(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub user_id: String,
    pub mode: GameMode,
    pub value: i64,
    pub played_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(user_id: impl Into<String>, mode: GameMode, value: i64) -> Self {
        Self {
            user_id: user_id.into(),
            mode,
            value,
            played_at: Utc::now(),
        }
    }
}

/// Shape of one entry in a player import file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerImport {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub scores: Vec<ImportedScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedScore {
    pub mode: GameMode,
    pub value: i64,
}

/// A player together with derived stats and classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub profile: PlayerProfile,
    pub stats: LeaderboardStats,
    pub result: RankResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub position: u32,
    pub user_id: String,
    pub username: String,
    pub level: u32,
    pub score: f64,
    pub tier: super::RankTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_parsing() {
        assert_eq!(GameMode::from_str("streak"), Some(GameMode::Streak));
        assert_eq!(GameMode::from_str("TIME_TRIAL"), Some(GameMode::TimeTrial));
        assert_eq!(GameMode::from_str("duels"), Some(GameMode::Duel));
        assert_eq!(GameMode::from_str("chess"), None);
        assert_eq!(GameMode::from_str(GameMode::TimeTrial.as_str()), Some(GameMode::TimeTrial));
        assert!(matches!(GameMode::parse("chess"), Err(RankError::InvalidGameMode(_))));
    }

    #[test]
    fn test_import_defaults() {
        let json = r#"[{"id": "u1", "username": "ana", "scores": [{"mode": "duel", "value": 1}]}]"#;
        let players: Vec<PlayerImport> = serde_json::from_str(json).unwrap();

        assert_eq!(players[0].level, 0);
        assert_eq!(players[0].scores[0].mode, GameMode::Duel);
    }
}
