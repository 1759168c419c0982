use async_trait::async_trait;

use crate::models::{PlayerProfile, Result, ScoreRecord};

/// Storage the standings service reads player rows and per-mode results from.
///
/// Best-value queries ignore sentinel rows: non-positive streaks, unset times
/// (`0`, `9999` and above) and lost duels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn upsert_player(&self, player: &PlayerProfile) -> Result<()>;

    async fn record_score(&self, record: &ScoreRecord) -> Result<()>;

    async fn player(&self, user_id: &str) -> Result<Option<PlayerProfile>>;

    async fn players(&self) -> Result<Vec<PlayerProfile>>;

    async fn best_streak(&self, user_id: &str) -> Result<Option<u32>>;

    /// Fastest real timed-mode run in seconds.
    async fn best_time(&self, user_id: &str) -> Result<Option<u32>>;

    async fn duel_wins(&self, user_id: &str) -> Result<u32>;
}
