use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{
    models::{is_recorded_time, GameMode, PlayerProfile, Result, ScoreRecord},
    storage::StatsRepository,
};

/// Process-local storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStatsRepository {
    players: RwLock<HashMap<String, PlayerProfile>>,
    scores: RwLock<Vec<ScoreRecord>>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn values(&self, user_id: &str, mode: GameMode) -> Vec<i64> {
        self.scores
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id && r.mode == mode)
            .map(|r| r.value)
            .collect()
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn upsert_player(&self, player: &PlayerProfile) -> Result<()> {
        let mut players = self.players.write().await;
        players
            .entry(player.id.clone())
            .and_modify(|existing| {
                existing.username = player.username.clone();
                existing.level = player.level;
                existing.xp = player.xp;
            })
            .or_insert_with(|| player.clone());
        Ok(())
    }

    async fn record_score(&self, record: &ScoreRecord) -> Result<()> {
        self.scores.write().await.push(record.clone());
        Ok(())
    }

    async fn player(&self, user_id: &str) -> Result<Option<PlayerProfile>> {
        Ok(self.players.read().await.get(user_id).cloned())
    }

    async fn players(&self) -> Result<Vec<PlayerProfile>> {
        let mut players: Vec<_> = self.players.read().await.values().cloned().collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(players)
    }

    async fn best_streak(&self, user_id: &str) -> Result<Option<u32>> {
        Ok(self
            .values(user_id, GameMode::Streak)
            .await
            .into_iter()
            .filter(|v| *v > 0)
            .max()
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX)))
    }

    async fn best_time(&self, user_id: &str) -> Result<Option<u32>> {
        Ok(self
            .values(user_id, GameMode::TimeTrial)
            .await
            .into_iter()
            .filter_map(|v| u32::try_from(v).ok())
            .filter(|v| is_recorded_time(*v))
            .min())
    }

    async fn duel_wins(&self, user_id: &str) -> Result<u32> {
        let wins = self
            .values(user_id, GameMode::Duel)
            .await
            .into_iter()
            .filter(|v| *v > 0)
            .count();
        Ok(u32::try_from(wins).unwrap_or(u32::MAX))
    }
}
