use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

use crate::{
    config::DatabaseSettings,
    models::{GameMode, PlayerProfile, RankError, Result, ScoreRecord, TIME_UNSET_LEGACY},
    storage::StatsRepository,
};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS players (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL,
        level INTEGER NOT NULL DEFAULT 0,
        xp INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS scores (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        mode TEXT NOT NULL,
        value INTEGER NOT NULL,
        played_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_scores_user_mode ON scores (user_id, mode)",
];

/// SQLite-backed player and score storage.
#[derive(Debug, Clone)]
pub struct SqliteStatsRepository {
    pool: SqlitePool,
}

impl SqliteStatsRepository {
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&settings.url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.connect_timeout_seconds))
            .connect_with(options)
            .await?;

        info!("Connected to {}", settings.url);

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    /// Private in-memory database. A single long-lived connection keeps it alive.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("Schema ready");
        Ok(())
    }

    fn profile_from_row(row: &SqliteRow) -> Result<PlayerProfile> {
        let level: i64 = row.try_get("level")?;
        let xp: i64 = row.try_get("xp")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(PlayerProfile {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            level: u32::try_from(level.max(0)).unwrap_or(u32::MAX),
            xp: u64::try_from(xp.max(0)).unwrap_or(0),
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RankError::InvalidData(format!("bad timestamp {:?}: {}", value, e)))
}

fn to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[async_trait]
impl StatsRepository for SqliteStatsRepository {
    async fn upsert_player(&self, player: &PlayerProfile) -> Result<()> {
        sqlx::query(
            "INSERT INTO players (id, username, level, xp, created_at) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                level = excluded.level,
                xp = excluded.xp",
        )
        .bind(&player.id)
        .bind(&player.username)
        .bind(player.level as i64)
        .bind(i64::try_from(player.xp).unwrap_or(i64::MAX))
        .bind(player.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_score(&self, record: &ScoreRecord) -> Result<()> {
        sqlx::query("INSERT INTO scores (user_id, mode, value, played_at) VALUES (?, ?, ?, ?)")
            .bind(&record.user_id)
            .bind(record.mode.as_str())
            .bind(record.value)
            .bind(record.played_at.to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn player(&self, user_id: &str) -> Result<Option<PlayerProfile>> {
        let row = sqlx::query("SELECT id, username, level, xp, created_at FROM players WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::profile_from_row).transpose()
    }

    async fn players(&self) -> Result<Vec<PlayerProfile>> {
        let rows = sqlx::query("SELECT id, username, level, xp, created_at FROM players ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::profile_from_row).collect()
    }

    async fn best_streak(&self, user_id: &str) -> Result<Option<u32>> {
        let best: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(value) FROM scores WHERE user_id = ? AND mode = ? AND value > 0",
        )
        .bind(user_id)
        .bind(GameMode::Streak.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(best.map(to_u32))
    }

    async fn best_time(&self, user_id: &str) -> Result<Option<u32>> {
        let best: Option<i64> = sqlx::query_scalar(
            "SELECT MIN(value) FROM scores WHERE user_id = ? AND mode = ? AND value > 0 AND value < ?",
        )
        .bind(user_id)
        .bind(GameMode::TimeTrial.as_str())
        .bind(TIME_UNSET_LEGACY as i64)
        .fetch_one(&self.pool)
        .await?;

        Ok(best.map(to_u32))
    }

    async fn duel_wins(&self, user_id: &str) -> Result<u32> {
        let wins: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM scores WHERE user_id = ? AND mode = ? AND value > 0",
        )
        .bind(user_id)
        .bind(GameMode::Duel.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(to_u32(wins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> SqliteStatsRepository {
        let repo = SqliteStatsRepository::in_memory().await.unwrap();
        repo.upsert_player(&PlayerProfile::new("u1", "ana", 7)).await.unwrap();

        for (mode, value) in [
            (GameMode::Streak, 12),
            (GameMode::Streak, 31),
            (GameMode::TimeTrial, 0),
            (GameMode::TimeTrial, 9999),
            (GameMode::TimeTrial, 95),
            (GameMode::TimeTrial, 64),
            (GameMode::Duel, 1),
            (GameMode::Duel, 0),
            (GameMode::Duel, 1),
        ] {
            repo.record_score(&ScoreRecord::new("u1", mode, value)).await.unwrap();
        }

        repo
    }

    #[tokio::test]
    async fn test_best_values() {
        let repo = seeded().await;

        assert_eq!(repo.best_streak("u1").await.unwrap(), Some(31));
        assert_eq!(repo.best_time("u1").await.unwrap(), Some(64));
        assert_eq!(repo.duel_wins("u1").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_player_has_no_results() {
        let repo = seeded().await;

        assert_eq!(repo.player("nobody").await.unwrap(), None);
        assert_eq!(repo.best_streak("nobody").await.unwrap(), None);
        assert_eq!(repo.best_time("nobody").await.unwrap(), None);
        assert_eq!(repo.duel_wins("nobody").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upsert_updates_level() {
        let repo = seeded().await;
        let mut player = repo.player("u1").await.unwrap().unwrap();
        player.level = 9;
        player.username = "ana_b".to_string();
        repo.upsert_player(&player).await.unwrap();

        let players = repo.players().await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].level, 9);
        assert_eq!(players[0].username, "ana_b");
    }
}
