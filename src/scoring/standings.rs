use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    models::{
        LeaderboardEntry, LeaderboardStats, PlayerImport, PlayerProfile, RankError, RankTier,
        RankedPlayer, Result, ScoreRecord, TIME_UNSET,
    },
    scoring::{position, RankScoreCalculator},
    storage::StatsRepository,
};

/// Derives leaderboard stats, ranks and positions from stored results.
pub struct StandingsService {
    repository: Arc<dyn StatsRepository>,
    calculator: RankScoreCalculator,
}

impl StandingsService {
    pub fn new(repository: Arc<dyn StatsRepository>, calculator: RankScoreCalculator) -> Self {
        Self { repository, calculator }
    }

    pub fn calculator(&self) -> &RankScoreCalculator {
        &self.calculator
    }

    /// Best results per game mode. `best_position` is left at 1.
    async fn mode_stats(&self, user_id: &str) -> Result<LeaderboardStats> {
        let best_streak = self.repository.best_streak(user_id).await?.unwrap_or(0);
        let best_time_mode = self.repository.best_time(user_id).await?.unwrap_or(TIME_UNSET);
        let duel_wins = self.repository.duel_wins(user_id).await?;

        Ok(LeaderboardStats {
            best_streak,
            best_time_mode,
            duel_wins,
            best_position: 1,
        })
    }

    async fn standings(&self) -> Result<Vec<(PlayerProfile, LeaderboardStats)>> {
        let players = self.repository.players().await?;
        let mut standings = Vec::with_capacity(players.len());

        for player in players {
            let stats = self.mode_stats(&player.id).await?;
            standings.push((player, stats));
        }

        debug!("Loaded standings for {} players", standings.len());
        Ok(standings)
    }

    pub async fn leaderboard_stats(&self, user_id: &str) -> Result<LeaderboardStats> {
        Ok(self.player_rank(user_id).await?.stats)
    }

    pub async fn player_rank(&self, user_id: &str) -> Result<RankedPlayer> {
        let standings = self.standings().await?;

        let best_position = position::best_position(&self.calculator, user_id, &standings)
            .ok_or_else(|| RankError::PlayerNotFound(user_id.to_string()))?;

        let (profile, stats) = standings
            .into_iter()
            .find(|(p, _)| p.id == user_id)
            .ok_or_else(|| RankError::PlayerNotFound(user_id.to_string()))?;

        let stats = LeaderboardStats { best_position, ..stats };
        let result = self.calculator.rank_stats(&stats, profile.level);

        info!(
            "Player {} ranked {} with score {:.1} at position {}",
            user_id, result.tier, result.score, best_position
        );

        Ok(RankedPlayer { profile, stats, result })
    }

    pub async fn leaderboard(&self, limit: Option<usize>) -> Result<Vec<LeaderboardEntry>> {
        self.tier_leaderboard(None, limit).await
    }

    /// Leaderboard restricted to one tier. Positions stay global.
    pub async fn tier_leaderboard(
        &self,
        tier: Option<RankTier>,
        limit: Option<usize>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let standings = self.standings().await?;
        let mut entries = position::build_leaderboard(&self.calculator, &standings);

        if let Some(tier) = tier {
            entries.retain(|e| e.tier == tier);
        }

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }

    /// Append one game result for an existing player.
    pub async fn record_result(&self, record: &ScoreRecord) -> Result<()> {
        if self.repository.player(&record.user_id).await?.is_none() {
            return Err(RankError::PlayerNotFound(record.user_id.clone()));
        }

        self.repository.record_score(record).await?;
        info!("Recorded {} result {} for {}", record.mode.as_str(), record.value, record.user_id);
        Ok(())
    }

    /// Store players and their results. Returns the number of players written.
    pub async fn import_players(&self, players: &[PlayerImport]) -> Result<usize> {
        let mut imported = 0;

        for entry in players {
            if entry.id.trim().is_empty() {
                warn!("Skipping import entry without id ({})", entry.username);
                continue;
            }

            let mut profile = PlayerProfile::new(entry.id.clone(), entry.username.clone(), entry.level);
            profile.xp = entry.xp;
            self.repository.upsert_player(&profile).await?;

            for score in &entry.scores {
                self.repository
                    .record_score(&ScoreRecord::new(entry.id.clone(), score.mode, score.value))
                    .await?;
            }

            imported += 1;
        }

        info!("Imported {} players", imported);
        Ok(imported)
    }
}
