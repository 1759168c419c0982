use flag_rank::{
    models::{GameMode, ImportedScore, LeaderboardStats, PlayerImport, RankTier, RawStats},
    scoring::{RankScoreCalculator, RankWeights, StandingsService, TierThresholds},
    storage::SqliteStatsRepository,
};
use std::sync::Arc;

fn stats(best_streak: u32, best_time_mode: u32, duel_wins: u32, best_position: u32) -> LeaderboardStats {
    LeaderboardStats {
        best_streak,
        best_time_mode,
        duel_wins,
        best_position,
    }
}

#[test]
fn test_zero_case_is_bronze() {
    let calc = RankScoreCalculator::default();
    let score = calc.calculate_rank_score(&stats(0, 0, 0, 999), 0);

    assert!(score.is_finite());
    assert_eq!(score, 0.0);
    assert_eq!(calc.calculate_rank(score, 0).tier, RankTier::Bronze);
    assert_eq!(calc.calculate_rank(score, 0).badge, "/ranks/bronze.png");
}

#[test]
fn test_legend_example() {
    let calc = RankScoreCalculator::default();
    assert_eq!(calc.rank_stats(&stats(100, 30, 50, 1), 100).tier, RankTier::Legends);
}

#[test]
fn test_sentinels_share_tier_contribution() {
    let calc = RankScoreCalculator::default();

    for (streak, duels, level) in [(0, 0, 0), (9, 3, 12), (40, 20, 60)] {
        let unset = calc.rank_stats(&stats(streak, 0, duels, 1), level);
        let legacy = calc.rank_stats(&stats(streak, 9999, duels, 1), level);
        assert_eq!(unset.score, legacy.score);
        assert_eq!(unset.tier, legacy.tier);
    }
}

#[test]
fn test_position_does_not_affect_score() {
    let calc = RankScoreCalculator::default();
    assert_eq!(
        calc.calculate_rank_score(&stats(5, 90, 2, 1), 3),
        calc.calculate_rank_score(&stats(5, 90, 2, 500), 3)
    );
}

#[test]
fn test_scores_finite_and_non_negative_over_grid() {
    let calc = RankScoreCalculator::default();

    for streak in [0, 1, 50, u32::MAX] {
        for time in [0, 1, 299, 300, 9998, 9999, u32::MAX] {
            for duels in [0, 7, u32::MAX] {
                for level in [0, 10, u32::MAX] {
                    let score = calc.calculate_rank_score(&stats(streak, time, duels, 1), level);
                    assert!(score.is_finite() && score >= 0.0);
                }
            }
        }
    }
}

#[test]
fn test_level_ordering() {
    let calc = RankScoreCalculator::default();
    let s = stats(12, 100, 4, 1);

    let a = calc.rank_stats(&s, 30);
    let b = calc.rank_stats(&s, 10);
    assert!(a.tier >= b.tier);
    assert!(a.score >= b.score);
}

#[test]
fn test_custom_weights_keep_sentinel_neutral() {
    let weights = RankWeights { time_mode: 5000.0, time_cap_seconds: 60, ..RankWeights::default() };
    let calc = RankScoreCalculator::new(weights, TierThresholds::default());

    assert_eq!(calc.calculate_rank_score(&stats(0, 9999, 0, 1), 0), 0.0);
    assert_eq!(calc.calculate_rank_score(&stats(0, 60, 0, 1), 0), 0.0);
    assert_eq!(calc.calculate_rank_score(&stats(0, 30, 0, 1), 0), 2500.0);
}

#[test]
fn test_raw_stats_from_json() {
    let calc = RankScoreCalculator::default();
    let raw: RawStats = serde_json::from_str(
        r#"{"bestStreak": 20, "bestTimeMode": 9999, "duelWins": -3, "level": 4}"#,
    )
    .unwrap();

    let result = calc.rank_raw(&raw);
    assert_eq!(result.score, 220.0);
    assert_eq!(result.tier, RankTier::Silver);
}

fn player(id: &str, level: u32, scores: &[(GameMode, i64)]) -> PlayerImport {
    PlayerImport {
        id: id.to_string(),
        username: id.to_string(),
        level,
        xp: 0,
        scores: scores
            .iter()
            .map(|(mode, value)| ImportedScore { mode: *mode, value: *value })
            .collect(),
    }
}

#[tokio::test]
async fn test_sqlite_standings() {
    let repo = SqliteStatsRepository::in_memory().await.unwrap();
    let service = StandingsService::new(Arc::new(repo), RankScoreCalculator::default());

    service
        .import_players(&[
            player("rookie", 0, &[]),
            player("duelist", 20, &[(GameMode::Duel, 1), (GameMode::Duel, 1), (GameMode::Duel, 0)]),
            player("sprinter", 20, &[(GameMode::TimeTrial, 9999), (GameMode::TimeTrial, 60)]),
            player("legend", 100, &[(GameMode::Streak, 120), (GameMode::TimeTrial, 30)]),
        ])
        .await
        .unwrap();

    let board = service.leaderboard(None).await.unwrap();
    let order: Vec<_> = board.iter().map(|e| e.user_id.as_str()).collect();
    // sprinter: 100 + 160, duelist: 100 + 30
    assert_eq!(order, vec!["legend", "sprinter", "duelist", "rookie"]);
    assert_eq!(board[0].tier, RankTier::Legends);
    assert_eq!(board[3].tier, RankTier::Bronze);

    let sprinter = service.leaderboard_stats("sprinter").await.unwrap();
    assert_eq!(sprinter.best_time_mode, 60);
    assert_eq!(sprinter.best_position, 2);

    let duelist = service.player_rank("duelist").await.unwrap();
    assert_eq!(duelist.stats.duel_wins, 2);
    assert_eq!(duelist.stats.best_position, 3);
    assert_eq!(duelist.result.tier, RankTier::Silver);
}
