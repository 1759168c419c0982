use std::cmp::Ordering;

use crate::{
    models::{LeaderboardEntry, LeaderboardStats, PlayerProfile},
    scoring::RankScoreCalculator,
};

/// 1-based position of `score` among `others`: one plus the number of strictly
/// higher scores. Equal scores share a position.
pub fn position_for_score<I>(score: f64, others: I) -> u32
where
    I: IntoIterator<Item = f64>,
{
    let ahead = others.into_iter().filter(|other| *other > score).count();
    (ahead as u32).saturating_add(1)
}

/// Best position of `user_id` among `standings`, scoring each player with `calculator`.
///
/// Returns `None` when `user_id` is not part of `standings`.
pub fn best_position(
    calculator: &RankScoreCalculator,
    user_id: &str,
    standings: &[(PlayerProfile, LeaderboardStats)],
) -> Option<u32> {
    let (profile, stats) = standings.iter().find(|(p, _)| p.id == user_id)?;
    let own = calculator.calculate_rank_score(stats, profile.level);

    let others = standings
        .iter()
        .filter(|(p, _)| p.id != user_id)
        .map(|(p, s)| calculator.calculate_rank_score(s, p.level));

    Some(position_for_score(own, others))
}

/// Every player sorted by descending score. Ties keep the same position and are
/// ordered by username, then id.
pub fn build_leaderboard(
    calculator: &RankScoreCalculator,
    standings: &[(PlayerProfile, LeaderboardStats)],
) -> Vec<LeaderboardEntry> {
    let mut scored: Vec<(&PlayerProfile, f64)> = standings
        .iter()
        .map(|(p, s)| (p, calculator.calculate_rank_score(s, p.level)))
        .collect();

    scored.sort_by(|(a, a_score), (b, b_score)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.username.cmp(&b.username))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut entries = Vec::with_capacity(scored.len());
    let mut position = 1;
    let mut previous: Option<f64> = None;

    for (idx, (profile, score)) in scored.into_iter().enumerate() {
        if previous.map_or(true, |prev| score < prev) {
            position = idx as u32 + 1;
        }
        previous = Some(score);

        entries.push(LeaderboardEntry {
            position,
            user_id: profile.id.clone(),
            username: profile.username.clone(),
            level: profile.level,
            score,
            tier: calculator.calculate_rank(score, profile.level).tier,
        });
    }

    entries
}
