use rand::Rng;

use crate::models::{GameMode, ImportedScore, PlayerImport, TIME_UNSET_LEGACY};

const NAMES: &[&str] = &[
    "andorra", "brazil", "chile", "denmark", "estonia", "fiji", "ghana", "haiti",
    "iceland", "japan", "kenya", "laos", "malta", "nepal", "oman", "peru",
    "qatar", "rwanda", "samoa", "togo", "uganda", "vanuatu", "wales", "yemen", "zambia",
];

/// Random players with plausible results, including sentinel rows.
pub fn demo_players<R: Rng>(count: usize, rng: &mut R) -> Vec<PlayerImport> {
    (0..count)
        .map(|i| {
            let name = NAMES[i % NAMES.len()];
            let level = rng.gen_range(0..=120);

            let mut scores = Vec::new();

            for _ in 0..rng.gen_range(0..6) {
                scores.push(ImportedScore { mode: GameMode::Streak, value: rng.gen_range(1..=120) });
            }

            for _ in 0..rng.gen_range(0..4) {
                // Some clients still write 9999 for abandoned timed runs.
                let value = if rng.gen_bool(0.2) {
                    TIME_UNSET_LEGACY as i64
                } else {
                    rng.gen_range(15..=400)
                };
                scores.push(ImportedScore { mode: GameMode::TimeTrial, value });
            }

            for _ in 0..rng.gen_range(0..30) {
                scores.push(ImportedScore { mode: GameMode::Duel, value: rng.gen_range(0..=1) });
            }

            PlayerImport {
                id: format!("demo-{:04}", i + 1),
                username: format!("{}_{}", name, i / NAMES.len() + 1),
                level,
                xp: level as u64 * 250 + rng.gen_range(0..250),
                scores,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_demo_players_are_unique_and_reproducible() {
        let a = demo_players(60, &mut StdRng::seed_from_u64(7));
        let b = demo_players(60, &mut StdRng::seed_from_u64(7));

        let mut ids: Vec<_> = a.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 60);

        let levels_a: Vec<_> = a.iter().map(|p| p.level).collect();
        let levels_b: Vec<_> = b.iter().map(|p| p.level).collect();
        assert_eq!(levels_a, levels_b);
    }
}
