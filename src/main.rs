use clap::{Parser, Subcommand};
use flag_rank::{
    config::Settings,
    demo,
    models::{GameMode, LeaderboardStats, PlayerImport, RankError, RankTier, RawStats, ScoreRecord},
    scoring::{RankScoreCalculator, StandingsService},
    storage::{InMemoryStatsRepository, SqliteStatsRepository, StatsRepository},
};
use rand::{rngs::StdRng, SeedableRng};
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod tui_main;

#[derive(Parser)]
#[clap(name = "flag-rank")]
#[clap(about = "Rank scores and tiers for flag quiz players", long_about = None)]
struct Cli {
    /// Settings file to load instead of config/default + config/local
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Database URL, overrides database.url
    #[clap(long, global = true)]
    database: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a set of stats without touching the database
    Score {
        #[clap(long, default_value = "0")]
        streak: f64,

        /// Best timed-mode run in seconds (0 or 9999 = none)
        #[clap(long, default_value = "0")]
        time: f64,

        #[clap(long, default_value = "0")]
        duels: f64,

        #[clap(long, default_value = "0")]
        level: f64,

        #[clap(long)]
        json: bool,
    },

    /// Import players and results from a JSON file
    Import {
        file: PathBuf,
    },

    /// Insert random demo players
    Seed {
        #[clap(short, long, default_value = "25")]
        players: usize,

        /// RNG seed for reproducible data
        #[clap(long)]
        seed: Option<u64>,
    },

    /// Record one game result for a player
    Record {
        user_id: String,

        /// streak, time_trial or duel
        mode: String,

        /// Streak length, seconds, or 1/0 for a duel win/loss
        value: i64,
    },

    /// Show a player's stats, rank and position
    Rank {
        user_id: String,

        #[clap(long)]
        json: bool,
    },

    /// Print the leaderboard
    Leaderboard {
        #[clap(short, long, default_value = "20")]
        limit: usize,

        /// Only list players in this tier (bronze ... legends)
        #[clap(long)]
        tier: Option<String>,

        #[clap(long)]
        json: bool,
    },

    /// Launch the interactive leaderboard
    Tui {
        /// Browse N random players in memory instead of the database
        #[clap(long)]
        demo: Option<usize>,
    },
}

fn init_logging(settings: &Settings, quiet: bool) {
    if quiet {
        // Output would corrupt the terminal UI.
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter(EnvFilter::new("off"))
            .try_init();
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        // Missing config files are optional; unreadable ones are errors.
        None => Settings::new()?,
    };

    if let Some(url) = &cli.database {
        settings.database.url = url.clone();
    }

    settings.validate().map_err(|e| anyhow::anyhow!(RankError::ConfigError(e)))?;
    Ok(settings)
}

fn calculator(settings: &Settings) -> RankScoreCalculator {
    RankScoreCalculator::new(
        settings.scoring.weights.clone(),
        settings.scoring.thresholds.clone(),
    )
}

async fn sqlite_service(settings: &Settings) -> anyhow::Result<StandingsService> {
    let repository = SqliteStatsRepository::connect(&settings.database).await?;
    Ok(StandingsService::new(Arc::new(repository), calculator(settings)))
}

fn seed_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    init_logging(&settings, matches!(cli.command, Commands::Tui { .. }));

    match cli.command {
        Commands::Score { streak, time, duels, level, json } => {
            let raw = RawStats {
                best_streak: Some(streak),
                best_time_mode: Some(time),
                duel_wins: Some(duels),
                best_position: None,
                level: Some(level),
            };

            let calculator = calculator(&settings);
            let (stats, level) = raw.sanitize();
            let breakdown = calculator.calculate_breakdown(&stats, level);
            let result = calculator.rank_stats(&stats, level);

            if json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                    "stats": stats,
                    "level": level,
                    "breakdown": breakdown,
                    "result": result,
                }))?);
            } else {
                println!("\n=== Rank Score ===");
                println!("Score: {:.2}", result.score);
                println!("Tier:  {} ({})", result.tier, result.badge);
                println!("\nBreakdown:");
                println!("  Streak:    {:.2}", breakdown.streak_score);
                println!("  Timed run: {:.2}", breakdown.time_score);
                println!("  Duels:     {:.2}", breakdown.duel_score);
                println!("  Level:     {:.2}", breakdown.level_score);
                if let (Some(next), Some(points)) = (result.next_tier, result.points_to_next) {
                    println!("\n{:.2} points to {}", points, next);
                }
            }
        }

        Commands::Import { file } => {
            let data = std::fs::read_to_string(&file).map_err(RankError::from)?;
            let players: Vec<PlayerImport> = serde_json::from_str(&data).map_err(RankError::from)?;
            info!("Read {} players from {}", players.len(), file.display());

            let service = sqlite_service(&settings).await?;
            let imported = service.import_players(&players).await?;
            println!("Imported {} players", imported);
        }

        Commands::Seed { players, seed } => {
            let demo_players = demo::demo_players(players, &mut seed_rng(seed));
            let service = sqlite_service(&settings).await?;
            let imported = service.import_players(&demo_players).await?;
            println!("Seeded {} demo players", imported);
        }

        Commands::Record { user_id, mode, value } => {
            let mode = GameMode::parse(&mode)?;
            let service = sqlite_service(&settings).await?;
            service.record_result(&ScoreRecord::new(user_id.clone(), mode, value)).await?;
            println!("Recorded {} = {} for {}", mode.as_str(), value, user_id);
        }

        Commands::Rank { user_id, json } => {
            let service = sqlite_service(&settings).await?;
            let ranked = match service.player_rank(&user_id).await {
                Ok(ranked) => ranked,
                Err(RankError::PlayerNotFound(id)) => {
                    warn!("No player with id {}", id);
                    return Err(RankError::PlayerNotFound(id).into());
                }
                Err(e) => {
                    error!("Failed to rank {}: {}", user_id, e);
                    return Err(e.into());
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                print_ranked(&ranked.profile.username, &ranked.stats, ranked.profile.level, &ranked.result);
            }
        }

        Commands::Leaderboard { limit, tier, json } => {
            let tier = tier
                .map(|name| {
                    RankTier::from_str(&name).ok_or_else(|| anyhow::anyhow!("Unknown tier: {}", name))
                })
                .transpose()?;

            let service = sqlite_service(&settings).await?;
            let entries = service.tier_leaderboard(tier, Some(limit)).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No players yet");
            } else {
                println!("{:>4}  {:<20} {:>5} {:>9}  {}", "Pos", "Player", "Level", "Score", "Tier");
                for entry in entries {
                    println!(
                        "{:>4}  {:<20} {:>5} {:>9.1}  {}",
                        entry.position, entry.username, entry.level, entry.score, entry.tier
                    );
                }
            }
        }

        Commands::Tui { demo } => {
            let repository: Arc<dyn StatsRepository> = match demo {
                Some(count) => {
                    let repository = Arc::new(InMemoryStatsRepository::new());
                    let service = StandingsService::new(repository.clone(), calculator(&settings));
                    service.import_players(&demo::demo_players(count, &mut seed_rng(None))).await?;
                    repository as Arc<dyn StatsRepository>
                }
                None => Arc::new(SqliteStatsRepository::connect(&settings.database).await?),
            };

            let service = Arc::new(StandingsService::new(repository, calculator(&settings)));
            tui_main::run_tui(service, settings.tui.clone()).await?;
        }
    }

    Ok(())
}

fn print_ranked(
    username: &str,
    stats: &LeaderboardStats,
    level: u32,
    result: &flag_rank::models::RankResult,
) {
    let time = stats
        .recorded_time()
        .map(|s| format!("{}s", s))
        .unwrap_or_else(|| "-".to_string());

    println!("\n=== {} ===", username);
    println!("Tier:        {} ({})", result.tier, result.badge);
    println!("Rank score:  {:.2}", result.score);
    println!("Position:    #{}", stats.best_position);
    println!("Level:       {}", level);
    println!("Best streak: {}", stats.best_streak);
    println!("Best timed:  {}", time);
    println!("Duel wins:   {}", stats.duel_wins);
}
