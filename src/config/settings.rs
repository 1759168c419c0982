use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

use crate::scoring::{RankWeights, TierThresholds};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub scoring: ScoringSettings,
    pub database: DatabaseSettings,
    pub tui: TuiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub weights: RankWeights,
    pub thresholds: TierThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiSettings {
    pub tick_rate_ms: u64,
    pub leaderboard_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Flag Rank".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
                environment: Environment::Development,
            },
            scoring: ScoringSettings::default(),
            database: DatabaseSettings {
                url: "sqlite://flag_rank.db".to_string(),
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 30,
            },
            tui: TuiSettings {
                tick_rate_ms: 250,
                leaderboard_limit: 100,
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir("config")
    }

    /// Defaults, then optional `default` and `local` files in `dir`, then the environment.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join("local")).required(false))
            .add_source(config::Environment::with_prefix("FLAG_RANK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scoring.weights.validate()?;
        self.scoring.thresholds.validate()?;

        if self.database.max_connections == 0 {
            return Err("database.max_connections must be at least 1".to_string());
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(format!(
                "database.min_connections ({}) exceeds max_connections ({})",
                self.database.min_connections, self.database.max_connections
            ));
        }

        if self.tui.tick_rate_ms == 0 {
            return Err("tui.tick_rate_ms must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_pool_rejected() {
        let mut settings = Settings::default();
        settings.database.min_connections = 10;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_config_dir_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("flag_rank_no_config_{}", std::process::id()));
        let settings = Settings::from_dir(&dir).unwrap();

        assert_eq!(settings.scoring.weights.streak, 10.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("flag_rank_bad_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("default.toml"), "[scoring.weights\nstreak = = 3").unwrap();

        let result = Settings::from_dir(&dir);
        std::fs::remove_dir_all(&dir).ok();

        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("flag_rank_settings_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[scoring.weights]\nstreak = 12.5\n\n[scoring.thresholds]\nlegends = 2500.0").unwrap();
        drop(file);

        let settings = Settings::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.scoring.weights.streak, 12.5);
        assert_eq!(settings.scoring.weights.duel_win, 15.0);
        assert_eq!(settings.scoring.thresholds.legends, 2500.0);
        assert!(settings.validate().is_ok());
    }
}
