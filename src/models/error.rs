use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankError {
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Invalid game mode: {0}")]
    InvalidGameMode(String),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RankError>;
