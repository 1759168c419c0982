pub mod repository;
pub mod sqlite;
pub mod memory;

pub use repository::StatsRepository;
pub use sqlite::SqliteStatsRepository;
pub use memory::InMemoryStatsRepository;

#[cfg(test)]
pub use repository::MockStatsRepository;
