//! SQLite implementations of the domain repository traits.

mod sqlite_hackathon_repository;
mod sqlite_repo_config_repository;
mod sqlite_stats_repository;

pub use sqlite_hackathon_repository::SqliteHackathonRepository;
pub use sqlite_repo_config_repository::SqliteRepoConfigRepository;
pub use sqlite_stats_repository::SqliteStatsRepository;
