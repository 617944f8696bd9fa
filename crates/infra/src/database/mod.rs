//! Relational record store

pub mod doctor_repository;
pub mod manager;
pub mod sqlite_pool;
pub mod user_repository;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;

pub use doctor_repository::SqliteDoctorRepository;
pub use manager::DbManager;
pub use sqlite_pool::{create_sqlite_pool, SqliteConnection, SqlitePool, SqlitePoolConfig};
pub use user_repository::SqliteUserRepository;

// Timestamps are stored as RFC 3339 text with millisecond precision, so
// records are created with the precision they will be read back with.
fn created_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err)))
}
