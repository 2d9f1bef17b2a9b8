//! Chorus Storage
//!
//! `SQLite` database layer for the Chorus backend.
//!
//! This crate provides persistent storage for albums, songs, playlists,
//! users, likes and collaborations.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each entity owns its own queries and row mapping
//! - **Plain Queries**: Parameterized `sqlx::query` calls, no ORM layer
//! - **Constraint Backstop**: Uniqueness rules live in the schema; slices map
//!   violations to `ChorusError::Conflict`
//!
//! # Example
//!
//! ```rust,no_run
//! use chorus_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://chorus.db").await?;
//! run_migrations(&pool).await?;
//!
//! let albums = chorus_storage::albums::get_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

mod database;

// Vertical slices
pub mod activities;
pub mod albums;
pub mod authentications;
pub mod collaborations;
pub mod likes;
pub mod playlists;
pub mod songs;
pub mod users;

pub use database::Database;

use chorus_core::ChorusError;
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://chorus.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("SQLite pool ready");

    Ok(pool)
}

/// Map a unique-index violation to `Conflict`, everything else to `Database`.
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> ChorusError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            ChorusError::conflict(message)
        }
        other => other.into(),
    }
}
