/// Database handle shared by the services
use sqlx::SqlitePool;

/// A migrated `SQLite` pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and bring the schema up to date
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn connect(database_url: &str) -> chorus_core::Result<Self> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool)
            .await
            .map_err(|e| chorus_core::ChorusError::Database(format!("Migration failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
