//! Refresh tokens that are still honoured

use chorus_core::error::Result;
use sqlx::SqlitePool;

pub async fn add(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO authentications (token) VALUES (?)")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn exists(pool: &SqlitePool, token: &str) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM authentications WHERE token = ?")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Returns `false` when the token was not stored
pub async fn delete(pool: &SqlitePool, token: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM authentications WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
