//! User accounts and credential lookup

use crate::conflict_on_unique;
use chorus_core::{error::Result, types::*, ChorusError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn map_user(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        fullname: row.get("fullname"),
    }
}

/// Insert a user; a taken username is a `Conflict`
pub async fn create(pool: &SqlitePool, user: &NewUser) -> Result<UserId> {
    let id = UserId::generate();

    let row = sqlx::query(
        "INSERT INTO users (id, username, password_hash, fullname)
         VALUES (?, ?, ?, ?)
         RETURNING id",
    )
    .bind(&id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.fullname)
    .fetch_optional(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "Username is already taken"))?;

    row.map(|row| row.get("id"))
        .ok_or_else(|| ChorusError::invariant("User could not be added"))
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, fullname FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(map_user).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, fullname FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(map_user))
}

pub async fn exists(pool: &SqlitePool, id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn username_taken(pool: &SqlitePool, username: &str) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Get the id and password hash stored for a username
pub async fn get_credentials(pool: &SqlitePool, username: &str) -> Result<Option<(UserId, String)>> {
    let row = sqlx::query("SELECT id, password_hash FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| (row.get("id"), row.get("password_hash"))))
}
