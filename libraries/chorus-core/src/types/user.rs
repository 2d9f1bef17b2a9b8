/// User domain type
use super::UserId;
use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login name, unique across users
    pub username: String,

    /// Display name
    pub fullname: String,
}

/// Data for registering a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
}
