/// User service - registration and credential checks
use crate::{
    error::{Result, ServerError},
    services::AuthService,
};
use chorus_core::{
    types::{NewUser, User, UserId},
    ChorusError,
};
use chorus_storage::{users, Database};
use std::sync::Arc;

const WRONG_CREDENTIALS: &str = "The credentials you provided are wrong";

#[derive(Debug, Clone)]
pub struct UserService {
    db: Arc<Database>,
    auth_service: Arc<AuthService>,
}

impl UserService {
    pub fn new(db: Arc<Database>, auth_service: Arc<AuthService>) -> Self {
        Self { db, auth_service }
    }

    pub async fn register(&self, username: &str, password: &str, fullname: &str) -> Result<UserId> {
        let pool = self.db.pool();

        if users::username_taken(pool, username).await? {
            return Err(ChorusError::conflict("Username is already taken").into());
        }

        let password_hash = self.auth_service.hash_password(password)?;
        let user_id = users::create(
            pool,
            &NewUser {
                username: username.to_string(),
                password_hash,
                fullname: fullname.to_string(),
            },
        )
        .await?;

        tracing::info!(user = %user_id, username, "User registered");
        Ok(user_id)
    }

    /// Check a username/password pair, returning the user it belongs to
    pub async fn verify_credential(&self, username: &str, password: &str) -> Result<UserId> {
        let (user_id, password_hash) = users::get_credentials(self.db.pool(), username)
            .await?
            .ok_or_else(|| ServerError::Auth(WRONG_CREDENTIALS.to_string()))?;

        if !self.auth_service.verify_password(password, &password_hash)? {
            return Err(ServerError::Auth(WRONG_CREDENTIALS.to_string()));
        }

        Ok(user_id)
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        users::get_by_id(self.db.pool(), id)
            .await?
            .ok_or_else(|| ChorusError::not_found("User", id.as_str()).into())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(self.db.pool()).await?)
    }
}
