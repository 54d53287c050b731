/*
 * Responsibility
 * - Signup: uniqueness via the directory, password hashing, USER role
 * - Login: credential check; all failures collapse to InvalidCredentials
 */
use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::error::AppError;
use crate::repos::error::RepoError;
use crate::repos::user_directory::{NewUser, Role, UserDirectory, UserRecord};
use crate::services::auth::password;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// Unknown email and wrong password collapse into this one variant so a
    /// login response cannot reveal which check failed.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password hashing failed")]
    Hash(#[source] password_hash::Error),
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::Repo(repo) => repo.into(),
            AccountError::InvalidCredentials => AppError::Unauthorized,
            AccountError::Hash(_) => AppError::Internal,
        }
    }
}

/// Signup and login against the user directory.
pub struct AccountService {
    users: Arc<dyn UserDirectory>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// Register a new account. Every signup gets the USER role.
    pub async fn sign_up(
        &self,
        email: &str,
        nickname: &str,
        password: &str,
    ) -> Result<UserRecord, AccountError> {
        let password_hash = password::hash_password(password).map_err(|e| {
            error!(error = %e, "password hashing failed");
            AccountError::Hash(e)
        })?;

        let record = self
            .users
            .insert(NewUser {
                email: email.to_string(),
                nickname: nickname.to_string(),
                password_hash,
                role: Role::User,
            })
            .await?;

        Ok(record)
    }

    /// Check credentials and return the matching account.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord, AccountError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }
}
