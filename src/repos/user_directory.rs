/*
 * Responsibility
 * - UserDirectory: the lookup/insert seam the auth layers talk to
 * - UserRecord / NewUser / Role shapes shared across services
 * - InMemoryUserDirectory: process-local implementation behind the trait
 */
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

/// Coarse authorization role stored on accounts and embedded in session
/// tokens. Serialized uppercase on the wire ("USER" / "ADMIN").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

/// A stored account.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied at signup; id and created_at are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub nickname: String,
    pub password_hash: String,
    pub role: Role,
}

/// Account lookup and insertion.
///
/// `find_by_email` returns `Ok(None)` for an unknown subject; callers decide
/// whether that is an error. `insert` enforces email and nickname uniqueness.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>>;

    async fn insert(&self, new_user: NewUser) -> RepoResult<UserRecord>;
}

/// Process-local directory keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> RepoResult<UserRecord> {
        // One write lock across check-then-insert, so concurrent signups
        // cannot both pass the uniqueness checks.
        let mut users = self.users.write().await;

        if users.contains_key(&new_user.email) {
            return Err(RepoError::DuplicateEmail);
        }
        if users.values().any(|u| u.nickname == new_user.nickname) {
            return Err(RepoError::DuplicateNickname);
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            email: new_user.email.clone(),
            nickname: new_user.nickname,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: Utc::now(),
        };

        users.insert(new_user.email, record.clone());
        Ok(record)
    }
}
