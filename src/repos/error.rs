/*
 * Responsibility
 * - The meanings a repo can report upward
 */
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("nickname already taken")]
    DuplicateNickname,
}

pub type RepoResult<T> = Result<T, RepoError>;
