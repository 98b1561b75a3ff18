//! Repository Module
//!
//! Provides CRUD operations for the SQLite tables. Each repository is a set of
//! free functions taking the pool; services own the pool and call them.

pub mod dish;
pub mod order;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // 唯一索引兜底：并发写入绕过了先查后插的检查
            sqlx::Error::Database(e) if e.is_unique_violation() => {
                RepoError::Duplicate(e.message().to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Database(format!("JSON column error: {err}"))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
