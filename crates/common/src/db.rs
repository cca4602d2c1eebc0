//! Shared database types for Flashquiz
//!
//! Repositories report missing rows with a typed variant so the HTTP layer can
//! map them to 404 without inspecting error text.

use crate::error::Error;
use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        RepositoryError::NotFound { entity, id }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Error::NotFound(err.to_string()),
            RepositoryError::Connection(e) => Error::Database(e),
        }
    }
}
