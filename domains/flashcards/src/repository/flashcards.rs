//! Flashcard repository

use crate::domain::entities::{Flashcard, NewFlashcard};
use flashquiz_common::RepositoryError;
use sqlx::PgPool;

type RepoResult<T> = std::result::Result<T, RepositoryError>;

const ENTITY: &str = "flashcard";

/// All columns in the flashcards table, used for SELECT and RETURNING clauses.
const FLASHCARD_COLUMNS: &str = "id, content, created_at, updated_at";

#[derive(Clone)]
pub struct FlashcardRepository {
    pool: PgPool,
}

impl FlashcardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every flashcard, newest first
    pub async fn list_all(&self) -> RepoResult<Vec<Flashcard>> {
        let query = format!(
            "SELECT {FLASHCARD_COLUMNS} FROM flashcards.flashcards \
             ORDER BY created_at DESC, id DESC"
        );
        let flashcards = sqlx::query_as::<_, Flashcard>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(flashcards)
    }

    /// Find flashcard by ID
    pub async fn find(&self, id: i64) -> RepoResult<Option<Flashcard>> {
        let query =
            format!("SELECT {FLASHCARD_COLUMNS} FROM flashcards.flashcards WHERE id = $1");
        let flashcard = sqlx::query_as::<_, Flashcard>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(flashcard)
    }

    /// Get flashcard by ID, failing with `NotFound` when it does not exist
    pub async fn get(&self, id: i64) -> RepoResult<Flashcard> {
        self.find(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))
    }

    /// Insert a flashcard; id and timestamps are assigned by the database
    pub async fn create(&self, flashcard: &NewFlashcard) -> RepoResult<Flashcard> {
        let query = format!(
            "INSERT INTO flashcards.flashcards (content) VALUES ($1) \
             RETURNING {FLASHCARD_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Flashcard>(&query)
            .bind(&flashcard.content)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Replace flashcard content and bump `updated_at`
    pub async fn update_content(&self, id: i64, content: &str) -> RepoResult<Flashcard> {
        let query = format!(
            "UPDATE flashcards.flashcards SET content = $1, updated_at = NOW() \
             WHERE id = $2 RETURNING {FLASHCARD_COLUMNS}"
        );
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(content)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))
    }

    /// Delete a flashcard
    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM flashcards.flashcards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}
