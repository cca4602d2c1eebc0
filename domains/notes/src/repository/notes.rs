//! Note repository

use crate::domain::entities::{NewNote, Note};
use flashquiz_common::RepositoryError;
use sqlx::PgPool;

type RepoResult<T> = std::result::Result<T, RepositoryError>;

const ENTITY: &str = "note";

/// All columns in the notes table, used for SELECT and RETURNING clauses.
const NOTE_COLUMNS: &str = "id, content, created_at, updated_at";

#[derive(Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every note, newest first
    pub async fn list_all(&self) -> RepoResult<Vec<Note>> {
        let query =
            format!("SELECT {NOTE_COLUMNS} FROM notes.notes ORDER BY created_at DESC, id DESC");
        let notes = sqlx::query_as::<_, Note>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(notes)
    }

    /// Find note by ID
    pub async fn find(&self, id: i64) -> RepoResult<Option<Note>> {
        let query = format!("SELECT {NOTE_COLUMNS} FROM notes.notes WHERE id = $1");
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(note)
    }

    /// Get note by ID, failing with `NotFound` when it does not exist
    pub async fn get(&self, id: i64) -> RepoResult<Note> {
        self.find(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))
    }

    /// Insert a note; id and timestamps are assigned by the database
    pub async fn create(&self, note: &NewNote) -> RepoResult<Note> {
        let query =
            format!("INSERT INTO notes.notes (content) VALUES ($1) RETURNING {NOTE_COLUMNS}");
        let created = sqlx::query_as::<_, Note>(&query)
            .bind(&note.content)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Replace note content and bump `updated_at`
    pub async fn update_content(&self, id: i64, content: &str) -> RepoResult<Note> {
        let query = format!(
            "UPDATE notes.notes SET content = $1, updated_at = NOW() \
             WHERE id = $2 RETURNING {NOTE_COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(content)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))
    }

    /// Delete a note
    pub async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM notes.notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}
