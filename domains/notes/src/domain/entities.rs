//! Domain entities for the Notes domain
//!
//! Notes are short free-text study notes. They are the grounding corpus for
//! quiz generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flashquiz_common::{Error, Result};

/// Maximum note length in characters, after trimming
pub const MAX_CONTENT_LENGTH: usize = 255;

/// Note entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Trim `raw` and check it is a storable note body.
    pub fn normalize_content(raw: &str) -> Result<String> {
        let content = raw.trim();
        if content.is_empty() {
            return Err(Error::Validation("content is required".to_string()));
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(Error::Validation(format!(
                "content cannot exceed {} characters",
                MAX_CONTENT_LENGTH
            )));
        }
        Ok(content.to_string())
    }

    /// Note ids are database sequence values and always positive.
    pub fn validate_id(id: i64) -> Result<()> {
        if id <= 0 {
            return Err(Error::Validation(format!("invalid note ID: {}", id)));
        }
        Ok(())
    }
}

/// A validated note that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub content: String,
}

impl NewNote {
    pub fn new(raw: &str) -> Result<Self> {
        Ok(Self {
            content: Note::normalize_content(raw)?,
        })
    }
}
