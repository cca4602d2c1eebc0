//! Domain entities for the Flashcards domain
//!
//! A flashcard is a single short prompt/answer text the user reviews. Content
//! rules match notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flashquiz_common::{Error, Result};

/// Maximum flashcard length in characters, after trimming
pub const MAX_CONTENT_LENGTH: usize = 255;

/// Flashcard entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Flashcard {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    /// Trim `raw` and check it is a storable flashcard body.
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

    /// Flashcard ids are database sequence values and always positive.
    pub fn validate_id(id: i64) -> Result<()> {
        if id <= 0 {
            return Err(Error::Validation(format!("invalid flashcard ID: {}", id)));
        }
        Ok(())
    }
}

/// A validated flashcard that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewFlashcard {
    pub content: String,
}

impl NewFlashcard {
    pub fn new(raw: &str) -> Result<Self> {
        Ok(Self {
            content: Flashcard::normalize_content(raw)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_flashcard_trims_content() {
        let flashcard = NewFlashcard::new("\tATP: adenosine triphosphate  ").unwrap();
        assert_eq!(flashcard.content, "ATP: adenosine triphosphate");
    }

    #[test]
    fn test_new_flashcard_rejects_blank() {
        let err = NewFlashcard::new("   \t\n").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: content is required");
    }

    #[test]
    fn test_content_at_limit_is_accepted() {
        let content = "a".repeat(MAX_CONTENT_LENGTH);
        assert_eq!(Flashcard::normalize_content(&content).unwrap(), content);
    }

    #[test]
    fn test_content_over_limit_is_rejected() {
        let err = Flashcard::normalize_content(&"a".repeat(MAX_CONTENT_LENGTH + 1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: content cannot exceed 255 characters"
        );
    }

    #[test]
    fn test_surrounding_whitespace_does_not_count() {
        let content = format!("  {}  ", "b".repeat(MAX_CONTENT_LENGTH));
        assert!(Flashcard::normalize_content(&content).is_ok());
    }

    #[test]
    fn test_validate_id() {
        assert!(Flashcard::validate_id(1).is_ok());
        assert!(Flashcard::validate_id(0).is_err());
        assert_eq!(
            Flashcard::validate_id(-3).unwrap_err().to_string(),
            "Validation error: invalid flashcard ID: -3"
        );
    }
}
