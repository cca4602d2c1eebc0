//! Note corpus seam between the quiz engine and the note store

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use flashquiz_notes::NoteRepository;
use thiserror::Error;

/// The note store could not produce the corpus. Not classified further.
#[derive(Debug, Error)]
#[error("note corpus unavailable: {0}")]
pub struct CorpusError(pub String);

/// Read-only access to the full set of note contents
#[async_trait::async_trait]
pub trait NoteCorpus: Send + Sync {
    /// Every note's content, in the order the store returns them
    async fn list_contents(&self) -> Result<Vec<String>, CorpusError>;
}

#[async_trait::async_trait]
impl NoteCorpus for NoteRepository {
    async fn list_contents(&self) -> Result<Vec<String>, CorpusError> {
        let notes = self
            .list_all()
            .await
            .map_err(|e| CorpusError(e.to_string()))?;

        Ok(notes.into_iter().map(|note| note.content).collect())
    }
}

/// Fixed in-memory corpus, for tests and demo setups
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus {
    contents: Option<Vec<String>>,
    delay: Option<Duration>,
    fetches: Arc<AtomicUsize>,
}

impl StaticCorpus {
    pub fn new<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contents: Some(contents.into_iter().map(Into::into).collect()),
            delay: None,
            fetches: Arc::default(),
        }
    }

    /// A corpus whose every fetch fails
    pub fn unavailable() -> Self {
        Self {
            contents: None,
            delay: None,
            fetches: Arc::default(),
        }
    }

    /// Sleep for `delay` before answering each fetch
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl NoteCorpus for StaticCorpus {
    async fn list_contents(&self) -> Result<Vec<String>, CorpusError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.contents
            .clone()
            .ok_or_else(|| CorpusError("static corpus is marked unavailable".to_string()))
    }
}
