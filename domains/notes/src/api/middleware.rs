//! Notes domain state

use crate::NoteRepository;

/// Application state for the Notes domain
#[derive(Clone)]
pub struct NotesState {
    pub notes: NoteRepository,
}
