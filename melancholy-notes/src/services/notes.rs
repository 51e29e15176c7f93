//! Notes service
//!
//! High-level operations the presentation layer calls.
//! Handles note lifecycle logging and in-memory search.

use crate::config::NEW_NOTE_TITLE;
use crate::database::{CreateNoteRequest, Note, Repository, UpdateNoteRequest};
use crate::error::Result;

/// Service for managing notes
#[derive(Clone, Debug)]
pub struct NotesService {
    repo: Repository,
}

impl NotesService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a new note
    pub async fn create_note(&self, title: String, content: String) -> Result<Note> {
        tracing::info!("Creating new note: {}", title);

        let note = self
            .repo
            .create_note(CreateNoteRequest { title, content })
            .await?;

        tracing::info!("Note created successfully: {}", note.id);

        Ok(note)
    }

    /// Create an empty note carrying the new-note placeholder title
    pub async fn new_note(&self) -> Result<Note> {
        self.create_note(NEW_NOTE_TITLE.to_string(), String::new())
            .await
    }

    /// Get a note by ID
    pub async fn get_note(&self, id: i64) -> Result<Option<Note>> {
        self.repo.get_note(id).await
    }

    /// List all notes
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        self.repo.list_notes().await
    }

    /// Save a note's title and content.
    ///
    /// A note that no longer exists is left alone and reported as `None`.
    pub async fn update_note(&self, id: i64, title: String, content: String) -> Result<Option<Note>> {
        tracing::debug!("Updating note: {}", id);

        let note = self
            .repo
            .update_note(UpdateNoteRequest { id, title, content })
            .await?;

        match &note {
            Some(note) => tracing::debug!("Note updated successfully: {}", note.id),
            None => tracing::warn!("Note {} no longer exists, nothing saved", id),
        }

        Ok(note)
    }

    /// Delete a note. Deleting a missing note is not an error.
    pub async fn delete_note(&self, id: i64) -> Result<bool> {
        tracing::info!("Deleting note: {}", id);

        let removed = self.repo.delete_note(id).await?;

        if removed {
            tracing::info!("Note deleted successfully: {}", id);
        } else {
            tracing::info!("Note {} was already gone", id);
        }

        Ok(removed)
    }
}

/// Filter `corpus` to notes whose title or content contains `query`,
/// ignoring case. A blank query keeps everything.
pub fn search_notes(query: &str, corpus: &[Note]) -> Vec<Note> {
    if query.trim().is_empty() {
        return corpus.to_vec();
    }

    let query_lower = query.to_lowercase();

    corpus
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&query_lower)
                || note.content.to_lowercase().contains(&query_lower)
        })
        .cloned()
        .collect()
}
