//! Workspace service
//!
//! In-memory state behind the note list and editor: a cached copy of the
//! note list, the current search filter, and an editor draft for the
//! selected note. The cache only changes after the store has accepted the
//! matching write, so a failed operation leaves it untouched.

use super::notes::{search_notes, NotesService};
use crate::database::Note;
use crate::error::Result;
use serde::Serialize;

/// Editor buffer for the currently selected note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    id: i64,
    title: String,
    content: String,
    dirty: bool,
}

impl Draft {
    /// Populate a draft from stored data. This is the programmatic path:
    /// the result is never dirty.
    pub fn load(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            dirty: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the user has edited the draft since it was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[derive(Debug, Default)]
pub struct Workspace {
    notes: Vec<Note>,
    draft: Option<Draft>,
    query: String,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached list with the store's current contents.
    pub async fn load(&mut self, service: &NotesService) -> Result<()> {
        let notes = service.list_notes().await?;
        tracing::debug!("Loaded {} notes into workspace", notes.len());
        self.notes = notes;

        // Keep the draft only if its note survived the reload
        let survived = self
            .draft
            .as_ref()
            .map_or(true, |draft| self.notes.iter().any(|n| n.id == draft.id));
        if !survived {
            self.draft = None;
        }
        Ok(())
    }

    /// Every cached note, most recently modified first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Cached notes that match the current search query.
    pub fn visible(&self) -> Vec<Note> {
        search_notes(&self.query, &self.notes)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Persist a placeholder note, put it at the head of the list and select it.
    pub async fn new_note(&mut self, service: &NotesService) -> Result<Note> {
        let note = service.new_note().await?;
        self.notes.insert(0, note.clone());
        self.draft = Some(Draft::load(&note));
        Ok(note)
    }

    /// Select a cached note for editing. Returns `false` if the id is not
    /// in the cached list.
    pub fn select(&mut self, id: i64) -> bool {
        match self.notes.iter().find(|n| n.id == id) {
            Some(note) => {
                self.draft = Some(Draft::load(note));
                true
            }
            None => false,
        }
    }

    /// User edit of the title. Returns `false` when no note is selected.
    pub fn edit_title(&mut self, title: impl Into<String>) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.title = title.into();
                draft.dirty = true;
                true
            }
            None => false,
        }
    }

    /// User edit of the content. Returns `false` when no note is selected.
    pub fn edit_content(&mut self, content: impl Into<String>) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.content = content.into();
                draft.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Write the draft to the store and move the note to the head of the
    /// list.
    ///
    /// Returns the stored note, or `None` when nothing is selected or the
    /// note has vanished from the store (it is then dropped from the list).
    pub async fn save(&mut self, service: &NotesService) -> Result<Option<Note>> {
        let Some(draft) = &self.draft else {
            return Ok(None);
        };
        let id = draft.id;

        let saved = service
            .update_note(id, draft.title.clone(), draft.content.clone())
            .await?;

        self.notes.retain(|n| n.id != id);
        match &saved {
            Some(note) => {
                self.notes.insert(0, note.clone());
                self.draft = Some(Draft::load(note));
            }
            None => self.draft = None,
        }

        Ok(saved)
    }

    /// Delete the selected note from store and list. Returns `false` when
    /// nothing is selected.
    pub async fn delete_current(&mut self, service: &NotesService) -> Result<bool> {
        let Some(draft) = &self.draft else {
            return Ok(false);
        };
        let id = draft.id;

        service.delete_note(id).await?;

        self.notes.retain(|n| n.id != id);
        self.draft = None;
        Ok(true)
    }
}
