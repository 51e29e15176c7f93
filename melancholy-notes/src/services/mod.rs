//! Services module
//!
//! Business logic services that coordinate between the presentation layer
//! and the repository.

pub mod notes;
pub mod workspace;

pub use notes::{search_notes, NotesService};
pub use workspace::{Draft, Workspace};
