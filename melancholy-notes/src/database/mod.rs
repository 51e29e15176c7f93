//! Database module
//!
//! This module provides all database functionality including:
//! - Schema creation
//! - Model definitions
//! - Repository layer for CRUD operations

pub mod models;
pub mod repository;
pub mod schema;

pub use models::*;
pub use repository::Repository;
pub use schema::initialize_database;

use crate::config::BUSY_TIMEOUT;
use crate::error::Result;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::path::Path;

/// Build the options every store connection is opened with.
fn connect_options(db_path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT)
}

/// Make sure the database file and its table exist, then hand back a
/// repository bound to that file.
///
/// The repository keeps no connection open: each of its operations opens
/// the file, runs one statement and closes it again.
pub async fn open_store(db_path: &Path) -> Result<Repository> {
    tracing::info!("Opening note store at: {:?}", db_path);

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = connect_options(db_path);

    let mut conn = SqliteConnection::connect_with(&options).await?;
    initialize_database(&mut conn).await?;
    conn.close().await?;

    tracing::info!("Note store ready");

    Ok(Repository::new(options))
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_store_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("nested").join("MelancholyNotes").join("notes.db");

        open_store(&db_path).await.unwrap();

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_open_store_under_a_file_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("MelancholyNotes");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = open_store(&blocker.join("notes.db")).await;

        assert!(matches!(result, Err(crate::error::AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_open_store_twice_keeps_data() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("notes.db");

        let repo = open_store(&db_path).await.unwrap();
        repo.create_note(CreateNoteRequest {
            title: "Kept".to_string(),
            content: String::new(),
        })
        .await
        .unwrap();

        let reopened = open_store(&db_path).await.unwrap();
        let notes = reopened.list_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Kept");
    }
}
