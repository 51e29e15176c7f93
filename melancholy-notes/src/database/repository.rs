//! Repository layer for database operations
//!
//! This module provides CRUD operations over the `Notes` table.
//! Each operation opens the database file, runs its statements and
//! closes the connection before returning.

use super::models::*;
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};

/// Column list shared by every query that returns notes. `Content` is
/// nullable in the table but always empty-or-text in the model.
const NOTE_COLUMNS: &str =
    "Id, Title, COALESCE(Content, '') AS Content, CreatedDate, ModifiedDate";

/// Repository for database operations
#[derive(Clone, Debug)]
pub struct Repository {
    options: SqliteConnectOptions,
}

impl Repository {
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }

    /// Create a new note
    pub async fn create_note(&self, req: CreateNoteRequest) -> Result<Note> {
        let now = format_timestamp(&now());
        let title = normalize_title(&req.title);

        let mut conn = self.connect().await?;
        let note = sqlx::query_as::<_, Note>(&format!(
            r#"
            INSERT INTO Notes (Title, Content, CreatedDate, ModifiedDate)
            VALUES (?, ?, ?, ?)
            RETURNING {NOTE_COLUMNS}
            "#
        ))
        .bind(&title)
        .bind(&req.content)
        .bind(&now)
        .bind(&now)
        .fetch_one(&mut conn)
        .await?;
        conn.close().await?;

        tracing::debug!("Created note: {}", note.id);
        Ok(note)
    }

    /// Get a note by ID
    pub async fn get_note(&self, id: i64) -> Result<Option<Note>> {
        let mut conn = self.connect().await?;
        let note = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM Notes WHERE Id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        Ok(note)
    }

    /// List all notes, most recently modified first
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let mut conn = self.connect().await?;
        let mut notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM Notes ORDER BY Id DESC"
        ))
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        // Stored timestamps may carry any UTC offset, so order on the
        // decoded instant rather than the column text
        sort_newest_first(&mut notes);

        Ok(notes)
    }

    /// Overwrite a note's title and content and bump its modification time.
    ///
    /// Returns `None` when no note has the given id; nothing is written in
    /// that case.
    pub async fn update_note(&self, req: UpdateNoteRequest) -> Result<Option<Note>> {
        let title = normalize_title(&req.title);

        let mut conn = self.connect().await?;
        let created_at: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT CreatedDate FROM Notes WHERE Id = ?")
                .bind(req.id)
                .fetch_optional(&mut conn)
                .await?;

        let Some(created_at) = created_at else {
            conn.close().await?;
            tracing::debug!("Update matched no note: {}", req.id);
            return Ok(None);
        };

        // A clock that stepped back must not put ModifiedDate before CreatedDate
        let now = now();
        let modified_at = if now >= created_at {
            format_timestamp(&now)
        } else {
            created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        };

        let note = sqlx::query_as::<_, Note>(&format!(
            r#"
            UPDATE Notes
            SET Title = ?, Content = ?, ModifiedDate = ?
            WHERE Id = ?
            RETURNING {NOTE_COLUMNS}
            "#
        ))
        .bind(&title)
        .bind(&req.content)
        .bind(&modified_at)
        .bind(req.id)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        match &note {
            Some(_) => tracing::debug!("Updated note: {}", req.id),
            None => tracing::debug!("Update matched no note: {}", req.id),
        }
        Ok(note)
    }

    /// Delete a note. Returns whether a row was removed.
    pub async fn delete_note(&self, id: i64) -> Result<bool> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query("DELETE FROM Notes WHERE Id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?
            .rows_affected();
        conn.close().await?;

        tracing::debug!("Deleted note: {} ({} row(s))", id, rows);
        Ok(rows > 0)
    }
}
