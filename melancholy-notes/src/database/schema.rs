//! Database schema
//!
//! The store has a single table and no migration history: the table is
//! created when missing and otherwise left alone.

use crate::error::Result;
use sqlx::SqliteConnection;

const CREATE_NOTES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Notes (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Title TEXT NOT NULL,
        Content TEXT,
        CreatedDate TEXT NOT NULL,
        ModifiedDate TEXT NOT NULL
    )
"#;

/// Create the `Notes` table if it does not exist yet. Safe to call on every
/// startup.
pub async fn initialize_database(conn: &mut SqliteConnection) -> Result<()> {
    tracing::info!("Initializing database schema");

    sqlx::query(CREATE_NOTES_TABLE).execute(&mut *conn).await?;

    tracing::info!("Database initialization complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Connection;

    #[tokio::test]
    async fn test_initialize_database() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();

        initialize_database(&mut conn).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Notes")
            .fetch_one(&mut conn)
            .await
            .unwrap();

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();

        initialize_database(&mut conn).await.unwrap();
        sqlx::query(
            "INSERT INTO Notes (Title, Content, CreatedDate, ModifiedDate) VALUES ('a', 'b', 'c', 'd')",
        )
        .execute(&mut conn)
        .await
        .unwrap();

        initialize_database(&mut conn).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Notes")
            .fetch_one(&mut conn)
            .await
            .unwrap();

        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_columns_match_layout() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        initialize_database(&mut conn).await.unwrap();

        let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('Notes')")
            .fetch_all(&mut conn)
            .await
            .unwrap();

        assert_eq!(
            columns,
            vec!["Id", "Title", "Content", "CreatedDate", "ModifiedDate"]
        );
    }
}
