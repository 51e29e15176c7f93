//! Database models
//!
//! Rust structs representing the rows of the `Notes` table.
//! Models use serde for serialization to the presentation layer.

use crate::config::{EMPTY_PREVIEW, PREVIEW_CHARS, PREVIEW_ELLIPSIS, UNTITLED_TITLE};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A titled plain-text note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[sqlx(rename = "Id")]
    pub id: i64,
    #[sqlx(rename = "Title")]
    pub title: String,
    #[sqlx(rename = "Content")]
    pub content: String,
    #[sqlx(rename = "CreatedDate")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "ModifiedDate")]
    pub modified_at: DateTime<Utc>,
}

impl Note {
    /// Short display form of the content for list views.
    ///
    /// Cuts on character boundaries, never inside a multi-byte sequence.
    pub fn preview(&self) -> String {
        if self.content.trim().is_empty() {
            return EMPTY_PREVIEW.to_string();
        }

        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            format!("{}{}", head, PREVIEW_ELLIPSIS)
        } else {
            head
        }
    }
}

/// Create note request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Update note request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNoteRequest {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Title as it will be stored: blank input becomes the placeholder.
pub fn normalize_title(title: &str) -> String {
    if title.trim().is_empty() {
        UNTITLED_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Order notes most recently modified first; equal times keep the newer
/// id first.
pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        b.modified_at
            .cmp(&a.modified_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Current time at the resolution the store keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// RFC 3339 form, in UTC with microseconds, written to the
/// `CreatedDate`/`ModifiedDate` columns.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note_with_content(content: &str) -> Note {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        Note {
            id: 1,
            title: "Title".to_string(),
            content: content.to_string(),
            created_at: ts,
            modified_at: ts,
        }
    }

    #[test]
    fn test_preview_short_content_unchanged() {
        let note = note_with_content("milk, eggs");
        assert_eq!(note.preview(), "milk, eggs");
    }

    #[test]
    fn test_preview_blank_content() {
        assert_eq!(note_with_content("").preview(), "Empty note");
        assert_eq!(note_with_content("  \n\t ").preview(), "Empty note");
    }

    #[test]
    fn test_preview_exactly_sixty_chars() {
        let content = "a".repeat(60);
        assert_eq!(note_with_content(&content).preview(), content);
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let content = "b".repeat(61);
        let preview = note_with_content(&content).preview();
        assert_eq!(preview, format!("{}...", "b".repeat(60)));
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let content = "ж".repeat(70);
        let preview = note_with_content(&content).preview();
        assert_eq!(preview.chars().count(), 63);
        assert!(preview.starts_with(&"ж".repeat(60)));
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title(""), "Untitled");
        assert_eq!(normalize_title("   "), "Untitled");
        assert_eq!(normalize_title(" Groceries "), " Groceries ");
    }

    #[test]
    fn test_format_timestamp_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        assert_eq!(format_timestamp(&whole), "2026-10-19T08:30:00.000000Z");

        let parsed = DateTime::parse_from_rfc3339(&format_timestamp(&whole))
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(parsed, whole);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(note_with_content("x")).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("modifiedAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
