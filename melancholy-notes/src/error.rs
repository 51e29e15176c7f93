//! Error types for Melancholy Notes
//!
//! Every failure the core can report is a storage failure: the database
//! file, its directory, or a statement against it. Errors are serialized
//! as plain strings when they cross the presentation boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not resolve the per-user data directory")]
    DataDirUnavailable,
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_as_message() {
        let err = AppError::DataDirUnavailable;
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Could not resolve the per-user data directory\"");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }
}
