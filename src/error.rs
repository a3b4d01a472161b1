//! Error types for Quill.

use std::collections::BTreeMap;

use thiserror::Error;

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Common error type for Quill.
#[derive(Error, Debug)]
pub enum QuillError {
    /// Database error.
    ///
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] crate::auth::PasswordError),

    /// The actor is not allowed to act on the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Field-level validation failure. Nothing has been written.
    #[error("validation error: {}", summarize(.0))]
    Validation(FieldErrors),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl QuillError {
    /// Build a validation error for a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        QuillError::Validation(errors)
    }
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

// Conversion from sqlx errors
impl From<sqlx::Error> for QuillError {
    fn from(e: sqlx::Error) -> Self {
        QuillError::Database(e.to_string())
    }
}

/// Result type alias for Quill operations.
pub type Result<T> = std::result::Result<T, QuillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = QuillError::Auth("invalid password".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid password");
    }

    #[test]
    fn test_forbidden_error_display() {
        let err = QuillError::Forbidden("not the author of this post".to_string());
        assert_eq!(err.to_string(), "forbidden: not the author of this post");
    }

    #[test]
    fn test_validation_error_display() {
        let mut errors = FieldErrors::new();
        errors.insert("body".to_string(), vec!["required".to_string()]);
        errors.insert(
            "title".to_string(),
            vec!["required".to_string(), "too long".to_string()],
        );
        let err = QuillError::Validation(errors);
        assert_eq!(
            err.to_string(),
            "validation error: body: required; title: required, too long"
        );
    }

    #[test]
    fn test_single_field_error() {
        let err = QuillError::field("email", "The email has already been taken.");
        match err {
            QuillError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors["email"], vec!["The email has already been taken."]);
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_error_display() {
        let err = QuillError::NotFound("post".to_string());
        assert_eq!(err.to_string(), "post not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: QuillError = io_err.into();
        assert!(matches!(err, QuillError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: QuillError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, QuillError::Database(_)));
    }
}
