//! Post model for Quill.

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::validation::not_empty_trimmed;

/// Maximum length for post titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 255;

/// Post entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// ID of the user who wrote the post. Never changes.
    pub author_id: i64,
    /// Post title.
    pub title: String,
    /// Post body as written by the author.
    pub body: String,
    /// Sanitized HTML derived from `body`.
    pub rendered_body: String,
    /// Post creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Post joined with its author's display name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostWithAuthor {
    #[sqlx(flatten)]
    pub post: Post,
    pub author_name: String,
}

/// Title and body submitted through the create or edit form.
#[derive(Debug, Clone, Default, Validate)]
pub struct PostInput {
    /// Post title.
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 255)
    )]
    pub title: String,
    /// Post body.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub body: String,
}

impl PostInput {
    /// Create a new post input.
    ///
    /// Leading and trailing whitespace is stripped from both fields, so
    /// validation and storage see the same text.
    pub fn new(title: impl AsRef<str>, body: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            body: body.as_ref().trim().to_string(),
        }
    }
}

/// Data for inserting a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// ID of the author.
    pub author_id: i64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Rendered body.
    pub rendered_body: String,
}

/// Data for rewriting an existing post's content.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    /// New title.
    pub title: String,
    /// New body.
    pub body: String,
    /// Body rendered from the new `body`.
    pub rendered_body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::check;
    use crate::QuillError;

    #[test]
    fn test_valid_input() {
        assert!(check(&PostInput::new("Hello", "World")).is_ok());
    }

    #[test]
    fn test_title_at_limit() {
        let title = "t".repeat(MAX_TITLE_LENGTH);
        assert!(check(&PostInput::new(title, "body")).is_ok());
    }

    #[test]
    fn test_title_over_limit() {
        let title = "t".repeat(MAX_TITLE_LENGTH + 1);
        let Err(QuillError::Validation(fields)) = check(&PostInput::new(title, "body")) else {
            panic!("Expected Validation error");
        };
        assert_eq!(
            fields["title"],
            vec!["The title field must not be greater than 255 characters."]
        );
        assert!(!fields.contains_key("body"));
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 255 multi-byte characters is within the limit
        let title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(check(&PostInput::new(title, "body")).is_ok());
    }

    #[test]
    fn test_blank_fields_required() {
        let Err(QuillError::Validation(fields)) = check(&PostInput::new("  ", "")) else {
            panic!("Expected Validation error");
        };
        assert_eq!(fields["title"], vec!["The title field is required."]);
        assert_eq!(fields["body"], vec!["The body field is required."]);
    }

    #[test]
    fn test_input_is_trimmed() {
        let input = PostInput::new("  Hello \t", "\n World  \n");
        assert_eq!(input.title, "Hello");
        assert_eq!(input.body, "World");
    }
}
