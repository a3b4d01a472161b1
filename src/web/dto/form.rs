//! Form view payloads.
//!
//! A form view tells the client where a form submits to, which method it
//! uses, what the fields currently contain and which messages to show next
//! to them. It is returned by the form endpoints and, with a 422, when a
//! submission fails validation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::blog::{Post, PostInput};
use crate::error::FieldErrors;

/// A form the client can render and submit.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    /// Path the form submits to.
    pub action: String,
    /// HTTP method to submit with.
    pub method: &'static str,
    /// Current field values.
    pub values: BTreeMap<String, String>,
    /// Per-field messages from the last submission.
    pub errors: FieldErrors,
    /// Token to echo in the `x-csrf-token` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

impl FormView {
    /// Create an empty form.
    pub fn new(action: impl Into<String>, method: &'static str) -> Self {
        Self {
            action: action.into(),
            method,
            values: BTreeMap::new(),
            errors: FieldErrors::new(),
            csrf_token: None,
        }
    }

    /// Set a field value.
    pub fn with_value(mut self, field: &str, value: impl Into<String>) -> Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    /// Set the CSRF token.
    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    /// The create-post form, optionally prefilled with submitted input.
    pub fn create_post(input: Option<&PostInput>) -> Self {
        let (title, body) = input
            .map(|i| (i.title.as_str(), i.body.as_str()))
            .unwrap_or_default();
        Self::new("/posts", "POST")
            .with_value("title", title)
            .with_value("body", body)
    }

    /// The edit form for an existing post.
    pub fn edit_post(post: &Post) -> Self {
        Self::new(format!("/posts/{}", post.id), "PUT")
            .with_value("title", post.title.as_str())
            .with_value("body", post.body.as_str())
    }

    /// The edit form re-filled with a rejected submission.
    pub fn edit_post_with(post_id: i64, input: &PostInput) -> Self {
        Self::new(format!("/posts/{}", post_id), "PUT")
            .with_value("title", input.title.as_str())
            .with_value("body", input.body.as_str())
    }

    /// The comment form of a post.
    pub fn comment(post_id: i64, body: &str) -> Self {
        Self::new(format!("/posts/{}/comments", post_id), "POST").with_value("body", body)
    }
}
