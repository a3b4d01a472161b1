//! HTTP handlers.

pub mod auth;
pub mod comment;
pub mod post;

pub use auth::*;
pub use comment::*;
pub use post::*;

use crate::web::dto::FormView;
use crate::web::error::ApiError;
use crate::QuillError;

/// Convert a service error, attaching the form view when input was rejected.
pub(crate) fn reject_with_form(err: QuillError, form: impl FnOnce() -> FormView) -> ApiError {
    match err {
        QuillError::Validation(_) => ApiError::from(err).with_form(form()),
        other => ApiError::from(other),
    }
}
