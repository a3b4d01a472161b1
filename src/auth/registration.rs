//! User registration and login for Quill.

use tracing::{info, warn};
use validator::Validate;

use crate::auth::{hash_password, verify_password};
use crate::db::{NewUser, User, UserRepository};
use crate::validation::{check, no_control_chars, not_empty_trimmed};
use crate::{QuillError, Result};

/// Registration request data.
#[derive(Debug, Clone, Validate)]
pub struct RegistrationRequest {
    /// Display name.
    #[validate(
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars"),
        length(max = 255)
    )]
    pub name: String,
    /// Email address (unique, case-insensitive).
    #[validate(email, length(max = 255))]
    pub email: String,
    /// Password (8-128 characters).
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Register a new user.
///
/// Validates the input, rejects an email that is already taken, hashes the
/// password and stores the user.
pub async fn register(repo: &UserRepository<'_>, request: &RegistrationRequest) -> Result<User> {
    check(request)?;

    let email = request.email.trim();
    if repo.email_exists(email).await? {
        return Err(QuillError::field(
            "email",
            "The email has already been taken.",
        ));
    }

    let password_hash = hash_password(&request.password)?;
    let user = repo
        .create(&NewUser::new(request.name.trim(), email, password_hash))
        .await?;

    info!(user_id = user.id, email = %user.email, "New user registered");
    Ok(user)
}

/// Check an email/password pair and return the matching user.
///
/// Unknown email and wrong password produce the same error.
pub async fn authenticate(repo: &UserRepository<'_>, email: &str, password: &str) -> Result<User> {
    let Some(user) = repo.get_by_email(email.trim()).await? else {
        warn!(email = %email, "Login failed: unknown email");
        return Err(QuillError::Auth("invalid email or password".to_string()));
    };

    if verify_password(password, &user.password).is_err() {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(QuillError::Auth("invalid email or password".to_string()));
    }

    Ok(user)
}
