//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use jsonwebtoken::EncodingKey;
use std::sync::Arc;

use crate::auth::{authenticate, register as register_user, RegistrationRequest};
use crate::config::BlogConfig;
use crate::db::{User, UserRepository};
use crate::web::dto::{
    ApiResponse, JsonBody, LoginRequest, RegisterRequest, TokenResponse, UserInfo, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, JwtClaims};
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Database,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
    /// Page sizes for listings.
    pub blog: BlogConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, jwt_secret: &str, access_expiry: u64, blog: BlogConfig) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry: access_expiry,
            blog,
        }
    }

    /// Generate an access token for a user.
    pub fn generate_access_token(&self, user: &User) -> Result<String, ApiError> {
        JwtClaims::new(user.id, &user.name, self.access_token_expiry).encode(&self.encoding_key)
    }

    fn token_response(&self, user: User) -> Result<TokenResponse, ApiError> {
        Ok(TokenResponse {
            access_token: self.generate_access_token(&user)?,
            token_type: "Bearer",
            expires_in: self.access_token_expiry,
            user: user.into(),
        })
    }
}

/// POST /api/auth/register - Create an account and log in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenResponse>>), ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = register_user(&repo, &RegistrationRequest::from(req)).await?;

    let response = state.token_response(user)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(response))))
}

/// POST /api/auth/login - User login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = authenticate(&repo, &req.email, &req.password).await?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(ApiResponse::new(state.token_response(user)?)))
}

/// GET /api/auth/me - Current user.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(Json(ApiResponse::new(user.into())))
}
