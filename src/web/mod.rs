//! HTTP layer for Quill.
//!
//! JSON views of posts and comments, form payloads for the create/edit
//! screens, and token-based login for the clients that drive them.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
