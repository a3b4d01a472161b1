//! Data Transfer Objects for the HTTP layer.

pub mod form;
pub mod request;
pub mod response;
pub mod validation;

pub use form::FormView;
pub use request::*;
pub use response::*;
pub use validation::{JsonBody, QueryParams, ValidatedJson};
