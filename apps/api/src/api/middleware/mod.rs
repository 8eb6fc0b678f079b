pub mod auth;

pub use auth::{require_bearer, JwtAuth};
