use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::services::AuthenticatedUser;

/// Request gate for protected routes
///
/// Verifies the bearer token before any handler runs and stores the
/// authenticated identity in the request extensions.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let authenticated = state.auth.verify_bearer(header).map_err(|e| {
        tracing::warn!(path = %request.uri().path(), error = %e, "rejected unauthenticated request");
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(authenticated);
    Ok(next.run(request).await)
}

/// JWT authentication extractor for protected routes
///
/// Reads the identity stored by [`require_bearer`].
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(caller): JwtAuth,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello user {}", caller.user_id))
/// }
/// ```
pub struct JwtAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(JwtAuth)
            .ok_or_else(|| ApiError::unauthorized("Missing authentication"))
    }
}
