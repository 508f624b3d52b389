use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::session::errors::SessionError;
use crate::session::models::UserId;
use crate::session::ports::SessionServicePort;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the Bearer access token and adds the user to request extensions
pub async fn require_access_token<S: SessionServicePort>(
    State(service): State<Arc<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = {
        let token = auth::extract_bearer(req.headers()).map_err(SessionError::from)?;
        service.authenticate(token)?
    };

    tracing::debug!(user_id = %user_id, "Access token accepted");

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Middleware for service-to-service calls carrying `Authorization: ApiKey <key>`
pub async fn require_api_key<S: SessionServicePort>(
    State(service): State<Arc<S>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = auth::extract_api_key(req.headers()).map_err(SessionError::from)?;
    service.authorize_api_key(key)?;

    Ok(next.run(req).await)
}
