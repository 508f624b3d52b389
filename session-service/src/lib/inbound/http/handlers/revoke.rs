use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::session::errors::SessionError;
use crate::session::ports::SessionServicePort;

pub async fn revoke<S: SessionServicePort>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = auth::extract_bearer(&headers).map_err(SessionError::from)?;

    service.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}
