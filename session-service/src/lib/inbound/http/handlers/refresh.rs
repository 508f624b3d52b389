use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::session::errors::SessionError;
use crate::session::models::RefreshedSession;
use crate::session::ports::SessionServicePort;

/// Exchange the refresh token in `Authorization: Bearer` for a new access token.
pub async fn refresh<S: SessionServicePort>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let refresh_token = auth::extract_bearer(&headers).map_err(SessionError::from)?;

    service
        .refresh(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|refreshed| ApiSuccess::new(StatusCode::OK, refreshed.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl From<RefreshedSession> for RefreshResponseData {
    fn from(refreshed: RefreshedSession) -> Self {
        Self {
            token: refreshed.access_token,
            refresh_token: refreshed.refresh_token,
        }
    }
}
