//! Bearer-token extractor
//!
//! Handlers take an [`AuthOwner`] argument; request bodies never carry the
//! owner id.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;
use uuid::Uuid;

/// Verified caller
#[derive(Debug, Clone, Copy)]
pub struct AuthOwner {
    pub owner_id: Uuid,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthOwner
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthenticated("Missing authorization header".to_string()))?;

        let token = bearer_token(header)
            .ok_or_else(|| ApiError::Unauthenticated("Invalid authorization format".to_string()))?;

        let owner_id = app_state.jwt().verify(token).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            ApiError::Unauthenticated(e.to_string())
        })?;

        Ok(AuthOwner { owner_id })
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
