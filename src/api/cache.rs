use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Serialize;

use crate::app::AppState;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Handler for `POST /api/v1/cache/invalidate`.
///
/// Requires `Authorization: Bearer <service token>`. Rejected outright when no
/// token is configured.
pub async fn invalidate_cache_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<InvalidateResponse>, AppError> {
    let expected = state
        .api
        .service_token
        .as_deref()
        .ok_or_else(|| AppError::Auth("Cache invalidation is disabled".into()))?;

    if bearer_token(&headers) != Some(expected) {
        return Err(AppError::Auth("Invalid service token".into()));
    }

    state.content.invalidate();

    Ok(Json(InvalidateResponse {
        message: "Collection cache invalidated".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok-123"));
        assert_eq!(bearer_token(&headers), Some("tok-123"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}
