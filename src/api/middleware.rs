/// Request gating middleware
use crate::error::ApiError;
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(|t| t.to_string()))
}

/// Coarse API-key gate applied to every API route.
///
/// Presence-only: the key's value is not validated against anything.
pub async fn require_api_key(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.headers().get("x-api-key").is_none() {
        return Err(ApiError::Authentication("API key is required".to_string()));
    }

    Ok(next.run(req).await)
}
