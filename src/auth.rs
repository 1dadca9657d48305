/// Token issuance, verification, and the authenticated-request extractor
use crate::{api::middleware::extract_bearer_token, context::AppContext, error::ApiError};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claim set carried by every issued token: solely the account identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
}

/// Sign a token for an account id with the shared secret.
pub fn issue_token(user_id: i64, jwt_secret: &str) -> Result<String, ApiError> {
    let claims = Claims { user_id };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token signing failed: {}", e)))
}

/// Verify a token and extract the account id it was issued for.
///
/// Issued tokens carry no expiry claim, so validation covers the
/// signature and the claim shape only: the payload must decode to an
/// object with a numeric `user_id`.
pub fn verify_token(token: &str, jwt_secret: &str) -> Result<i64, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims.user_id)
    .map_err(|e| {
        tracing::warn!("token verification failed: {}", e);
        ApiError::Authentication("Invalid token".to_string())
    })
}

/// Authenticated context - extracts and verifies the bearer token,
/// binding the account identity for downstream handlers.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
}

#[async_trait]
impl FromRequestParts<AppContext> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Authentication("Authorization header is missing".to_string()))?;

        let user_id = verify_token(&token, &state.config.authentication.jwt_secret)?;

        Ok(AuthContext { user_id })
    }
}
