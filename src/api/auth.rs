//! Bearer-token guard for the authenticated route group
//!
//! Tokens are HS256 JWTs issued by the external login service and verified
//! with the shared secret. Verified claims are stored in request extensions
//! for handlers to pick up.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use super::response::ApiError;
use super::AppState;

/// JWT verification settings
#[derive(Clone)]
pub struct JwtConfig {
    key: DecodingKey,
    validation: Validation,
}

impl JwtConfig {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<UserClaims, jsonwebtoken::errors::Error> {
        decode::<UserClaims>(token, &self.key, &self.validation).map(|data| data.claims)
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

/// Claims of a verified token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub exp: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn bearer_token(request: &Request) -> Option<&str> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Reject requests without a valid bearer token
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jwt: &Arc<JwtConfig> = state.jwt.as_ref().ok_or(ApiError::Unauthorized)?;
    let token = bearer_token(&request).ok_or(ApiError::Unauthorized)?;

    let claims = jwt.verify(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::Unauthorized
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// GET /user
/// Claims of the authenticated caller
pub async fn current_user(Extension(claims): Extension<UserClaims>) -> Json<UserClaims> {
    Json(claims)
}
