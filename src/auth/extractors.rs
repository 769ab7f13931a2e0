use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::auth::jwt::TokenError;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::User;

/// Authenticated identity for the current request: the bearer token is
/// decoded and the user record fetched live. Handlers taking this
/// extractor reject the request before their body runs.
pub struct CurrentUser(pub User);

/// Why a request failed to authenticate. Callers always see the same
/// 401; the reason only reaches the log.
#[derive(Debug, Clone, Copy)]
enum AuthFailure {
    MissingCredentials,
    TokenExpired,
    TokenInvalid,
    UserNotFound,
}

impl AuthFailure {
    fn as_str(self) -> &'static str {
        match self {
            AuthFailure::MissingCredentials => "missing credentials",
            AuthFailure::TokenExpired => "token expired",
            AuthFailure::TokenInvalid => "token invalid",
            AuthFailure::UserNotFound => "user not found",
        }
    }
}

fn reject(failure: AuthFailure) -> ApiError {
    warn!(reason = failure.as_str(), "request authentication failed");
    ApiError::Unauthorized
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts) {
            Some(token) => token,
            None => return Err(reject(AuthFailure::MissingCredentials)),
        };

        let claims = match state.jwt.verify(token) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => return Err(reject(AuthFailure::TokenExpired)),
            Err(TokenError::Invalid) => return Err(reject(AuthFailure::TokenInvalid)),
        };

        // A valid token does not guarantee the account still exists.
        match state.store.find_user_by_id(claims.user_id).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(reject(AuthFailure::UserNotFound)),
        }
    }
}
