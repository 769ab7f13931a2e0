use axum::{extract::State, routing::post, Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::auth::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::NewUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if !is_valid_email(&payload.email) {
        warn!("register with invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    // Check-then-insert; the unique index on email backstops a racing
    // duplicate. Emails match exactly as stored, no normalization.
    if state
        .store
        .find_user_by_email(&payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::EmailTaken);
    }

    let password_hash = hash_password(&payload.password)?;
    let user = state
        .store
        .insert_user(NewUser {
            email: payload.email,
            password_hash,
            name: payload.name,
        })
        .await?;

    let access_token = state.jwt.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer".into(),
        user: user.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if !is_valid_email(&payload.email) {
        warn!("login with invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    // Unknown email and wrong password must be indistinguishable.
    let user = match state.store.find_user_by_email(&payload.email).await? {
        Some(user) => user,
        None => {
            warn!(email = %payload.email, "login with unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.jwt.sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer".into(),
        user: user.into(),
    }))
}
