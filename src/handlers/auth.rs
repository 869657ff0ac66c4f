use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use crate::{
    error::Result,
    services::auth as auth_service,
    state::AppState,
    validation::auth::validate_email,
};

/// The request payload for session-token issuance.
#[derive(Deserialize, Debug)]
pub struct TokenRequest {
    pub email: String,
}

/// The response payload for session endpoints.
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
}

/// Issues a session token for the given email and sets it as a cookie.
#[axum::debug_handler]
pub async fn issue_token(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<AuthResponse>> {
    validate_email(&payload.email)?;

    let token = auth_service::issue_token(&state.config.access_token_secret, &payload.email)?;
    cookies.add(auth_service::session_cookie(token, state.config.production));

    tracing::info!("✅ Session issued for {}", payload.email);

    Ok(Json(AuthResponse { success: true }))
}

/// Drops the session cookie. Client-side only: an already-captured token
/// stays valid until its natural expiry.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Result<Json<AuthResponse>> {
    cookies.remove(auth_service::expired_cookie(state.config.production));

    tracing::info!("👋 Session cookie cleared");

    Ok(Json(AuthResponse { success: true }))
}
