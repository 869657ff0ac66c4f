use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    error::{AppError, Result},
    models::session::Claims,
    services::auth as auth_service,
    state::AppState,
};

/// Extracts the session token from the request cookies.
fn extract_session_token(cookies: &Cookies) -> Option<String> {
    cookies
        .get(auth_service::TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// A middleware that requires a valid session token to be present.
///
/// Verifies the `token` cookie and injects the decoded [`Claims`] into the
/// request extensions. A missing or invalid token fails with 401 before any
/// ownership comparison can happen.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// The downstream `Response`, or an authentication error.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let token = extract_session_token(&cookies)
        .ok_or_else(|| AppError::Authentication("missing session token".to_string()))?;

    let claims = auth_service::verify_token(&state.config.access_token_secret, &token)?;

    tracing::debug!("session verified for {}", claims.email);
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Allows the request only when the authenticated identity equals the owner
/// identity named in the path. The comparison is a case-sensitive exact match.
pub fn ensure_owner(claims: &Claims, path_email: &str) -> Result<()> {
    if claims.email != path_email {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(email: &str) -> Claims {
        Claims {
            email: email.to_string(),
            exp: usize::MAX,
        }
    }

    #[test]
    fn owner_match_is_allowed() {
        assert!(ensure_owner(&claims("a@b.com"), "a@b.com").is_ok());
    }

    #[test]
    fn other_identities_are_forbidden() {
        let err = ensure_owner(&claims("c@d.com"), "a@b.com").unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(ensure_owner(&claims("A@B.com"), "a@b.com").is_err());
    }
}
