use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tower_cookies::Cookie;
use tower_cookies::cookie::SameSite;
use tower_cookies::cookie::time::Duration;

use crate::error::{AppError, Result};
use crate::models::session::Claims;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Fixed session lifetime. Tokens are not renewable; a new one must be issued.
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Signs a session token asserting the given email.
///
/// # Arguments
///
/// * `secret` - The HMAC signing secret.
/// * `email` - The email address of the session holder.
///
/// # Returns
///
/// A `Result` containing the signed token.
pub fn issue_token(secret: &str, email: &str) -> Result<String> {
    let claims = Claims {
        email: email.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp()
            as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))
}

/// Verifies a session token and returns its claims.
///
/// Fails with an authentication error when the token is malformed, carries a
/// bad signature, or has expired.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Authentication(format!("invalid session token: {}", e)))
}

/// Builds the HTTP-only session cookie carrying a signed token.
///
/// Cross-site frontends need `SameSite=None` plus `secure` in production;
/// local development keeps `SameSite=Strict` without `secure`.
pub fn session_cookie(token: String, production: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token);

    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_max_age(Duration::hours(TOKEN_LIFETIME_HOURS));

    if production {
        cookie.set_secure(true);
        cookie.set_same_site(SameSite::None);
    } else {
        cookie.set_same_site(SameSite::Strict);
    }

    cookie
}

/// Builds the removal cookie that drops the session client-side. A token the
/// client already holds stays valid until its natural expiry.
pub fn expired_cookie(production: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), production);
    cookie.set_max_age(Duration::seconds(0));
    cookie
}
