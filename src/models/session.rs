use serde::{Deserialize, Serialize};

/// Claims carried by the signed session token.
///
/// The token is stateless: nothing is persisted server-side, so a token that
/// leaks before its natural expiry cannot be revoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The email address of the session holder.
    pub email: String,
    /// Expiry as a unix timestamp, fixed at issuance.
    pub exp: usize,
}
