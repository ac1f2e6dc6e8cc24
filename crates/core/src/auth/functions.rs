use chrono::{DateTime, Duration, Utc};

use super::SessionTokens;

/// Expiry instant for a token issued at `issued_at` valid for `expires_in_secs`.
pub fn calculate_expiry(issued_at: DateTime<Utc>, expires_in_secs: i64) -> DateTime<Utc> {
    issued_at + Duration::seconds(expires_in_secs)
}

/// Check if session tokens have expired.
pub fn is_token_expired(tokens: &SessionTokens, now: DateTime<Utc>) -> bool {
    tokens.expires_at <= now
}

/// `Authorization` header value for an id token.
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}
