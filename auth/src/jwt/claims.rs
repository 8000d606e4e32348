use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Only the registered claims the service relies on are carried: the subject
/// (account identifier) and an absolute expiry. Both are mandatory, so a token
/// without them fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: impl ToString, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.to_string(),
            iat,
            exp,
        }
    }

    /// Claims for `subject` valid from now until `now + ttl`.
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();
        Self::new(subject, now.timestamp(), (now + ttl).timestamp())
    }

    /// A token stops being valid at the exact expiry second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
