use thiserror::Error;

/// Error type for token operations.
///
/// The decode-side variants exist so callers can log why a token was turned
/// away; they are not meant to be shown to the token holder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret is empty")]
    MissingSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
