use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and verifies HS256-signed session tokens.
///
/// The same symmetric secret signs and verifies. Verification accepts HS256
/// only, whatever the token header claims, and applies no clock leeway.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a handler from a signing secret.
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Sign claims into a compact token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature, algorithm and expiry, then return the claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Current time is at or past `exp`
    /// * `InvalidToken` - Malformed, wrong signature, wrong algorithm or
    ///   missing required claims
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        // jsonwebtoken still accepts a token during its final second
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let claims = Claims::for_subject("account-1", Duration::hours(24));

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            JwtHandler::new(b""),
            Err(JwtError::MissingSecret)
        ));
    }

    #[test]
    fn test_decode_garbage() {
        let handler = JwtHandler::new(SECRET).unwrap();

        for token in ["", "invalid.token.here", "not-a-jwt"] {
            assert!(matches!(
                handler.decode(token),
                Err(JwtError::InvalidToken(_))
            ));
        }
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let issuer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let token = issuer
            .encode(&Claims::for_subject("account-1", Duration::hours(1)))
            .unwrap();

        assert!(matches!(
            verifier.decode(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_decode_expired() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let now = Utc::now().timestamp();

        let stale = handler
            .encode(&Claims::new("account-1", now - 120, now - 60))
            .unwrap();
        assert_eq!(handler.decode(&stale), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_at_expiry_second() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let now = Utc::now().timestamp();

        let token = handler
            .encode(&Claims::new("account-1", now - 60, now))
            .unwrap();
        assert_eq!(handler.decode(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_rejects_other_algorithms() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let claims = Claims::for_subject("account-1", Duration::hours(1));

        for algorithm in [Algorithm::HS384, Algorithm::HS512] {
            let token = encode(
                &Header::new(algorithm),
                &claims,
                &EncodingKey::from_secret(SECRET),
            )
            .unwrap();

            assert!(matches!(
                handler.decode(&token),
                Err(JwtError::InvalidToken(_))
            ));
        }
    }

    #[test]
    fn test_decode_rejects_tampered_payload() {
        let handler = JwtHandler::new(SECRET).unwrap();
        let token = handler
            .encode(&Claims::for_subject("account-1", Duration::hours(1)))
            .unwrap();
        let other = handler
            .encode(&Claims::for_subject("account-2", Duration::hours(1)))
            .unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        let spliced = parts.join(".");

        assert!(matches!(
            handler.decode(&spliced),
            Err(JwtError::InvalidToken(_))
        ));
    }
}
