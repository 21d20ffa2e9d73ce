//! Session-token service for token generation and validation
//!
//! This module provides functionality for issuing and verifying signed,
//! time-bound session tokens using the HS256 algorithm. Tokens are
//! self-contained: verification needs no database lookup, and expiry is
//! the only invalidation mechanism (logout is client-side token discard).

use crate::error::{TokenError, TokenResult};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Session-token configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Server-held secret used to sign and verify tokens
    pub secret: String,
    /// Token expiration time in seconds (default: 24 hours)
    pub token_expiry: u64,
}

impl TokenConfig {
    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret shared by the auth and API services
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 86400)
    pub fn from_env() -> TokenResult<Self> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| {
            TokenError::Configuration("JWT_SECRET environment variable not set".to_string())
        })?;

        if secret.len() < 32 {
            return Err(TokenError::Configuration(
                "JWT_SECRET must be at least 32 bytes".to_string(),
            ));
        }

        let token_expiry = match std::env::var("JWT_TOKEN_EXPIRY") {
            Ok(raw) => raw.parse().map_err(|_| {
                TokenError::Configuration(
                    "JWT_TOKEN_EXPIRY must be a number of seconds".to_string(),
                )
            })?,
            Err(_) => 86400,
        };

        Ok(TokenConfig {
            secret,
            token_expiry,
        })
    }
}

/// Session-token claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Session-token service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl TokenService {
    /// Initialize a new token service from an explicit configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        TokenService {
            encoding_key,
            decoding_key,
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Issue a session token for a user
    pub fn issue(&self, user_id: Uuid) -> TokenResult<String> {
        let now = unix_now()?;

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.token_expiry,
        };

        encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(TokenError::Invalid)
    }

    /// Verify a token and return its claims
    ///
    /// Rejects tokens with an invalid signature and tokens past their
    /// expiry instant, regardless of signature validity.
    pub fn verify(&self, token: &str) -> TokenResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Invalid)?;
        Ok(token_data.claims)
    }

    /// Get the configured token expiry in seconds
    pub fn token_expiry(&self) -> u64 {
        self.token_expiry
    }
}

fn unix_now() -> TokenResult<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| TokenError::Configuration(format!("Failed to get current time: {}", e)))?
        .as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn service(secret: &str, expiry: u64) -> TokenService {
        TokenService::new(TokenConfig {
            secret: secret.to_string(),
            token_expiry: expiry,
        })
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let svc = service("0123456789abcdef0123456789abcdef", 3600);
        let user_id = Uuid::new_v4();

        let token = svc.issue(user_id).unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = service("0123456789abcdef0123456789abcdef", 3600);
        let verifier = service("another-secret-another-secret-xx", 3600);

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let svc = service("0123456789abcdef0123456789abcdef", 3600);
        let now = unix_now().unwrap();

        // Token signed with the right secret but already past expiry
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let expired = encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("0123456789abcdef0123456789abcdef".as_bytes()),
        )
        .unwrap();

        assert!(svc.verify(&expired).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let svc = service("0123456789abcdef0123456789abcdef", 3600);
        assert!(svc.verify("not-a-token").is_err());
    }

    #[test]
    #[serial]
    fn test_config_rejects_short_secret() {
        unsafe {
            std::env::set_var("JWT_SECRET", "too-short");
        }
        assert!(TokenConfig::from_env().is_err());
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_unparseable_expiry() {
        unsafe {
            std::env::set_var("JWT_SECRET", "0123456789abcdef0123456789abcdef");
            std::env::set_var("JWT_TOKEN_EXPIRY", "soon");
        }
        assert!(TokenConfig::from_env().is_err());

        unsafe {
            std::env::set_var("JWT_TOKEN_EXPIRY", "3600");
        }
        let config = TokenConfig::from_env().unwrap();
        assert_eq!(config.token_expiry, 3600);

        unsafe {
            std::env::remove_var("JWT_SECRET");
            std::env::remove_var("JWT_TOKEN_EXPIRY");
        }
    }
}
