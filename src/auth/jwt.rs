//! Access tokens and the opaque one-time tokens stored as hashes.
//!
//! Access tokens are HS256 JWTs carrying [`Claims`]. Refresh, verification
//! and password-reset tokens are random strings; only their SHA-256 digest
//! is persisted.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::Config;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl_mins: i64,
    pub refresh_token_ttl_days: i64,
}

impl JwtConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            access_token_ttl_mins: config.access_token_ttl_mins,
            refresh_token_ttl_days: config.refresh_token_ttl_days,
        }
    }
}

pub fn generate_access_token(
    user_id: Uuid,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        exp: now + config.access_token_ttl_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Checks signature and expiry, returning the embedded claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Random token for the client plus the digest to store: `(plaintext, hash)`.
pub fn generate_opaque_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of an opaque token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "reelnote-test-secret".to_string(),
            access_token_ttl_mins: 15,
            refresh_token_ttl_days: 30,
        }
    }

    #[test]
    fn test_access_token_carries_user_id() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        tokio_test::assert_err!(validate_token(&token, &config));
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let token = generate_access_token(Uuid::new_v4(), &test_config()).unwrap();
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        };

        tokio_test::assert_err!(validate_token(&token, &other));
    }

    #[test]
    fn test_opaque_token_hash_is_stable() {
        let (plaintext, hash) = generate_opaque_token();
        assert_eq!(hash_token(&plaintext), hash);
        assert_eq!(hash.len(), 64);
        assert_ne!(plaintext, hash);
    }
}
