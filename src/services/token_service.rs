//! Session token service - issues and verifies signed bearer tokens.
//!
//! Tokens are HS256 JWTs with fixed issuer/audience claims and a short
//! expiry. There is exactly one verification path: the signature is
//! always checked before any claim is trusted, whether the token arrived
//! in a header or a cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{Config, TOKEN_AUDIENCE, TOKEN_ISSUER};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id
    pub sub: Uuid,
    pub email: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenService: Send + Sync {
    /// Issue a signed token binding the user identity
    fn issue(&self, user_id: Uuid, email: &str) -> AppResult<String>;

    /// Verify a token's signature, expiry, issuer, and audience.
    ///
    /// The wrapped `jsonwebtoken` error keeps malformed, expired, and
    /// signature failures distinguishable for logging even though they
    /// collapse to one status on the wire.
    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// HS256 implementation of the TokenService
pub struct TokenSigner {
    secret: String,
    expiration_hours: i64,
}

impl TokenSigner {
    /// Create a signer from application configuration
    pub fn new(config: &Config) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration_hours: config.jwt_expiration_hours,
        }
    }
}

impl TokenService for TokenSigner {
    fn issue(&self, user_id: Uuid, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: user_id,
            email: email.to_owned(),
            iss: TOKEN_ISSUER.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_audience(&[TOKEN_AUDIENCE]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use jsonwebtoken::errors::ErrorKind;

    const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn signer() -> TokenSigner {
        TokenSigner {
            secret: TEST_SECRET.to_string(),
            expiration_hours: 1,
        }
    }

    #[test]
    fn issued_token_verifies_immediately() {
        let signer = signer();
        let user_id = Uuid::new_v4();

        let token = signer.issue(user_id, "a@b.com").unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.aud, TOKEN_AUDIENCE);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_fails_verification() {
        let signer = signer();
        let now = Utc::now();

        // Forge a token whose expiry is well past any validation leeway
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let err = signer.verify(&token).unwrap_err();
        match err {
            AppError::Jwt(e) => assert_eq!(*e.kind(), ErrorKind::ExpiredSignature),
            other => panic!("expected Jwt error, got {:?}", other),
        }
    }

    #[test]
    fn wrong_issuer_fails_verification() {
        let signer = signer();
        let now = Utc::now();

        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            iss: "someone-else".to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_fails_verification() {
        let signer = signer();
        let other = TokenSigner {
            secret: "another-secret-key-that-is-32-chars!".to_string(),
            expiration_hours: 1,
        };

        let token = other.issue(Uuid::new_v4(), "a@b.com").unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_fails_verification() {
        let signer = signer();
        assert!(signer.verify("not-a-token").is_err());
    }
}
