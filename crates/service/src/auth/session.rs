//! Signed session tokens.
//!
//! The token only carries the user id; callers reload the user so that the
//! admin flag always reflects the store.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::domain::AuthUser;
use super::errors::AuthError;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// user id
    pub sub: i32,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user: &AuthUser) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id,
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AuthUser {
        AuthUser { id: 3, username: "alice".into(), is_admin: false }
    }

    #[test]
    fn issued_token_verifies() {
        let keys = SessionKeys::new("secret", Duration::hours(1));
        let token = keys.issue(&alice()).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, 3);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = SessionKeys::new("secret", Duration::hours(1)).issue(&alice()).unwrap();
        let other = SessionKeys::new("other", Duration::hours(1));
        assert!(matches!(other.verify(&token), Err(AuthError::TokenError(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = SessionKeys::new("secret", Duration::hours(-2));
        let token = keys.issue(&alice()).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = SessionKeys::new("secret", Duration::hours(1));
        assert!(keys.verify("not-a-token").is_err());
    }
}
