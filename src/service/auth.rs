//! Bearer token verification
//!
//! Tokens are HS256 JWTs carrying the numeric user ID under `userId`.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Claims carried by a user token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub exp: u64,
}

/// Resolves a bearer token to the ID of the authenticated user
#[async_trait]
pub trait AuthVerifier: Send + Sync {
    async fn verify(&self, token: Option<&str>) -> Result<i64, AuthError>;
}

/// Verifies tokens signed with a shared HMAC secret
pub struct JwtAuthVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl AuthVerifier for JwtAuthVerifier {
    async fn verify(&self, token: Option<&str>) -> Result<i64, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let data = jsonwebtoken::decode::<UserClaims>(token, &self.key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AuthError::InvalidToken
            })?;

        Ok(data.claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token(user_id: i64, exp: u64, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &UserClaims { user_id, exp },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_year() -> u64 {
        (chrono::Utc::now().timestamp() + 365 * 24 * 3600) as u64
    }

    #[tokio::test]
    async fn test_valid_token() {
        let verifier = JwtAuthVerifier::new(SECRET);
        let token = token(17, in_one_year(), SECRET);

        assert_eq!(verifier.verify(Some(&token)).await, Ok(17));
    }

    #[tokio::test]
    async fn test_missing_token() {
        let verifier = JwtAuthVerifier::new(SECRET);

        assert_eq!(verifier.verify(None).await, Err(AuthError::MissingToken));
        assert_eq!(verifier.verify(Some("  ")).await, Err(AuthError::MissingToken));
    }

    #[tokio::test]
    async fn test_wrong_secret() {
        let verifier = JwtAuthVerifier::new(SECRET);
        let token = token(17, in_one_year(), "another-secret");

        assert_eq!(verifier.verify(Some(&token)).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let verifier = JwtAuthVerifier::new(SECRET);
        let token = token(17, 1_000_000_000, SECRET);

        assert_eq!(verifier.verify(Some(&token)).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let verifier = JwtAuthVerifier::new(SECRET);

        assert_eq!(
            verifier.verify(Some("not.a.jwt")).await,
            Err(AuthError::InvalidToken)
        );
    }
}
