pub mod users;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use users::{User, UserProfile, UserRegistry};

/// Issued tokens are valid for one hour
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp();

        Self {
            sub: user_id.to_string(),
            exp,
            iat: now.timestamp(),
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username or password is incorrect")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthenticated(String),

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedSession {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserProfile,
}

/// Validates credentials against the user registry and issues/verifies signed tokens
pub struct AuthGate {
    registry: UserRegistry,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthGate {
    pub fn new(registry: UserRegistry, secret: &str) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            registry,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Exchange a username/password pair for a signed token
    pub fn authenticate(&self, username: &str, password: &str) -> Result<AuthenticatedSession, AuthError> {
        let user = self
            .registry
            .find_by_credentials(username, password)
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.generate_jwt(&Claims::new(user.id))?;

        Ok(AuthenticatedSession {
            token,
            token_type: "Bearer",
            expires_in: TOKEN_TTL_SECS,
            user: user.profile(),
        })
    }

    pub fn generate_jwt(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Verify a token and return the user id it asserts
    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::Unauthenticated(format!("Invalid JWT token: {}", e)))?;

        token_data
            .claims
            .user_id()
            .ok_or_else(|| AuthError::Unauthenticated("Token subject is not a user id".to_string()))
    }
}
