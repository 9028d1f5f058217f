use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::AppConfig, error::AppError};

/// Claims
///
/// The payload carried inside every session token. Tokens are not time-bounded,
/// so there is no `exp`; `iat` is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Numeric id of the user the token was issued to.
    pub id: i64,
    pub email: String,
    /// Issued At: seconds since the Unix epoch.
    pub iat: i64,
}

/// Failures of the credential service.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed structure, or an algorithm other than HS256.
    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// issue_token
///
/// Signs a fresh HS256 token for the given user with the server secret.
pub fn issue_token(user_id: i64, email: &str, secret: &str) -> Result<String, TokenError> {
    let claims = Claims {
        id: user_id,
        email: email.to_string(),
        iat: chrono::Utc::now().timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// verify_token
///
/// Checks the signature and decodes the claims. Only HS256 is accepted, and no
/// registered claims (`exp`, `nbf`, ...) are required.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(TokenError::Invalid)
}

/// Hashes a plain password with Argon2id and a random salt (PHC string format).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))
}

/// Returns false both for a wrong password and for an unparsable stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("stored password hash is unreadable: {e}");
            false
        }
    }
}

/// AuthUser
///
/// The authenticated subject of a request, decoded from its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
        }
    }
}

/// AuthUser Extractor Implementation
///
/// Resolves the subject from `Authorization: Bearer <token>` (scheme matched
/// case-insensitively). The Authentication middleware stores the result in the
/// request extensions, so handlers and the Authorization gate reuse it instead of
/// decoding the token again.
///
/// Rejection: `AppError::Unauthorized` (401) on a missing header, a non-Bearer
/// scheme, or an invalid token.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let config = AppConfig::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("sign in to proceed".to_string()))?;

        let claims = verify_token(token, &config.jwt_secret).map_err(|e| {
            tracing::debug!("rejected bearer token: {e}");
            AppError::Unauthorized("invalid token".to_string())
        })?;

        let user = AuthUser::from(claims);
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
