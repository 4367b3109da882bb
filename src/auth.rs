// ABOUTME: JWT-based user authentication and token lifecycle management
// ABOUTME: Handles token generation, validation, and bearer header parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! # Authentication and Session Management
//!
//! HS256 JWT authentication on a shared secret. Tokens carry the user id
//! and email with a configurable expiry (7 days by default). Validation
//! distinguishes expired, invalid-signature, and malformed tokens so the
//! API can report precise 401 messages.

use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is not proper JWT format
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired { expired_at } => {
                write!(
                    f,
                    "JWT token expired at {}",
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            JwtValidationError::TokenInvalid { .. } | JwtValidationError::TokenMalformed { .. } => {
                Self::auth_invalid(crate::constants::error_messages::INVALID_TOKEN)
            }
        }
    }
}

/// JWT claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Authentication manager for JWT tokens
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager from a shared secret
    #[must_use]
    pub fn new(jwt_secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            token_expiry_hours,
        }
    }

    /// Generate a signed token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user_id: Uuid, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is expired, has an
    /// invalid signature, or is malformed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(e) => Err(Self::convert_jwt_error(&e)),
        }
    }

    /// Validate a token and extract the user id from its subject
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the subject is not a UUID
    pub fn user_id_from_token(&self, token: &str) -> AppResult<Uuid> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid user id in token"))
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => {
                tracing::warn!("JWT token expired");
                JwtValidationError::TokenExpired {
                    expired_at: Utc::now(),
                }
            }
            ErrorKind::InvalidSignature => {
                tracing::warn!("JWT token signature verification failed");
                JwtValidationError::TokenInvalid {
                    reason: "Token signature verification failed".into(),
                }
            }
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
///
/// # Errors
///
/// Returns an error if the header is missing or not a bearer scheme
pub fn extract_bearer_token(auth_header: Option<&str>) -> AppResult<&str> {
    let missing = || {
        AppError::new(
            ErrorCode::AuthRequired,
            crate::constants::error_messages::NO_TOKEN,
        )
    };
    let header = auth_header.ok_or_else(missing)?;
    header.strip_prefix("Bearer ").ok_or_else(missing)
}

/// Generate a random JWT secret for development deployments without one
///
/// Production deployments should always provide `JWT_SECRET` so tokens
/// survive restarts.
#[must_use]
pub fn generate_jwt_secret() -> [u8; 64] {
    use rand::RngCore;

    let mut secret = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager() -> AuthManager {
        AuthManager::new(b"test-secret-for-unit-tests", 1)
    }

    #[test]
    fn test_generate_and_validate_token() {
        let manager = test_manager();
        let user_id = Uuid::new_v4();

        let token = manager.generate_token(user_id, "cook@example.com").unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "cook@example.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let manager = test_manager();
        let other = AuthManager::new(b"another-secret-entirely", 1);
        let token = manager
            .generate_token(Uuid::new_v4(), "cook@example.com")
            .unwrap();

        let result = other.validate_token(&token);
        assert!(matches!(result, Err(JwtValidationError::TokenInvalid { .. })));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let manager = test_manager();
        let result = manager.validate_token("not.a.token");
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc123")).unwrap(), "abc123");
        assert!(extract_bearer_token(Some("Basic abc123")).is_err());

        let err = extract_bearer_token(None).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(err.message, crate::constants::error_messages::NO_TOKEN);
    }
}
