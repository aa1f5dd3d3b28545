//! Password hashing and the bearer-token guard protecting alarm endpoints.
//!
//! Passwords are hashed with Argon2 before storage; the same scheme is used
//! on registration and verification, with a random salt per record.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::http::{header, HeaderMap};
use eyre::Result;
use uuid::Uuid;
use wakesync_core::errors::{AlarmError, AlarmResult};
use wakesync_core::models::session::SessionIdentity;

use crate::ApiState;

/// Hashes a password for storage.
///
/// Generates a fresh random salt and hashes with default Argon2 parameters.
/// The result is a PHC string carrying algorithm, version, parameters, salt,
/// and hash, so verification needs no side channel.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Extracts the session token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> AlarmResult<Uuid> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AlarmError::Authorization("Authentication required".to_string()))?
        .to_str()
        .map_err(|_| AlarmError::Authorization("Malformed authorization header".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AlarmError::Authorization("Malformed authorization header".to_string()))?;

    token
        .parse()
        .map_err(|_| AlarmError::Authorization("Malformed session token".to_string()))
}

/// Resolves the request's session token to an authenticated identity.
///
/// Every protected handler calls this first; a missing, malformed, or
/// expired token fails with an authorization error before any database work
/// happens.
pub async fn authenticate(state: &ApiState, headers: &HeaderMap) -> AlarmResult<SessionIdentity> {
    let token = bearer_token(headers)?;

    let identity = state
        .sessions
        .get(token)
        .await
        .ok_or_else(|| AlarmError::Authorization("Session expired or unknown".to_string()))?;

    if !identity.is_authenticated() {
        return Err(AlarmError::Authorization(
            "User not authenticated".to_string(),
        ));
    }

    Ok(identity)
}
