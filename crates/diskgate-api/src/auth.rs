//! Browse authorization.
//!
//! Directory listings of protected paths require a bearer access token
//! signed with the process secret. The check is pass/fail; claims beyond
//! expiry are not interpreted.

use axum::http::{header, HeaderMap};
use diskgate_core::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

/// Check the Authorization header for a valid access token.
pub fn authorize(headers: &HeaderMap, secret: &[u8]) -> Result<(), AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<serde_json::Value>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| AppError::Unauthorized(format!("Invalid access token: {}", e)))?;

    Ok(())
}
