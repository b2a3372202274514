//! Signed single-use upload tokens.
//!
//! HS256 JWT carrying `UploadTargetClaims`. Verification checks signature
//! and expiry in one step with zero leeway; a token that fails either check
//! never reaches the admission registry.

use diskgate_core::models::UploadTargetClaims;
use diskgate_core::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Sign claims into an upload token.
pub fn create(claims: &UploadTargetClaims, secret: &[u8]) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign upload token: {}", e)))
}

/// Verify token integrity and expiry, returning the decoded claims.
pub fn verify(token: &str, secret: &[u8]) -> Result<UploadTargetClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<UploadTargetClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Upload token validation failed: {}", e);
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::Unauthorized("Upload token has expired".to_string())
            }
            _ => AppError::Unauthorized(format!("Invalid upload token: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}
