use serde::{Deserialize, Serialize};

/// Decoded payload of a signed upload token.
///
/// A claim record identifies exactly one intended upload. Equality is
/// structural over all fields: two records are the same admission slot iff
/// every field matches, which is what the admission registry keys on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UploadTargetClaims {
    /// Who the token was minted for (opaque to the gateway)
    pub sub: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}
