//! Upload admission registry.
//!
//! Process-wide record of consumed upload-target claims. Each distinct claim
//! record gets at most one admission; membership is keyed by the full claim
//! record (structural equality), never by token string or object identity.
//!
//! Entries are never evicted: tokens are short-lived relative to process
//! lifetime and the registry must keep refusing a consumed token until the
//! token itself expires.

use diskgate_core::models::UploadTargetClaims;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// In-memory set of claim records that have already been consumed.
///
/// Cloning shares the underlying set. The check-and-mark step happens in a
/// single critical section (`try_admit`), so two concurrent requests bearing
/// the same claims can never both observe "not yet admitted".
#[derive(Clone, Default)]
pub struct UploadAdmissions {
    consumed: Arc<Mutex<HashSet<UploadTargetClaims>>>,
}

impl UploadAdmissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test against all previously admitted claim records.
    pub fn has_been_admitted(&self, claims: &UploadTargetClaims) -> bool {
        self.consumed
            .lock()
            .expect("admission registry lock poisoned")
            .contains(claims)
    }

    /// Atomically check-and-mark; returns false when the claims were already
    /// consumed. Callers must only invoke this once they have committed to
    /// granting the request.
    pub fn try_admit(&self, claims: &UploadTargetClaims) -> bool {
        self.consumed
            .lock()
            .expect("admission registry lock poisoned")
            .insert(claims.clone())
    }

    /// Record the claims as consumed (idempotent).
    pub fn admit(&self, claims: &UploadTargetClaims) {
        self.consumed
            .lock()
            .expect("admission registry lock poisoned")
            .insert(claims.clone());
    }
}
