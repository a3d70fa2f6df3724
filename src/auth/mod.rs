use std::sync::Arc;

use crate::error::ApiError;

/// Shared-secret check in front of every mutating route.
///
/// A plain string comparison: no hashing, no sessions, no per-user credentials.
#[derive(Clone)]
pub struct AuthGate {
    secret: Arc<str>,
}

impl AuthGate {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self { secret: secret.into() }
    }

    pub fn check_password(&self, candidate: Option<&str>) -> bool {
        candidate.is_some_and(|c| c == &*self.secret)
    }

    pub fn authorize(&self, candidate: Option<&str>) -> Result<(), ApiError> {
        if self.check_password(candidate) {
            Ok(())
        } else {
            Err(ApiError::InvalidPassword)
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}
