//! Bearer-token authenticator.
//!
//! Provider token construction (JWT signing, key management) is out of
//! scope; the caller supplies a ready-made token.

use apns_core::{BuildError, Request};

use crate::Authenticator;

/// Sets `authorization: bearer <token>` on every request.
#[derive(Debug, Clone)]
pub struct BearerAuthenticator {
    token: String,
}

impl BearerAuthenticator {
    /// Create an authenticator from a provider token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Authenticator for BearerAuthenticator {
    fn authenticate(&self, request: Request) -> Result<Request, BuildError> {
        if self.token.is_empty() {
            return Err(BuildError::Auth("provider token is empty".to_string()));
        }
        Ok(request.with_header("authorization", format!("bearer {}", self.token)))
    }
}
