//! Principal lookup interface used by the authentication gate.
use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::services::auth::Principal;

/// Principal lookup result:
/// - `Ok(principal)`: identity is known
/// - `Err(NotFound)`: identity is unknown (expected, caller continues unauthenticated)
/// - `Err(Unavailable)`: backend failure (caller also continues unauthenticated, but logs it)
#[derive(Debug, Error)]
pub enum PrincipalStoreError {
    #[error("principal not found: {0}")]
    NotFound(String),
    #[error("principal store unavailable: {0}")]
    Unavailable(String),
}

/// Loads a principal and its authorities by the identity claimed in a token.
///
/// Implementations may block on I/O; any timeout/retry policy lives here, not in the gate.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn load_by_identity(&self, identity: &str) -> Result<Principal, PrincipalStoreError>;
}

/// Fixed set of principals held in memory.
///
/// Used for local development (`AUTH_STATIC_PRINCIPALS`) and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPrincipalStore {
    principals: HashMap<String, Principal>,
}

impl InMemoryPrincipalStore {
    pub fn new(principals: impl IntoIterator<Item = Principal>) -> Self {
        Self {
            principals: principals
                .into_iter()
                .map(|p| (p.identity().to_owned(), p))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

#[async_trait]
impl PrincipalStore for InMemoryPrincipalStore {
    async fn load_by_identity(&self, identity: &str) -> Result<Principal, PrincipalStoreError> {
        self.principals
            .get(identity)
            .cloned()
            .ok_or_else(|| PrincipalStoreError::NotFound(identity.to_owned()))
    }
}
