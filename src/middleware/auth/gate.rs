//! Bearer-token authentication gate.
//!
//! Per request, terminal after one pass:
//! 1. context already authenticated → leave it alone
//! 2. no `Authorization: Bearer ...` → unauthenticated
//! 3. token → identity (TokenService)
//! 4. identity → principal (PrincipalStore)
//! 5. token valid for that principal? (TokenService)
//! 6. install the principal in the SecurityContext, exactly once
//!
//! The gate never rejects. Every failure, including a panic inside a
//! collaborator, ends as "no principal" and the caller forwards the request.
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::http::HeaderMap;
use futures::FutureExt;

use crate::api::v1::extractors::{AuthenticationDetails, SecurityContext};
use crate::middleware::bearer_auth::extract_bearer;
use crate::services::auth::{
    BearerToken, Principal, PrincipalStore, PrincipalStoreError, TokenService,
};

/// Why a request is continuing without a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unauthenticated {
    NoBearerToken,
    TokenRejected,
    UnknownPrincipal,
    StoreUnavailable,
    NotValidForPrincipal,
    InternalFailure,
}

impl Unauthenticated {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoBearerToken => "no_bearer_token",
            Self::TokenRejected => "token_rejected",
            Self::UnknownPrincipal => "unknown_principal",
            Self::StoreUnavailable => "store_unavailable",
            Self::NotValidForPrincipal => "not_valid_for_principal",
            Self::InternalFailure => "internal_failure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Authenticated,
    AlreadyAuthenticated,
    Unauthenticated(Unauthenticated),
}

#[derive(Clone)]
pub struct AuthenticationGate {
    tokens: Arc<dyn TokenService>,
    principals: Arc<dyn PrincipalStore>,
}

impl AuthenticationGate {
    pub fn new(tokens: Arc<dyn TokenService>, principals: Arc<dyn PrincipalStore>) -> Self {
        Self { tokens, principals }
    }

    /// Run the gate for one request against its security context.
    pub async fn process(
        &self,
        headers: &HeaderMap,
        ctx: &mut SecurityContext,
        details: AuthenticationDetails,
    ) -> GateOutcome {
        if ctx.is_authenticated() {
            return GateOutcome::AlreadyAuthenticated;
        }

        let Some(token) = extract_bearer(headers) else {
            return GateOutcome::Unauthenticated(Unauthenticated::NoBearerToken);
        };

        let principal = match AssertUnwindSafe(self.resolve(&token)).catch_unwind().await {
            Ok(Ok(principal)) => principal,
            Ok(Err(reason)) => return GateOutcome::Unauthenticated(reason),
            Err(_) => {
                tracing::error!("authentication collaborator panicked; continuing unauthenticated");
                return GateOutcome::Unauthenticated(Unauthenticated::InternalFailure);
            }
        };

        match ctx.set(principal, details) {
            Ok(()) => GateOutcome::Authenticated,
            Err(_) => GateOutcome::AlreadyAuthenticated,
        }
    }

    async fn resolve(&self, token: &BearerToken) -> Result<Principal, Unauthenticated> {
        let identity = self.tokens.extract_identity(token).map_err(|err| {
            tracing::debug!(error = %err, "bearer token rejected");
            Unauthenticated::TokenRejected
        })?;

        let principal = self
            .principals
            .load_by_identity(&identity)
            .await
            .map_err(|err| match err {
                PrincipalStoreError::NotFound(_) => {
                    tracing::debug!(error = %err, "token subject has no principal");
                    Unauthenticated::UnknownPrincipal
                }
                PrincipalStoreError::Unavailable(_) => {
                    tracing::warn!(error = %err, "principal store failure");
                    Unauthenticated::StoreUnavailable
                }
            })?;

        if !self.tokens.is_valid_for(token, &principal) {
            tracing::debug!("bearer token not valid for resolved principal");
            return Err(Unauthenticated::NotValidForPrincipal);
        }

        Ok(principal)
    }
}
