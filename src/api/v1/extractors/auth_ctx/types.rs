/*
 * Responsibility
 * - The per-request "who is calling" slot that handlers and the authorization layer read
 * - The authentication middleware is the only writer; it lives in request extensions,
 *   so every request starts with its own empty context
 */
use std::net::SocketAddr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::services::auth::Principal;

/// Request metadata captured when a principal is installed.
///
/// - `remote_addr` is only known when the server runs with connect info
/// - `request_id` is the `x-request-id` value, for log correlation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticationDetails {
    pub remote_addr: Option<SocketAddr>,
    pub request_id: Option<String>,
}

/// A successful authentication: who, from where, and when.
#[derive(Debug, Clone)]
pub struct Authentication {
    principal: Principal,
    details: AuthenticationDetails,
    authenticated_at: DateTime<Utc>,
}

impl Authentication {
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn details(&self) -> &AuthenticationDetails {
        &self.details
    }

    pub fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("security context already holds an authentication")]
    AlreadyAuthenticated,
}

/// Holds at most one authentication for the current request.
///
/// Written at most once, never partially: `set` either installs a complete
/// `Authentication` or leaves the context untouched.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    authentication: Option<Authentication>,
}

impl SecurityContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.get().map(Authentication::principal)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authentication.is_some()
    }

    pub fn set(
        &mut self,
        principal: Principal,
        details: AuthenticationDetails,
    ) -> Result<(), ContextError> {
        if self.authentication.is_some() {
            return Err(ContextError::AlreadyAuthenticated);
        }

        self.authentication = Some(Authentication {
            principal,
            details,
            authenticated_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let ctx = SecurityContext::new();
        assert!(!ctx.is_authenticated());
        assert!(ctx.principal().is_none());
    }

    #[test]
    fn set_installs_principal_and_details() {
        let mut ctx = SecurityContext::new();
        let details = AuthenticationDetails {
            remote_addr: Some("127.0.0.1:4242".parse().unwrap()),
            request_id: Some("req-1".into()),
        };

        ctx.set(Principal::new("alice@example.com", ["USER"]), details.clone())
            .unwrap();

        let auth = ctx.get().unwrap();
        assert_eq!(auth.principal().identity(), "alice@example.com");
        assert_eq!(auth.details(), &details);
    }

    #[test]
    fn second_set_is_refused_and_keeps_the_first() {
        let mut ctx = SecurityContext::new();
        ctx.set(
            Principal::new("alice@example.com", ["USER"]),
            AuthenticationDetails::default(),
        )
        .unwrap();

        let err = ctx
            .set(
                Principal::new("mallory@example.com", ["ADMIN"]),
                AuthenticationDetails::default(),
            )
            .unwrap_err();

        assert_eq!(err, ContextError::AlreadyAuthenticated);
        assert_eq!(ctx.principal().unwrap().identity(), "alice@example.com");
    }
}
