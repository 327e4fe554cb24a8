//! Bearer token type and the token-service seam used by the authentication gate.
use std::fmt;

use thiserror::Error;

use crate::services::auth::Principal;

/// Literal, case-sensitive scheme prefix (including the single separating space).
pub const BEARER_PREFIX: &str = "Bearer ";

/// Opaque credential taken from an `Authorization: Bearer <token>` header.
///
/// The only constructor is [`BearerToken::from_authorization`], so a value of this
/// type always came from a header carrying the exact `"Bearer "` prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Parse an `Authorization` header value.
    ///
    /// Everything after the 7-byte prefix is the token: no trimming, and an
    /// empty remainder is still a token.
    pub fn from_authorization(value: &str) -> Option<Self> {
        value
            .strip_prefix(BEARER_PREFIX)
            .map(|token| Self(token.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Credentials never end up in logs.
        f.debug_tuple("BearerToken").field(&"<redacted>").finish()
    }
}

/// Why a token could not be decoded into an identity.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("unsupported token algorithm")]
    UnsupportedAlgorithm,
    #[error("token has no subject claim")]
    MissingSubject,
    #[error("token rejected: {0}")]
    Invalid(String),
    #[error("invalid key material: {0}")]
    InvalidKey(String),
}

/// Decodes and validates bearer tokens.
///
/// Implementations own the key material and the clock. Failures are values,
/// never panics, so the gate can downgrade them to "not authenticated".
pub trait TokenService: Send + Sync {
    /// Verify the token and return its subject identity (e.g. an email).
    fn extract_identity(&self, token: &BearerToken) -> Result<String, TokenError>;

    /// Whether the token is valid *for this principal*: signature, expiry, and
    /// the token subject matching `principal.identity()`.
    fn is_valid_for(&self, token: &BearerToken, principal: &Principal) -> bool;
}
