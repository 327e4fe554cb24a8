/*
 * Responsibility
 * - Pull the bearer token out of the Authorization header (extraction only, no verification)
 * - Anything that is not exactly `Bearer <token>` is treated the same as a missing header
 */
use axum::http::{HeaderMap, header};

use crate::services::auth::BearerToken;

/// Extract the bearer token from the first `Authorization` header value.
///
/// `HeaderMap` lookups are case-insensitive on the header name. Values that are
/// not visible ASCII cannot carry a recognised token and yield `None`.
pub fn extract_bearer(headers: &HeaderMap) -> Option<BearerToken> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(BearerToken::from_authorization)
}
