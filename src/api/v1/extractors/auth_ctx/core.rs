use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::{Authentication, SecurityContext};

/// The request's security context, as left by the authentication middleware.
///
/// Never rejects: a request the middleware did not authenticate (or that never
/// went through it) yields an empty context.
impl<S> FromRequestParts<S> for SecurityContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Handler で認証済みの主体を受け取るための extractor
/// コンテキストが空なら 401 を返す（トークンなし・検証失敗・middleware 未設定）
pub struct CurrentAuth(pub Authentication);

impl<S> FromRequestParts<S> for CurrentAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .and_then(SecurityContext::get)
            .cloned()
            .map(CurrentAuth)
            .ok_or(AppError::Unauthorized)
    }
}
