/*
 * Responsibility
 * - GET /auth/session (public): report whether this request carries an authenticated principal
 * - GET /me (authenticated): the current principal
 */
use axum::Json;

use crate::api::v1::dto::principal::{PrincipalResponse, SessionResponse};
use crate::api::v1::extractors::{CurrentAuth, SecurityContext};

pub async fn session(ctx: SecurityContext) -> Json<SessionResponse> {
    Json(SessionResponse::from(&ctx))
}

pub async fn me(CurrentAuth(auth): CurrentAuth) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from(&auth))
}
