/*
 * Responsibility
 * - URL layout of v1
 * - /auth/... is public (see config PUBLIC_PATHS); the rest needs a principal.
 *   That decision is made by middleware::auth::require, not here.
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    session::{me, session},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/health", get(health))
        .route("/auth/session", get(session))
        .route("/me", get(me))
}
