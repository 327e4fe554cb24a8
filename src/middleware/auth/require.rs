//! Authorization decision: a route that needs a principal rejects requests without one.
//!
//! Must sit inside `access` so the SecurityContext is already populated.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::SecurityContext;
use crate::error::AppError;
use crate::middleware::auth::route_policy::AuthRequirement;
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, require_middleware))
}

async fn require_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if state.route_policy.resolve(req.uri().path()) == AuthRequirement::Public {
        return Ok(next.run(req).await);
    }

    let authenticated = req
        .extensions()
        .get::<SecurityContext>()
        .is_some_and(SecurityContext::is_authenticated);

    if !authenticated {
        tracing::debug!(path = %req.uri().path(), "rejecting unauthenticated request");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}
