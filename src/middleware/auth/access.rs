//! Bearer token → SecurityContext in request extensions.
//!
//! Never rejects: whatever the gate decides, the request is forwarded. Whether an
//! unauthenticated request may proceed is decided by `require` further in.

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::{AuthenticationDetails, SecurityContext};
use crate::middleware::auth::gate::GateOutcome;
use crate::middleware::http::REQUEST_ID_HEADER;
use crate::state::AppState;

/// Run the authentication gate on every request routed through `router`.
///
/// 例：
/// ```ignore
/// let router = middleware::auth::require::apply(router, state.clone());
/// let router = middleware::auth::access::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let details = AuthenticationDetails {
        remote_addr: req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr),
        request_id: req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
    };

    // A context only exists if an outer layer already ran the gate for this request.
    let mut ctx = req
        .extensions_mut()
        .remove::<SecurityContext>()
        .unwrap_or_default();

    let outcome = state.gate.process(req.headers(), &mut ctx, details).await;

    match outcome {
        GateOutcome::Authenticated => tracing::debug!("request authenticated"),
        GateOutcome::AlreadyAuthenticated => {}
        GateOutcome::Unauthenticated(reason) => {
            tracing::debug!(reason = reason.as_str(), "request continues unauthenticated")
        }
    }

    // middleware → extractor / require への受け渡し
    req.extensions_mut().insert(ctx);

    next.run(req).await
}
