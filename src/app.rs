/*
 * Responsibility
 * - Load Config → build collaborators → assemble the Router
 * - Layer order (outermost first): http → access (gate) → require → handlers
 * - Serve with connect info so the gate can record the remote address
 */
use std::net::SocketAddr;
use std::panic;

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware::{self, auth::AuthenticationGate, auth::RoutePolicy};
use crate::services::auth::{build_principal_store, build_token_service};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,auth_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they are not lost with stderr.
        // No abort: the gate contains collaborator panics and keeps serving.
        tracing::error!(%info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    init_panic_hook();

    let config = Config::from_env()?;
    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        public_paths = ?config.public_paths,
        "starting auth gate"
    );

    let state = build_state(&config).await?;
    let app = middleware::http::apply(build_router(state), &config.http);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let tokens = build_token_service(config)?;
    let principals = build_principal_store(config).await?;
    let route_policy =
        RoutePolicy::with_public_paths(&config.public_paths).context("invalid PUBLIC_PATHS")?;

    Ok(AppState::new(
        AuthenticationGate::new(tokens, principals),
        route_policy,
    ))
}

/// Routes + auth layers. Transport layers (`middleware::http`) are applied by the caller.
pub fn build_router(state: AppState) -> Router {
    async fn not_found() -> AppError {
        AppError::NotFound
    }

    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .fallback(not_found);

    // `layer` wraps what is already there, so require ends up inside access.
    let router = middleware::auth::require::apply(router, state.clone());
    let router = middleware::auth::access::apply(router, state.clone());

    router.with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // Keep serving; only an explicit signal stops the server.
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
