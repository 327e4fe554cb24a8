/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::middleware::auth::{AuthenticationGate, RoutePolicy};

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AuthenticationGate>,
    pub route_policy: Arc<RoutePolicy>,
}

impl AppState {
    pub fn new(gate: AuthenticationGate, route_policy: RoutePolicy) -> Self {
        Self {
            gate: Arc::new(gate),
            route_policy: Arc::new(route_policy),
        }
    }
}
