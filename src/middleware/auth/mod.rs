pub mod access;
pub mod gate;
pub mod require;
pub mod route_policy;

pub use gate::{AuthenticationGate, GateOutcome, Unauthenticated};
pub use route_policy::{AuthRequirement, PathPattern, RoutePatternError, RoutePolicy, RouteRule};
