/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Give handlers the per-request SecurityContext filled in by the auth middleware
 * - axum glue lives in core, the types themselves in types
 *
 * Public API:
 * - SecurityContext / Authentication / AuthenticationDetails
 * - CurrentAuth
 */

mod core;
mod types;

pub use core::CurrentAuth;
pub use types::{Authentication, AuthenticationDetails, ContextError, SecurityContext};
