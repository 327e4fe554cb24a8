pub mod auth_ctx;

pub use auth_ctx::{
    Authentication, AuthenticationDetails, ContextError, CurrentAuth, SecurityContext,
};
