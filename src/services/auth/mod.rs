pub mod access_jwt;
pub mod factory;
pub mod pg_store;
pub mod principal;
pub mod store;
pub mod token;

pub use access_jwt::{JwtSettings, JwtTokenService};
pub use factory::{build_principal_store, build_token_service};
pub use pg_store::PgPrincipalStore;
pub use principal::{Authority, Principal};
pub use store::{InMemoryPrincipalStore, PrincipalStore, PrincipalStoreError};
pub use token::{BEARER_PREFIX, BearerToken, TokenError, TokenService};
