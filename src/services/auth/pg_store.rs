use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::repos::{error::RepoError, principal_repo};
use crate::services::auth::{Principal, PrincipalStore, PrincipalStoreError};

/// Postgres-backed principal store (`users` table, one role per user).
#[derive(Clone, Debug)]
pub struct PgPrincipalStore {
    db: PgPool,
}

impl PgPrincipalStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Connect a pool. The acquire timeout bounds how long one lookup can wait on the pool.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, RepoError> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self::new(db))
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalStore {
    async fn load_by_identity(&self, identity: &str) -> Result<Principal, PrincipalStoreError> {
        let row = principal_repo::find_by_email(&self.db, identity)
            .await
            .map_err(|e| PrincipalStoreError::Unavailable(e.to_string()))?
            .ok_or_else(|| PrincipalStoreError::NotFound(identity.to_owned()))?;

        Ok(Principal::new(row.email, row.role))
    }
}
