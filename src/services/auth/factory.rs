/// Factories: build the gate's collaborators from application `Config`.
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{Config, JwtKeyConfig, PrincipalSource};
use crate::services::auth::{
    InMemoryPrincipalStore, JwtTokenService, PgPrincipalStore, PrincipalStore, TokenService,
};

pub fn build_token_service(config: &Config) -> Result<Arc<dyn TokenService>> {
    let service = match &config.jwt_key {
        JwtKeyConfig::Ed25519PublicKeyPem(pem) => JwtTokenService::ed25519_pem(pem, &config.jwt)
            .context("ACCESS_JWT_PUBLIC_KEY_PEM is not a valid Ed25519 public key")?,
        JwtKeyConfig::HmacBase64Secret(secret) => JwtTokenService::hmac_base64(secret, &config.jwt)
            .context("ACCESS_JWT_SECRET is not valid base64")?,
    };

    Ok(Arc::new(service))
}

pub async fn build_principal_store(config: &Config) -> Result<Arc<dyn PrincipalStore>> {
    match &config.principals {
        PrincipalSource::Postgres {
            url,
            max_connections,
            acquire_timeout,
        } => {
            let store = PgPrincipalStore::connect(url, *max_connections, *acquire_timeout)
                .await
                .context("failed to connect principal store database")?;
            Ok(Arc::new(store))
        }
        PrincipalSource::Static(principals) => {
            let store = InMemoryPrincipalStore::new(principals.iter().cloned());
            if store.is_empty() {
                tracing::warn!("no principals configured; every bearer token will be rejected");
            } else {
                tracing::info!(count = store.len(), "using in-memory principal store");
            }
            Ok(Arc::new(store))
        }
    }
}
