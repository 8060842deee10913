use crate::di::{DependenciesInject, DependenciesInjectDeps};
use anyhow::{Context, Result};
use shared::{
    abstract_trait::{hashing::DynHashing, jwt::DynJwtService},
    config::{Config, ConnectionPool, Hashing, JwtConfig},
    utils::CardCipher,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let hashing = Arc::new(Hashing::new()) as DynHashing;
        let cipher = Arc::new(
            CardCipher::new(&config.card_encryption_key)
                .context("Failed to initialize card cipher")?,
        );

        let deps = DependenciesInjectDeps {
            pool,
            hash: hashing,
            jwt_config: jwt_config.clone(),
            cipher,
        };

        let di_container = {
            DependenciesInject::new(deps)
                .await
                .context("Failed to initialize dependency injection container")?
        };

        Ok(Self {
            jwt_config,
            di_container,
        })
    }
}
