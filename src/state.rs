//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let jwt = JwtConfig::from(&config);
        Self {
            pool,
            config: Arc::new(config),
            jwt,
        }
    }
}
