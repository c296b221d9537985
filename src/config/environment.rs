//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! La lectura pasa por una función de búsqueda para poder probarla sin tocar
//! el entorno del proceso.

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Errores al cargar la configuración
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
    pub seed_routes_enabled: bool,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
}

impl EnvironmentConfig {
    /// Cargar configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = get("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let is_development = environment == "development";

        Ok(Self {
            port: parse_or(&get, "PORT", "port number", 5000)?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            jwt_secret: get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            jwt_expiration: parse_or(&get, "JWT_EXPIRATION", "number of seconds", 86_400)?,
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            bcrypt_cost: parse_or(&get, "BCRYPT_COST", "bcrypt cost", bcrypt::DEFAULT_COST)?,
            seed_routes_enabled: parse_or(&get, "SEED_ROUTES_ENABLED", "boolean", is_development)?,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", "number", 20)?,
            db_min_connections: parse_or(&get, "DB_MIN_CONNECTIONS", "number", 1)?,
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, G>(
    get: &G,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_required_values_only() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/showroom"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert!(config.is_development());
        assert_eq!(config.port, 5000);
        assert_eq!(config.jwt_expiration, 86_400);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.cors_origins.is_empty());
        assert!(config.seed_routes_enabled);
        assert_eq!(config.server_url(), "0.0.0.0:5000");
    }

    #[test]
    fn test_missing_secret_is_reported() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/showroom",
        )]));

        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_port_is_reported() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/showroom"),
            ("JWT_SECRET", "secret"),
            ("PORT", "eighty"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
    }

    #[test]
    fn test_production_disables_seed_routes_by_default() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/showroom"),
            ("JWT_SECRET", "secret"),
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://showroom.example, https://admin.showroom.example,"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert!(!config.seed_routes_enabled);
        assert_eq!(
            config.cors_origins,
            vec![
                "https://showroom.example".to_string(),
                "https://admin.showroom.example".to_string()
            ]
        );
    }
}
