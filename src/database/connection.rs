//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool de conexiones y aplica las migraciones del esquema.

use sqlx::PgPool;
use tracing::info;

use crate::config::{database::DatabaseConfig, EnvironmentConfig};
use crate::utils::errors::AppError;

/// Conexión a la base de datos con migraciones aplicadas
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar usando la configuración del entorno y ejecutar migraciones
    pub async fn connect(config: &EnvironmentConfig) -> Result<Self, AppError> {
        let db_config = DatabaseConfig::from(config);
        info!(
            "🔗 Conectando a PostgreSQL: {}",
            mask_database_url(&db_config.url)
        );

        let pool = db_config.create_pool().await?;
        let connection = Self { pool };
        connection.run_migrations().await?;

        Ok(connection)
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("✅ Migraciones aplicadas");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
