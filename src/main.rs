use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use car_showroom::{
    build_app, config::EnvironmentConfig, database::DatabaseConnection, state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("car_showroom=debug,tower_http=info")),
        )
        .init();

    info!("🚗 Car Showroom API");
    info!("==================");

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;
    info!("⚙️ Entorno: {}", config.environment);

    let db_connection = match DatabaseConnection::connect(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ Base de datos lista");

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección de escucha inválida: {}", config.server_url()))?;

    if config.seed_routes_enabled {
        info!("🌱 Rutas de seed habilitadas en /api/seed");
    }

    let state = AppState::new(db_connection.pool().clone(), config);
    let app = build_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("No se pudo abrir {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
