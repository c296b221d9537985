//! Car Showroom API
//!
//! Backend REST del showroom: catálogo de vehículos, wishlist, pruebas de
//! manejo, consultas y compras con su pago y control de stock.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{cors_layer, optional_auth_middleware};
use crate::state::AppState;

/// Construir el router completo de la aplicación
pub fn build_app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/wishlist", routes::wishlist_routes::create_wishlist_router())
        .nest("/api/test-drives", routes::test_drive_routes::create_test_drive_router())
        .nest("/api/inquiries", routes::inquiry_routes::create_inquiry_router())
        .nest("/api/transactions", routes::transaction_routes::create_transaction_router());

    if state.config.seed_routes_enabled {
        router = router.nest("/api/seed", routes::seed_routes::create_seed_router());
    }

    router
        .layer(from_fn_with_state(state.clone(), optional_auth_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_origins))
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "car_showroom",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
