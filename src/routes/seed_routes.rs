use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::seed_controller::{SeedController, SeedResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_seed_router() -> Router<AppState> {
    Router::new()
        .route("/admin", post(seed_admin))
        .route("/admin/reset", post(reset_admin))
        .route("/cars", post(seed_vehicles))
}

async fn seed_admin(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let response = SeedController::new(&state).seed_admin().await?;
    Ok(Json(response))
}

async fn reset_admin(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let response = SeedController::new(&state).reset_admin().await?;
    Ok(Json(response))
}

async fn seed_vehicles(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let response = SeedController::new(&state).seed_vehicles().await?;
    Ok(Json(response))
}
