use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::account::Role;
use crate::state::AppState;
use crate::utils::{errors::AppError, extract::ValidatedJson};

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/admin/login", post(admin_login))
}

async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(Role::User, request).await?;
    Ok(Json(response))
}

async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(Role::Admin, request).await?;
    Ok(Json(response))
}
