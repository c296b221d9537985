use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::MessageResponse;
use crate::dto::vehicle_dto::{
    AddImageRequest, CreateVehicleRequest, UpdateVehicleRequest, VehicleImageResponse,
    VehicleQuery, VehicleResponse,
};
use crate::middleware::auth::AdminUser;
use crate::state::AppState;
use crate::utils::{
    errors::AppError,
    extract::{AppQuery, ValidatedJson},
};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/images", post(add_image))
        .route("/:id/images/:image_id", delete(delete_image))
}

async fn list_vehicles(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<VehicleQuery>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(query.into()).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.update(id, request).await?;
    Ok(Json(MessageResponse::new("Vehicle updated successfully")))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(MessageResponse::new("Vehicle deleted successfully")))
}

async fn add_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<AddImageRequest>,
) -> Result<(StatusCode, Json<VehicleImageResponse>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.add_image(id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn delete_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((id, image_id)): Path<(i32, i32)>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete_image(id, image_id).await?;
    Ok(Json(MessageResponse::new("Image deleted successfully")))
}
