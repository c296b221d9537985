use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::test_drive_controller::TestDriveController;
use crate::dto::common_dto::MessageResponse;
use crate::dto::test_drive_dto::{
    CreateTestDriveRequest, TestDriveFilter, TestDriveResponse, UpdateTestDriveStatusRequest,
};
use crate::middleware::auth::{AdminUser, AuthenticatedUser, CustomerUser};
use crate::state::AppState;
use crate::utils::{
    errors::AppError,
    extract::{AppQuery, ValidatedJson},
};

pub fn create_test_drive_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_own).post(create_test_drive))
        .route("/all", get(list_all))
        .route("/:id", get(get_test_drive).delete(cancel_test_drive))
        .route("/:id/status", put(update_status))
}

async fn list_own(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
) -> Result<Json<Vec<TestDriveResponse>>, AppError> {
    let controller = TestDriveController::new(state.pool.clone());
    let response = controller.list_own(user.account_id).await?;
    Ok(Json(response))
}

async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppQuery(filter): AppQuery<TestDriveFilter>,
) -> Result<Json<Vec<TestDriveResponse>>, AppError> {
    let controller = TestDriveController::new(state.pool.clone());
    let response = controller.list_all(filter.status).await?;
    Ok(Json(response))
}

async fn get_test_drive(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<TestDriveResponse>, AppError> {
    let controller = TestDriveController::new(state.pool.clone());
    let response = controller.get(id, &user).await?;
    Ok(Json(response))
}

async fn create_test_drive(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
    ValidatedJson(request): ValidatedJson<CreateTestDriveRequest>,
) -> Result<(StatusCode, Json<TestDriveResponse>), AppError> {
    let controller = TestDriveController::new(state.pool.clone());
    let response = controller.create(user.account_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateTestDriveStatusRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = TestDriveController::new(state.pool.clone());
    controller.update_status(id, admin.account_id, request).await?;
    Ok(Json(MessageResponse::new("Test drive status updated successfully")))
}

async fn cancel_test_drive(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = TestDriveController::new(state.pool.clone());
    controller.cancel(id, user.account_id).await?;
    Ok(Json(MessageResponse::new("Test drive cancelled successfully")))
}
