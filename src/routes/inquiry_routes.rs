use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::inquiry_controller::InquiryController;
use crate::dto::common_dto::MessageResponse;
use crate::dto::inquiry_dto::{
    CreateInquiryRequest, InquiryFilter, InquiryResponse, RespondInquiryRequest,
};
use crate::middleware::auth::{AdminUser, AuthenticatedUser, CustomerUser};
use crate::state::AppState;
use crate::utils::{
    errors::AppError,
    extract::{AppQuery, ValidatedJson},
};

pub fn create_inquiry_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_own).post(create_inquiry))
        .route("/all", get(list_all))
        .route("/:id", get(get_inquiry).delete(delete_inquiry))
        .route("/:id/response", put(respond_inquiry))
}

async fn list_own(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
) -> Result<Json<Vec<InquiryResponse>>, AppError> {
    let controller = InquiryController::new(state.pool.clone());
    let response = controller.list_own(user.account_id).await?;
    Ok(Json(response))
}

async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppQuery(filter): AppQuery<InquiryFilter>,
) -> Result<Json<Vec<InquiryResponse>>, AppError> {
    let controller = InquiryController::new(state.pool.clone());
    let response = controller.list_all(filter.status).await?;
    Ok(Json(response))
}

async fn get_inquiry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<InquiryResponse>, AppError> {
    let controller = InquiryController::new(state.pool.clone());
    let response = controller.get(id, &user).await?;
    Ok(Json(response))
}

async fn create_inquiry(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
    ValidatedJson(request): ValidatedJson<CreateInquiryRequest>,
) -> Result<(StatusCode, Json<InquiryResponse>), AppError> {
    let controller = InquiryController::new(state.pool.clone());
    let response = controller.create(user.account_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn respond_inquiry(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RespondInquiryRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = InquiryController::new(state.pool.clone());
    controller.respond(id, admin.account_id, request).await?;
    Ok(Json(MessageResponse::new("Inquiry response saved successfully")))
}

async fn delete_inquiry(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = InquiryController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(MessageResponse::new("Inquiry deleted successfully")))
}
