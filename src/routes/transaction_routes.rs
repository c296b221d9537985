use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::transaction_controller::TransactionController;
use crate::dto::common_dto::MessageResponse;
use crate::dto::transaction_dto::{
    CreateTransactionRequest, TransactionFilter, TransactionResponse,
    UpdateTransactionStatusRequest, UploadPaymentProofRequest,
};
use crate::middleware::auth::{AdminUser, AuthenticatedUser, CustomerUser};
use crate::state::AppState;
use crate::utils::{
    errors::AppError,
    extract::{AppQuery, ValidatedJson},
};

pub fn create_transaction_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_own).post(create_transaction))
        .route("/all", get(list_all))
        .route("/:id", get(get_transaction))
        .route("/:id/status", put(update_status))
        .route("/:id/payment-proof", post(upload_payment_proof))
}

async fn create_transaction(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
    ValidatedJson(request): ValidatedJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let controller = TransactionController::new(state.pool.clone());
    let response = controller.create(user.account_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_own(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let controller = TransactionController::new(state.pool.clone());
    let response = controller.list_own(user.account_id).await?;
    Ok(Json(response))
}

async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppQuery(filter): AppQuery<TransactionFilter>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let controller = TransactionController::new(state.pool.clone());
    let response = controller.list_all(filter.status).await?;
    Ok(Json(response))
}

async fn get_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<TransactionResponse>, AppError> {
    let controller = TransactionController::new(state.pool.clone());
    let response = controller.get(id, &user).await?;
    Ok(Json(response))
}

async fn update_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateTransactionStatusRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = TransactionController::new(state.pool.clone());
    controller.update_status(id, request).await?;
    Ok(Json(MessageResponse::new("Transaction status updated successfully")))
}

async fn upload_payment_proof(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UploadPaymentProofRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = TransactionController::new(state.pool.clone());
    controller
        .upload_payment_proof(id, user.account_id, request)
        .await?;
    Ok(Json(MessageResponse::new("Payment proof uploaded successfully")))
}
