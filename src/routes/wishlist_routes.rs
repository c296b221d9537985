use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::wishlist_controller::WishlistController;
use crate::dto::common_dto::MessageResponse;
use crate::dto::vehicle_dto::{VehicleResponse, WishlistCheckResponse};
use crate::middleware::auth::CustomerUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_wishlist_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist))
        .route(
            "/:vehicle_id",
            post(add_to_wishlist).delete(remove_from_wishlist),
        )
        .route("/check/:vehicle_id", get(check_wishlist))
}

async fn list_wishlist(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = WishlistController::new(state.pool.clone());
    let response = controller.list(user.account_id).await?;
    Ok(Json(response))
}

async fn add_to_wishlist(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = WishlistController::new(state.pool.clone());
    controller.add(user.account_id, vehicle_id).await?;
    Ok(Json(MessageResponse::new("Vehicle added to wishlist")))
}

async fn remove_from_wishlist(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = WishlistController::new(state.pool.clone());
    controller.remove(user.account_id, vehicle_id).await?;
    Ok(Json(MessageResponse::new("Vehicle removed from wishlist")))
}

async fn check_wishlist(
    State(state): State<AppState>,
    CustomerUser(user): CustomerUser,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<WishlistCheckResponse>, AppError> {
    let controller = WishlistController::new(state.pool.clone());
    let in_wishlist = controller.contains(user.account_id, vehicle_id).await?;
    Ok(Json(WishlistCheckResponse { in_wishlist }))
}
