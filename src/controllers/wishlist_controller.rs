use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::repositories::{VehicleRepository, WishlistRepository};
use crate::services::engagement::{self, EngagementError};
use crate::utils::errors::AppError;

pub struct WishlistController {
    wishlist: WishlistRepository,
    vehicles: VehicleRepository,
    catalog: VehicleController,
}

impl WishlistController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            wishlist: WishlistRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            catalog: VehicleController::new(pool),
        }
    }

    /// Vehículos de la wishlist, la entrada más reciente primero
    pub async fn list(&self, account_id: i32) -> Result<Vec<VehicleResponse>, AppError> {
        let entries = self.wishlist.list_for_account(account_id).await?;
        let ids: Vec<i32> = entries.iter().map(|entry| entry.vehicle_id).collect();

        let mut by_id: HashMap<i32, _> = self
            .vehicles
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|vehicle| (vehicle.id, vehicle))
            .collect();

        let ordered = ids.iter().filter_map(|id| by_id.remove(id)).collect();
        self.catalog.with_images(ordered).await
    }

    pub async fn add(&self, account_id: i32, vehicle_id: i32) -> Result<(), AppError> {
        let vehicle_exists = self.vehicles.exists(vehicle_id).await?;
        let already_listed = vehicle_exists && self.wishlist.contains(account_id, vehicle_id).await?;
        engagement::check_wishlist_add(vehicle_exists, already_listed)?;

        self.wishlist.add(account_id, vehicle_id).await.map_err(|e| {
            if e.is_unique_violation() {
                EngagementError::AlreadyInWishlist.into()
            } else {
                e
            }
        })?;

        info!("❤️ Vehículo {} añadido a la wishlist de {}", vehicle_id, account_id);
        Ok(())
    }

    pub async fn remove(&self, account_id: i32, vehicle_id: i32) -> Result<(), AppError> {
        if !self.wishlist.remove(account_id, vehicle_id).await? {
            return Err(EngagementError::NotInWishlist.into());
        }
        Ok(())
    }

    pub async fn contains(&self, account_id: i32, vehicle_id: i32) -> Result<bool, AppError> {
        self.wishlist.contains(account_id, vehicle_id).await
    }
}
