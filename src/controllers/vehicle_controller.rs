use sqlx::PgPool;
use tracing::info;

use crate::dto::vehicle_dto::{
    AddImageRequest, CreateVehicleRequest, UpdateVehicleRequest, VehicleImageResponse,
    VehicleResponse,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::VehicleRepository;
use crate::services::catalog_query::{group_images, CatalogQuery};
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    /// Adjuntar a cada vehículo su galería ordenada
    pub async fn with_images(&self, vehicles: Vec<Vehicle>) -> Result<Vec<VehicleResponse>, AppError> {
        if vehicles.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = vehicles.iter().map(|v| v.id).collect();
        let images = self.repository.images_for(&ids).await?;

        Ok(VehicleResponse::with_galleries(vehicles, group_images(images)))
    }

    pub async fn list(&self, query: CatalogQuery) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.search(&query).await?;
        self.with_images(vehicles).await
    }

    /// Detalle de un vehículo en cualquier estado
    pub async fn get(&self, id: i32) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let mut responses = self.with_images(vec![vehicle]).await?;
        responses.pop().ok_or_else(|| not_found_error("Vehicle"))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<VehicleResponse, AppError> {
        let vehicle = self.repository.create(request.into()).await?;
        info!("🚗 Vehículo creado: id={} {} {}", vehicle.id, vehicle.brand, vehicle.model);
        Ok(VehicleResponse::new(vehicle, Vec::new()))
    }

    pub async fn update(&self, id: i32, request: UpdateVehicleRequest) -> Result<(), AppError> {
        if !self.repository.update(id, request.into()).await? {
            return Err(not_found_error("Vehicle"));
        }
        info!("🚗 Vehículo actualizado: id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle"));
        }
        info!("🗑️ Vehículo eliminado: id={}", id);
        Ok(())
    }

    pub async fn add_image(
        &self,
        vehicle_id: i32,
        request: AddImageRequest,
    ) -> Result<VehicleImageResponse, AppError> {
        if !self.repository.exists(vehicle_id).await? {
            return Err(not_found_error("Vehicle"));
        }

        let image = self
            .repository
            .add_image(vehicle_id, request.image_url, request.is_primary, request.display_order)
            .await?;

        Ok(image.into())
    }

    pub async fn delete_image(&self, vehicle_id: i32, image_id: i32) -> Result<(), AppError> {
        if !self.repository.delete_image(vehicle_id, image_id).await? {
            return Err(not_found_error("Image"));
        }
        Ok(())
    }
}
