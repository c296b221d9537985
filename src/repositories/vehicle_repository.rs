use sqlx::{PgConnection, PgPool};

use crate::models::vehicle::{NewVehicle, StockLevel, Vehicle, VehicleChanges, VehicleImage};
use crate::services::catalog_query::CatalogQuery;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn search(&self, query: &CatalogQuery) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = query
            .build()
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn create(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                brand, model, year, price, color, fuel_type, transmission, mileage,
                engine_capacity, seats, body_type, description, features, stock,
                status, is_featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 'Available', $15)
            RETURNING *
            "#,
        )
        .bind(vehicle.brand)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.price)
        .bind(vehicle.color)
        .bind(vehicle.fuel_type)
        .bind(vehicle.transmission)
        .bind(vehicle.mileage)
        .bind(vehicle.engine_capacity)
        .bind(vehicle.seats)
        .bind(vehicle.body_type)
        .bind(vehicle.description)
        .bind(vehicle.features)
        .bind(vehicle.stock)
        .bind(vehicle.is_featured)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Actualización parcial: los campos `None` conservan el valor almacenado
    pub async fn update(&self, id: i32, changes: VehicleChanges) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles SET
                brand = COALESCE($2, brand),
                model = COALESCE($3, model),
                year = COALESCE($4, year),
                price = COALESCE($5, price),
                color = COALESCE($6, color),
                fuel_type = COALESCE($7, fuel_type),
                transmission = COALESCE($8, transmission),
                mileage = COALESCE($9, mileage),
                engine_capacity = COALESCE($10, engine_capacity),
                seats = COALESCE($11, seats),
                body_type = COALESCE($12, body_type),
                description = COALESCE($13, description),
                features = COALESCE($14, features),
                stock = COALESCE($15, stock),
                status = COALESCE($16, status),
                is_featured = COALESCE($17, is_featured),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.brand)
        .bind(changes.model)
        .bind(changes.year)
        .bind(changes.price)
        .bind(changes.color)
        .bind(changes.fuel_type)
        .bind(changes.transmission)
        .bind(changes.mileage)
        .bind(changes.engine_capacity)
        .bind(changes.seats)
        .bind(changes.body_type)
        .bind(changes.description)
        .bind(changes.features)
        .bind(changes.stock)
        .bind(changes.status.map(|status| status.as_str()))
        .bind(changes.is_featured)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Imágenes de varios vehículos en orden de galería
    pub async fn images_for(&self, vehicle_ids: &[i32]) -> Result<Vec<VehicleImage>, AppError> {
        let images = sqlx::query_as::<_, VehicleImage>(
            "SELECT * FROM vehicle_images WHERE vehicle_id = ANY($1) ORDER BY display_order, id",
        )
        .bind(vehicle_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    pub async fn add_image(
        &self,
        vehicle_id: i32,
        image_url: String,
        is_primary: bool,
        display_order: i32,
    ) -> Result<VehicleImage, AppError> {
        let image = sqlx::query_as::<_, VehicleImage>(
            r#"
            INSERT INTO vehicle_images (vehicle_id, image_url, is_primary, display_order)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(image_url)
        .bind(is_primary)
        .bind(display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    pub async fn delete_image(&self, vehicle_id: i32, image_id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicle_images WHERE id = $1 AND vehicle_id = $2")
            .bind(image_id)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Leer el vehículo bloqueando su fila hasta el commit
    pub async fn lock_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(vehicle)
    }

    pub async fn set_stock(conn: &mut PgConnection, id: i32, level: StockLevel) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicles SET stock = $2, status = $3, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(level.stock)
            .bind(level.status.as_str())
            .execute(conn)
            .await?;

        Ok(())
    }
}
