//! Datos iniciales: cuenta de administrador y catálogo de ejemplo
//!
//! Sólo se montan cuando `SEED_ROUTES_ENABLED` está activo.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::models::account::{NewAccount, Role};
use crate::models::vehicle::NewVehicle;
use crate::repositories::{AccountRepository, VehicleRepository};
use crate::services::auth_service;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@carshowroom.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin123!";
const DEFAULT_ADMIN_NAME: &str = "Super Admin";

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

pub struct SeedController {
    accounts: AccountRepository,
    vehicles: VehicleRepository,
    bcrypt_cost: u32,
}

impl SeedController {
    pub fn new(state: &AppState) -> Self {
        Self {
            accounts: AccountRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    async fn create_default_admin(&self) -> Result<(), AppError> {
        let password_hash = auth_service::hash_password(DEFAULT_ADMIN_PASSWORD, self.bcrypt_cost)?;
        self.accounts
            .create(NewAccount {
                role: Role::Admin,
                full_name: DEFAULT_ADMIN_NAME.to_string(),
                email: DEFAULT_ADMIN_EMAIL.to_string(),
                password_hash,
                phone_number: None,
                address: None,
            })
            .await?;
        Ok(())
    }

    /// Crear el administrador por defecto si no existe
    pub async fn seed_admin(&self) -> Result<SeedResponse, AppError> {
        if self
            .accounts
            .find_by_email(Role::Admin, DEFAULT_ADMIN_EMAIL)
            .await?
            .is_some()
        {
            return Ok(SeedResponse {
                message: "Admin already exists".to_string(),
                email: Some(DEFAULT_ADMIN_EMAIL.to_string()),
                password: None,
                count: None,
            });
        }

        self.create_default_admin().await?;
        info!("🌱 Administrador por defecto creado");

        Ok(SeedResponse {
            message: "Admin account created successfully!".to_string(),
            email: Some(DEFAULT_ADMIN_EMAIL.to_string()),
            password: Some(DEFAULT_ADMIN_PASSWORD.to_string()),
            count: None,
        })
    }

    /// Borrar y recrear el administrador por defecto
    pub async fn reset_admin(&self) -> Result<SeedResponse, AppError> {
        self.accounts
            .delete_by_email(Role::Admin, DEFAULT_ADMIN_EMAIL)
            .await?;
        self.create_default_admin().await?;
        info!("🌱 Administrador por defecto recreado");

        Ok(SeedResponse {
            message: "Admin account reset successfully!".to_string(),
            email: Some(DEFAULT_ADMIN_EMAIL.to_string()),
            password: Some(DEFAULT_ADMIN_PASSWORD.to_string()),
            count: None,
        })
    }

    /// Cargar el catálogo de ejemplo si no hay vehículos
    pub async fn seed_vehicles(&self) -> Result<SeedResponse, AppError> {
        let existing = self.vehicles.count().await?;
        if existing > 0 {
            return Ok(SeedResponse {
                message: "Vehicles already exist in database".to_string(),
                email: None,
                password: None,
                count: Some(existing),
            });
        }

        let catalog = sample_vehicles();
        let count = catalog.len() as i64;
        for vehicle in catalog {
            self.vehicles.create(vehicle).await?;
        }
        info!("🌱 {} vehículos de ejemplo cargados", count);

        Ok(SeedResponse {
            message: "Sample vehicles seeded successfully".to_string(),
            email: None,
            password: None,
            count: Some(count),
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    brand: &str,
    model: &str,
    price: i64,
    color: &str,
    fuel_type: &str,
    transmission: &str,
    engine_capacity: &str,
    seats: i32,
    body_type: &str,
    description: &str,
    features: &str,
    stock: i32,
    is_featured: bool,
) -> NewVehicle {
    NewVehicle {
        brand: brand.to_string(),
        model: model.to_string(),
        year: 2024,
        price: Decimal::from(price),
        color: Some(color.to_string()),
        fuel_type: Some(fuel_type.to_string()),
        transmission: Some(transmission.to_string()),
        mileage: Some(0),
        engine_capacity: Some(engine_capacity.to_string()),
        seats: Some(seats),
        body_type: Some(body_type.to_string()),
        description: Some(description.to_string()),
        features: Some(features.to_string()),
        stock,
        is_featured,
    }
}

/// Catálogo de ejemplo
pub fn sample_vehicles() -> Vec<NewVehicle> {
    vec![
        sample(
            "Toyota", "Avanza", 250_000_000, "Silver", "Bensin", "Manual", "1500cc", 7, "MPV",
            "Toyota Avanza 2024 - MPV keluarga yang nyaman dan irit bahan bakar dengan desain modern",
            "AC, Power Steering, Power Window, Central Lock, Audio System, Airbags",
            5, true,
        ),
        sample(
            "Honda", "CR-V", 550_000_000, "Black", "Bensin", "CVT", "1500cc", 5, "SUV",
            "Honda CR-V 2024 - SUV premium dengan teknologi terkini dan performa maksimal",
            "AC, Power Steering, Power Window, Central Lock, Audio System, Sunroof, Leather Seats, Cruise Control, Honda Sensing",
            3, true,
        ),
        sample(
            "Mitsubishi", "Xpander", 280_000_000, "White", "Bensin", "Automatic", "1500cc", 7, "MPV",
            "Mitsubishi Xpander 2024 - MPV stylish dengan desain modern dan kabin luas",
            "AC, Power Steering, Power Window, Central Lock, Audio System, Touchscreen Display, Rear Camera",
            4, true,
        ),
        sample(
            "Suzuki", "Ertiga", 230_000_000, "Blue", "Bensin", "Manual", "1500cc", 7, "MPV",
            "Suzuki Ertiga 2024 - MPV ekonomis untuk keluarga Indonesia dengan efisiensi bahan bakar terbaik",
            "AC, Power Steering, Power Window, Central Lock, Audio System",
            6, false,
        ),
        sample(
            "Daihatsu", "Terios", 270_000_000, "Red", "Bensin", "Automatic", "1500cc", 7, "SUV",
            "Daihatsu Terios 2024 - SUV tangguh untuk petualangan keluarga dengan ground clearance tinggi",
            "AC, Power Steering, Power Window, Central Lock, Audio System, Fog Lamp, Roof Rack",
            3, false,
        ),
        sample(
            "Toyota", "Fortuner", 650_000_000, "White", "Diesel", "Automatic", "2400cc", 7, "SUV",
            "Toyota Fortuner 2024 - SUV premium dengan mesin diesel bertenaga dan interior mewah",
            "AC, Power Steering, Power Window, Central Lock, Audio System, Leather Seats, Sunroof, 4WD, Hill Start Assist",
            2, true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog() {
        let catalog = sample_vehicles();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.iter().filter(|v| v.is_featured).count(), 4);
        assert!(catalog.iter().all(|v| v.stock > 0 && v.price > Decimal::ZERO));
        assert_eq!(catalog.iter().map(|v| v.stock).sum::<i32>(), 23);
    }
}
