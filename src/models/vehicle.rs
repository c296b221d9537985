//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, sus imágenes y el estado de venta.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

text_enum! {
    /// Estado del vehículo en el catálogo
    VehicleStatus {
        Available => "Available",
        Sold => "Sold",
        Reserved => "Reserved",
    }
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub color: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub mileage: Option<i32>,
    pub engine_capacity: Option<String>,
    pub seats: Option<i32>,
    pub body_type: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub stock: i32,
    #[sqlx(try_from = "String")]
    pub status: VehicleStatus,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Imagen de la galería de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleImage {
    pub id: i32,
    pub vehicle_id: i32,
    pub image_url: String,
    pub is_primary: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar un vehículo nuevo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub color: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub mileage: Option<i32>,
    pub engine_capacity: Option<String>,
    pub seats: Option<i32>,
    pub body_type: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub stock: i32,
    pub is_featured: bool,
}

/// Cambios parciales: `None` deja el valor almacenado intacto
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub color: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub mileage: Option<i32>,
    pub engine_capacity: Option<String>,
    pub seats: Option<i32>,
    pub body_type: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub stock: Option<i32>,
    pub status: Option<VehicleStatus>,
    pub is_featured: Option<bool>,
}

/// Stock y estado acoplados de un vehículo bloqueado para escritura
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub stock: i32,
    pub status: VehicleStatus,
}

impl From<&Vehicle> for StockLevel {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            stock: vehicle.stock,
            status: vehicle.status,
        }
    }
}
