use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges, VehicleImage, VehicleStatus};
use crate::services::catalog_query::{non_blank, CatalogQuery, SortKey, SortOrder};
use crate::utils::validation::{validate_not_blank, validate_price};

// Filtros del catálogo (query string)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    pub brand: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub is_featured: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl From<VehicleQuery> for CatalogQuery {
    fn from(query: VehicleQuery) -> Self {
        Self {
            sort_key: SortKey::parse(query.sort_by.as_deref()),
            sort_order: SortOrder::parse(query.sort_order.as_deref()),
            brand: non_blank(query.brand),
            body_type: non_blank(query.body_type),
            fuel_type: non_blank(query.fuel_type),
            transmission: non_blank(query.transmission),
            min_price: query.min_price,
            max_price: query.max_price,
            min_year: query.min_year,
            max_year: query.max_year,
            is_featured: query.is_featured,
        }
    }
}

// Alta de vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub brand: String,
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(custom = "validate_price")]
    pub price: Decimal,
    #[validate(length(max = 50))]
    pub color: Option<String>,
    #[validate(length(max = 50))]
    pub fuel_type: Option<String>,
    #[validate(length(max = 50))]
    pub transmission: Option<String>,
    pub mileage: Option<i32>,
    #[validate(length(max = 20))]
    pub engine_capacity: Option<String>,
    pub seats: Option<i32>,
    #[validate(length(max = 50))]
    pub body_type: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    #[serde(default = "default_stock")]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[serde(default)]
    pub is_featured: bool,
}

fn default_stock() -> i32 {
    1
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Self {
            brand: request.brand,
            model: request.model,
            year: request.year,
            price: request.price,
            color: request.color,
            fuel_type: request.fuel_type,
            transmission: request.transmission,
            mileage: request.mileage,
            engine_capacity: request.engine_capacity,
            seats: request.seats,
            body_type: request.body_type,
            description: request.description,
            features: request.features,
            stock: request.stock,
            is_featured: request.is_featured,
        }
    }
}

// Actualización parcial de vehículo
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    #[validate(custom = "validate_price")]
    pub price: Option<Decimal>,
    #[validate(length(max = 50))]
    pub color: Option<String>,
    #[validate(length(max = 50))]
    pub fuel_type: Option<String>,
    #[validate(length(max = 50))]
    pub transmission: Option<String>,
    pub mileage: Option<i32>,
    #[validate(length(max = 20))]
    pub engine_capacity: Option<String>,
    pub seats: Option<i32>,
    #[validate(length(max = 50))]
    pub body_type: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub status: Option<VehicleStatus>,
    pub is_featured: Option<bool>,
}

impl From<UpdateVehicleRequest> for VehicleChanges {
    fn from(request: UpdateVehicleRequest) -> Self {
        Self {
            brand: request.brand,
            model: request.model,
            year: request.year,
            price: request.price,
            color: request.color,
            fuel_type: request.fuel_type,
            transmission: request.transmission,
            mileage: request.mileage,
            engine_capacity: request.engine_capacity,
            seats: request.seats,
            body_type: request.body_type,
            description: request.description,
            features: request.features,
            stock: request.stock,
            status: request.status,
            is_featured: request.is_featured,
        }
    }
}

// Alta de imagen en la galería
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddImageRequest {
    #[validate(length(min = 1, max = 500), custom = "validate_not_blank")]
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub display_order: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleImageResponse {
    pub id: i32,
    pub image_url: String,
    pub is_primary: bool,
    pub display_order: i32,
}

impl From<VehicleImage> for VehicleImageResponse {
    fn from(image: VehicleImage) -> Self {
        Self {
            id: image.id,
            image_url: image.image_url,
            is_primary: image.is_primary,
            display_order: image.display_order,
        }
    }
}

// Vehículo con su galería
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
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
    pub status: VehicleStatus,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub images: Vec<VehicleImageResponse>,
}

impl VehicleResponse {
    pub fn new(vehicle: Vehicle, images: Vec<VehicleImage>) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            price: vehicle.price,
            color: vehicle.color,
            fuel_type: vehicle.fuel_type,
            transmission: vehicle.transmission,
            mileage: vehicle.mileage,
            engine_capacity: vehicle.engine_capacity,
            seats: vehicle.seats,
            body_type: vehicle.body_type,
            description: vehicle.description,
            features: vehicle.features,
            stock: vehicle.stock,
            status: vehicle.status,
            is_featured: vehicle.is_featured,
            created_at: vehicle.created_at,
            images: images.into_iter().map(VehicleImageResponse::from).collect(),
        }
    }

    /// Emparejar cada vehículo con sus imágenes ya agrupadas
    pub fn with_galleries(
        vehicles: Vec<Vehicle>,
        mut galleries: HashMap<i32, Vec<VehicleImage>>,
    ) -> Vec<Self> {
        vehicles
            .into_iter()
            .map(|vehicle| {
                let images = galleries.remove(&vehicle.id).unwrap_or_default();
                Self::new(vehicle, images)
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistCheckResponse {
    pub in_wishlist: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let request: CreateVehicleRequest = serde_json::from_str(
            r#"{"brand":"Honda","model":"CR-V","year":2024,"price":"550000000"}"#,
        )
        .unwrap();

        assert_eq!(request.stock, 1);
        assert!(!request.is_featured);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_out_of_range_values() {
        let request: CreateVehicleRequest = serde_json::from_str(
            r#"{"brand":"","model":"CR-V","year":1850,"price":"-1","stock":-2}"#,
        )
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["brand", "year", "price", "stock"] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_update_request_is_partial() {
        let request: UpdateVehicleRequest = serde_json::from_str(r#"{"stock":0,"status":"Sold"}"#).unwrap();
        assert!(request.validate().is_ok());

        let changes = VehicleChanges::from(request);
        assert_eq!(changes.stock, Some(0));
        assert_eq!(changes.status, Some(VehicleStatus::Sold));
        assert!(changes.brand.is_none());
        assert!(changes.price.is_none());
    }

    #[test]
    fn test_query_normalization() {
        let query = CatalogQuery::from(VehicleQuery {
            brand: Some(String::new()),
            fuel_type: Some("Diesel".to_string()),
            sort_by: Some("year".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        });

        assert_eq!(query.brand, None);
        assert_eq!(query.fuel_type.as_deref(), Some("Diesel"));
        assert_eq!(query.sort_key, SortKey::Year);
        assert_eq!(query.sort_order, SortOrder::Asc);
    }
}
