//! Composición de la consulta del catálogo
//!
//! Filtros opcionales en conjunción sobre vehículos `Available`, con un
//! orden entre {price, year, brand, created_at}. La SQL se arma con
//! `sqlx::QueryBuilder` para que todos los valores viajen como parámetros.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};

use crate::models::vehicle::{VehicleImage, VehicleStatus};

/// Columna de ordenación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Price,
    Year,
    Brand,
    #[default]
    CreatedAt,
}

impl SortKey {
    /// Valores desconocidos caen en `CreatedAt`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_lowercase()).as_deref() {
            Some("price") => SortKey::Price,
            Some("year") => SortKey::Year,
            Some("brand") => SortKey::Brand,
            _ => SortKey::CreatedAt,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Year => "year",
            SortKey::Brand => "brand",
            SortKey::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Sólo "asc" ordena ascendente
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Consulta del catálogo ya normalizada
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub brand: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub is_featured: Option<bool>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

/// Cadenas vacías equivalen a filtro ausente
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CatalogQuery {
    pub fn build(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT * FROM vehicles WHERE status = ");
        builder.push_bind(VehicleStatus::Available.as_str());

        if let Some(brand) = &self.brand {
            builder
                .push(" AND STRPOS(LOWER(brand), LOWER(")
                .push_bind(brand.clone())
                .push(")) > 0");
        }
        if let Some(body_type) = &self.body_type {
            builder.push(" AND body_type = ").push_bind(body_type.clone());
        }
        if let Some(fuel_type) = &self.fuel_type {
            builder.push(" AND fuel_type = ").push_bind(fuel_type.clone());
        }
        if let Some(transmission) = &self.transmission {
            builder.push(" AND transmission = ").push_bind(transmission.clone());
        }
        if let Some(min_price) = self.min_price {
            builder.push(" AND price >= ").push_bind(min_price);
        }
        if let Some(max_price) = self.max_price {
            builder.push(" AND price <= ").push_bind(max_price);
        }
        if let Some(min_year) = self.min_year {
            builder.push(" AND year >= ").push_bind(min_year);
        }
        if let Some(max_year) = self.max_year {
            builder.push(" AND year <= ").push_bind(max_year);
        }
        if let Some(is_featured) = self.is_featured {
            builder.push(" AND is_featured = ").push_bind(is_featured);
        }

        // id como desempate para que el orden sea estable
        builder
            .push(" ORDER BY ")
            .push(self.sort_key.column())
            .push(" ")
            .push(self.sort_order.keyword())
            .push(", id ")
            .push(self.sort_order.keyword());

        builder
    }
}

/// Agrupar imágenes por vehículo en orden de galería
pub fn group_images(images: Vec<VehicleImage>) -> HashMap<i32, Vec<VehicleImage>> {
    let mut grouped: HashMap<i32, Vec<VehicleImage>> = HashMap::new();
    for image in images {
        grouped.entry(image.vehicle_id).or_default().push(image);
    }
    for gallery in grouped.values_mut() {
        gallery.sort_by_key(|image| (image.display_order, image.id));
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_query_lists_available_newest_first() {
        let query = CatalogQuery::default();
        let builder = query.build();

        assert_eq!(
            builder.sql(),
            "SELECT * FROM vehicles WHERE status = $1 ORDER BY created_at DESC, id DESC"
        );
    }

    #[test]
    fn test_filters_are_bound_in_order() {
        let query = CatalogQuery {
            brand: Some("toy".to_string()),
            body_type: Some("MPV".to_string()),
            min_price: Some(Decimal::from(200_000_000)),
            max_year: Some(2024),
            is_featured: Some(true),
            sort_key: SortKey::Price,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let builder = query.build();

        assert_eq!(
            builder.sql(),
            "SELECT * FROM vehicles WHERE status = $1 \
             AND STRPOS(LOWER(brand), LOWER($2)) > 0 \
             AND body_type = $3 \
             AND price >= $4 \
             AND year <= $5 \
             AND is_featured = $6 \
             ORDER BY price ASC, id ASC"
        );
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(SortKey::parse(Some("PRICE")), SortKey::Price);
        assert_eq!(SortKey::parse(Some("year")), SortKey::Year);
        assert_eq!(SortKey::parse(Some("brand")), SortKey::Brand);
        assert_eq!(SortKey::parse(Some("mileage")), SortKey::CreatedAt);
        assert_eq!(SortKey::parse(None), SortKey::CreatedAt);

        assert_eq!(SortOrder::parse(Some("Asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("descending")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(None), SortOrder::Desc);
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some("SUV".to_string())), Some("SUV".to_string()));
    }

    #[test]
    fn test_images_grouped_in_gallery_order() {
        let image = |id, vehicle_id, display_order| VehicleImage {
            id,
            vehicle_id,
            image_url: format!("https://cdn.example.com/{}.jpg", id),
            is_primary: display_order == 0,
            display_order,
            created_at: Utc::now(),
        };

        let grouped = group_images(vec![image(3, 1, 2), image(1, 1, 0), image(2, 2, 0), image(4, 1, 0)]);

        let order: Vec<i32> = grouped[&1].iter().map(|i| i.id).collect();
        assert_eq!(order, vec![1, 4, 3]);
        assert_eq!(grouped[&2].len(), 1);
    }
}
