use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Entrada de la wishlist: par único (cuenta, vehículo)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WishlistEntry {
    pub id: i32,
    pub account_id: i32,
    pub vehicle_id: i32,
    pub created_at: DateTime<Utc>,
}
