//! Modelo de Inquiry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

text_enum! {
    /// Estado de una consulta de venta
    InquiryStatus {
        Pending => "Pending",
        Responded => "Responded",
        Resolved => "Resolved",
        Closed => "Closed",
    }
}

/// Consulta con los datos del cliente y del vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InquiryRecord {
    pub id: i32,
    pub account_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub vehicle_id: i32,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub subject: String,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: InquiryStatus,
    pub admin_response: Option<String>,
    pub responded_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub account_id: i32,
    pub vehicle_id: i32,
    pub subject: String,
    pub message: String,
}
