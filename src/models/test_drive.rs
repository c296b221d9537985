//! Modelo de TestDrive

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

text_enum! {
    /// Estado de una solicitud de prueba de manejo
    TestDriveStatus {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

/// Solicitud de prueba de manejo con los datos del cliente y del vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestDriveRecord {
    pub id: i32,
    pub account_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub vehicle_id: i32,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub requested_date: NaiveDate,
    pub requested_time: String,
    #[sqlx(try_from = "String")]
    pub status: TestDriveStatus,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub approved_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Datos para insertar una solicitud nueva
#[derive(Debug, Clone)]
pub struct NewTestDrive {
    pub account_id: i32,
    pub vehicle_id: i32,
    pub requested_date: NaiveDate,
    pub requested_time: String,
    pub notes: Option<String>,
}
