use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::test_drive::{TestDriveRecord, TestDriveStatus};
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestDriveRequest {
    pub vehicle_id: i32,
    pub requested_date: NaiveDate,
    // franja libre, p. ej. "10:00 - 11:00"
    #[validate(length(min = 1, max = 20), custom = "validate_not_blank")]
    pub requested_time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestDriveStatusRequest {
    #[validate(length(min = 1, max = 50))]
    pub status: String,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TestDriveFilter {
    pub status: Option<TestDriveStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDriveResponse {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub vehicle_id: i32,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub requested_date: NaiveDate,
    pub requested_time: String,
    pub status: TestDriveStatus,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TestDriveRecord> for TestDriveResponse {
    fn from(record: TestDriveRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.account_id,
            user_name: record.user_name,
            user_email: record.user_email,
            user_phone: record.user_phone,
            vehicle_id: record.vehicle_id,
            vehicle_brand: record.vehicle_brand,
            vehicle_model: record.vehicle_model,
            requested_date: record.requested_date,
            requested_time: record.requested_time,
            status: record.status,
            notes: record.notes,
            admin_notes: record.admin_notes,
            created_at: record.created_at,
        }
    }
}
