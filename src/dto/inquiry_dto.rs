use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::inquiry::{InquiryRecord, InquiryStatus};
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    pub vehicle_id: i32,
    #[validate(length(min = 1, max = 200), custom = "validate_not_blank")]
    pub subject: String,
    #[validate(length(min = 1), custom = "validate_not_blank")]
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondInquiryRequest {
    #[validate(length(min = 1), custom = "validate_not_blank")]
    pub admin_response: String,
    #[validate(length(min = 1, max = 50))]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InquiryFilter {
    pub status: Option<InquiryStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryResponse {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub vehicle_id: i32,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub subject: String,
    pub message: String,
    pub status: InquiryStatus,
    pub admin_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<InquiryRecord> for InquiryResponse {
    fn from(record: InquiryRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.account_id,
            user_name: record.user_name,
            user_email: record.user_email,
            vehicle_id: record.vehicle_id,
            vehicle_brand: record.vehicle_brand,
            vehicle_model: record.vehicle_model,
            subject: record.subject,
            message: record.message,
            status: record.status,
            admin_response: record.admin_response,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
