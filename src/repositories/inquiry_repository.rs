use sqlx::PgPool;

use crate::models::inquiry::{InquiryRecord, InquiryStatus, NewInquiry};
use crate::utils::errors::AppError;

const RECORD_SELECT: &str = r#"
    SELECT i.id, i.account_id, a.full_name AS user_name, a.email AS user_email,
           i.vehicle_id, v.brand AS vehicle_brand, v.model AS vehicle_model,
           i.subject, i.message, i.status, i.admin_response, i.responded_by,
           i.created_at, i.updated_at
    FROM inquiries i
    JOIN accounts a ON a.id = i.account_id
    JOIN vehicles v ON v.id = i.vehicle_id
"#;

pub struct InquiryRepository {
    pool: PgPool,
}

impl InquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_account(&self, account_id: i32) -> Result<Vec<InquiryRecord>, AppError> {
        let query = format!(
            "{} WHERE i.account_id = $1 ORDER BY i.created_at DESC, i.id DESC",
            RECORD_SELECT
        );
        let records = sqlx::query_as::<_, InquiryRecord>(&query)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    pub async fn list_all(&self, status: Option<InquiryStatus>) -> Result<Vec<InquiryRecord>, AppError> {
        let query = format!(
            "{} WHERE ($1::TEXT IS NULL OR i.status = $1) ORDER BY i.created_at DESC, i.id DESC",
            RECORD_SELECT
        );
        let records = sqlx::query_as::<_, InquiryRecord>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<InquiryRecord>, AppError> {
        let query = format!("{} WHERE i.id = $1", RECORD_SELECT);
        let record = sqlx::query_as::<_, InquiryRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    pub async fn create(&self, inquiry: NewInquiry) -> Result<i32, AppError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO inquiries (account_id, vehicle_id, subject, message, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(inquiry.account_id)
        .bind(inquiry.vehicle_id)
        .bind(inquiry.subject)
        .bind(inquiry.message)
        .bind(InquiryStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn respond(
        &self,
        id: i32,
        response: String,
        status: InquiryStatus,
        admin_id: i32,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE inquiries
            SET admin_response = $2, status = $3, responded_by = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(response)
        .bind(status.as_str())
        .bind(admin_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
