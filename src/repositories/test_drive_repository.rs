use sqlx::PgPool;

use crate::models::test_drive::{NewTestDrive, TestDriveRecord, TestDriveStatus};
use crate::utils::errors::AppError;

/// SELECT con los datos del cliente y del vehículo
const RECORD_SELECT: &str = r#"
    SELECT td.id, td.account_id, a.full_name AS user_name, a.email AS user_email,
           a.phone_number AS user_phone, td.vehicle_id, v.brand AS vehicle_brand,
           v.model AS vehicle_model, td.requested_date, td.requested_time, td.status,
           td.notes, td.admin_notes, td.approved_by, td.created_at, td.updated_at
    FROM test_drives td
    JOIN accounts a ON a.id = td.account_id
    JOIN vehicles v ON v.id = td.vehicle_id
"#;

pub struct TestDriveRepository {
    pool: PgPool,
}

impl TestDriveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_account(&self, account_id: i32) -> Result<Vec<TestDriveRecord>, AppError> {
        let query = format!(
            "{} WHERE td.account_id = $1 ORDER BY td.created_at DESC, td.id DESC",
            RECORD_SELECT
        );
        let records = sqlx::query_as::<_, TestDriveRecord>(&query)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Todas las solicitudes, opcionalmente filtradas por estado
    pub async fn list_all(&self, status: Option<TestDriveStatus>) -> Result<Vec<TestDriveRecord>, AppError> {
        let query = format!(
            "{} WHERE ($1::TEXT IS NULL OR td.status = $1) ORDER BY td.created_at DESC, td.id DESC",
            RECORD_SELECT
        );
        let records = sqlx::query_as::<_, TestDriveRecord>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<TestDriveRecord>, AppError> {
        let query = format!("{} WHERE td.id = $1", RECORD_SELECT);
        let record = sqlx::query_as::<_, TestDriveRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    pub async fn create(&self, request: NewTestDrive) -> Result<i32, AppError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO test_drives (account_id, vehicle_id, requested_date, requested_time, notes, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(request.account_id)
        .bind(request.vehicle_id)
        .bind(request.requested_date)
        .bind(request.requested_time)
        .bind(request.notes)
        .bind(TestDriveStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Cambio de estado del administrador; las notas se sobrescriben
    pub async fn set_status_by_admin(
        &self,
        id: i32,
        status: TestDriveStatus,
        admin_notes: Option<String>,
        admin_id: i32,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE test_drives
            SET status = $2, admin_notes = $3, approved_by = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(admin_notes)
        .bind(admin_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_status(&self, id: i32, status: TestDriveStatus) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE test_drives SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
