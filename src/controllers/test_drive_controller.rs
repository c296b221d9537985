use sqlx::PgPool;
use tracing::{info, warn};

use crate::dto::test_drive_dto::{CreateTestDriveRequest, TestDriveResponse, UpdateTestDriveStatusRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::test_drive::{NewTestDrive, TestDriveRecord, TestDriveStatus};
use crate::repositories::{TestDriveRepository, VehicleRepository};
use crate::services::engagement::{self, EngagementError};
use crate::utils::errors::AppError;

pub struct TestDriveController {
    test_drives: TestDriveRepository,
    vehicles: VehicleRepository,
}

impl TestDriveController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            test_drives: TestDriveRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    async fn find(&self, id: i32) -> Result<TestDriveRecord, AppError> {
        self.test_drives
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngagementError::TestDriveNotFound.into())
    }

    pub async fn list_own(&self, account_id: i32) -> Result<Vec<TestDriveResponse>, AppError> {
        let records = self.test_drives.list_for_account(account_id).await?;
        Ok(records.into_iter().map(TestDriveResponse::from).collect())
    }

    pub async fn list_all(&self, status: Option<TestDriveStatus>) -> Result<Vec<TestDriveResponse>, AppError> {
        let records = self.test_drives.list_all(status).await?;
        Ok(records.into_iter().map(TestDriveResponse::from).collect())
    }

    pub async fn get(&self, id: i32, user: &AuthenticatedUser) -> Result<TestDriveResponse, AppError> {
        let record = self.find(id).await?;
        engagement::ensure_owner_or_admin(record.account_id, user.account_id, user.role)?;
        Ok(record.into())
    }

    pub async fn create(
        &self,
        account_id: i32,
        request: CreateTestDriveRequest,
    ) -> Result<TestDriveResponse, AppError> {
        if !self.vehicles.exists(request.vehicle_id).await? {
            return Err(EngagementError::VehicleNotFound.into());
        }

        let id = self
            .test_drives
            .create(NewTestDrive {
                account_id,
                vehicle_id: request.vehicle_id,
                requested_date: request.requested_date,
                requested_time: request.requested_time,
                notes: request.notes,
            })
            .await?;

        info!("📅 Prueba de manejo {} solicitada por {}", id, account_id);
        Ok(self.find(id).await?.into())
    }

    /// El administrador puede asignar cualquier estado
    pub async fn update_status(
        &self,
        id: i32,
        admin_id: i32,
        request: UpdateTestDriveStatusRequest,
    ) -> Result<(), AppError> {
        let record = self.find(id).await?;
        let next = engagement::admin_set_test_drive_status(record.status, &request.status)?;

        self.test_drives
            .set_status_by_admin(id, next, request.admin_notes, admin_id)
            .await?;

        info!("📅 Prueba de manejo {}: {} -> {}", id, record.status, next);
        Ok(())
    }

    /// Cancelación por parte del cliente dueño de la solicitud
    pub async fn cancel(&self, id: i32, account_id: i32) -> Result<(), AppError> {
        let record = self.find(id).await?;

        let next = engagement::cancel_test_drive(record.account_id, record.status, account_id)
            .map_err(|e| {
                warn!("⚠️ Cancelación de prueba {} rechazada: {}", id, e);
                e
            })?;

        self.test_drives.set_status(id, next).await?;
        info!("📅 Prueba de manejo {} cancelada por su dueño", id);
        Ok(())
    }
}
