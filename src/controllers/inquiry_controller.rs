use sqlx::PgPool;
use tracing::info;

use crate::dto::inquiry_dto::{CreateInquiryRequest, InquiryResponse, RespondInquiryRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::inquiry::{InquiryRecord, InquiryStatus, NewInquiry};
use crate::repositories::{InquiryRepository, VehicleRepository};
use crate::services::engagement::{self, EngagementError};
use crate::utils::errors::AppError;

pub struct InquiryController {
    inquiries: InquiryRepository,
    vehicles: VehicleRepository,
}

impl InquiryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            inquiries: InquiryRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    async fn find(&self, id: i32) -> Result<InquiryRecord, AppError> {
        self.inquiries
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngagementError::InquiryNotFound.into())
    }

    pub async fn list_own(&self, account_id: i32) -> Result<Vec<InquiryResponse>, AppError> {
        let records = self.inquiries.list_for_account(account_id).await?;
        Ok(records.into_iter().map(InquiryResponse::from).collect())
    }

    pub async fn list_all(&self, status: Option<InquiryStatus>) -> Result<Vec<InquiryResponse>, AppError> {
        let records = self.inquiries.list_all(status).await?;
        Ok(records.into_iter().map(InquiryResponse::from).collect())
    }

    pub async fn get(&self, id: i32, user: &AuthenticatedUser) -> Result<InquiryResponse, AppError> {
        let record = self.find(id).await?;
        engagement::ensure_owner_or_admin(record.account_id, user.account_id, user.role)?;
        Ok(record.into())
    }

    pub async fn create(&self, account_id: i32, request: CreateInquiryRequest) -> Result<InquiryResponse, AppError> {
        if !self.vehicles.exists(request.vehicle_id).await? {
            return Err(EngagementError::VehicleNotFound.into());
        }

        let id = self
            .inquiries
            .create(NewInquiry {
                account_id,
                vehicle_id: request.vehicle_id,
                subject: request.subject,
                message: request.message,
            })
            .await?;

        info!("✉️ Consulta {} creada por {}", id, account_id);
        Ok(self.find(id).await?.into())
    }

    /// Guardar la respuesta y el estado elegido por el administrador
    pub async fn respond(&self, id: i32, admin_id: i32, request: RespondInquiryRequest) -> Result<(), AppError> {
        let record = self.find(id).await?;
        let next = engagement::admin_set_inquiry_status(record.status, &request.status)?;

        self.inquiries
            .respond(id, request.admin_response, next, admin_id)
            .await?;

        info!("✉️ Consulta {} respondida: {} -> {}", id, record.status, next);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.inquiries.delete(id).await? {
            return Err(EngagementError::InquiryNotFound.into());
        }
        info!("🗑️ Consulta {} eliminada", id);
        Ok(())
    }
}
