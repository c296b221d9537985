//! Controller de transacciones
//!
//! Cada operación que escribe abre una transacción de base de datos, bloquea
//! las filas implicadas y aplica el plan calculado por el motor de órdenes.
//! Si algo falla antes del commit, el drop de la transacción hace rollback.

use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::dto::transaction_dto::{
    CreateTransactionRequest, TransactionResponse, UpdateTransactionStatusRequest,
    UploadPaymentProofRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::transaction::{TransactionRecord, TransactionStatus};
use crate::repositories::{TransactionRepository, VehicleRepository};
use crate::services::engagement;
use crate::services::order_engine::{self, OrderError, StockMovement};
use crate::utils::errors::AppError;

pub struct TransactionController {
    pool: PgPool,
    transactions: TransactionRepository,
}

impl TransactionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            transactions: TransactionRepository::new(pool.clone()),
            pool,
        }
    }

    async fn load(&self, id: i32) -> Result<TransactionResponse, AppError> {
        let record = self
            .transactions
            .find_record(id)
            .await?
            .ok_or(OrderError::TransactionNotFound)?;
        let payment = self.transactions.payments_for(&[id]).await?.into_iter().next();

        Ok(TransactionResponse::new(record, payment))
    }

    /// Crear una compra: transacción, pago y stock en una sola unidad
    pub async fn create(
        &self,
        account_id: i32,
        request: CreateTransactionRequest,
    ) -> Result<TransactionResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let vehicle = VehicleRepository::lock_by_id(&mut tx, request.vehicle_id).await?;
        let plan = order_engine::plan_purchase(vehicle.as_ref(), &request.payment_method, Utc::now())
            .map_err(|e| {
                warn!("⚠️ Compra del vehículo {} rechazada: {}", request.vehicle_id, e);
                e
            })?;

        if plan.stock_movement == StockMovement::Taken {
            VehicleRepository::set_stock(&mut tx, plan.vehicle_id, plan.stock_after).await?;
        }

        let transaction = TransactionRepository::insert(&mut tx, account_id, &plan).await?;
        TransactionRepository::insert_payment(&mut tx, &transaction, &plan).await?;

        tx.commit().await?;

        info!(
            "💰 Transacción {} creada: vehículo={} método={} estado={} stock={}",
            transaction.id,
            plan.vehicle_id,
            plan.payment_method,
            plan.transaction_status,
            plan.stock_after.stock
        );

        self.load(transaction.id).await
    }

    pub async fn list_own(&self, account_id: i32) -> Result<Vec<TransactionResponse>, AppError> {
        let records = self.transactions.list_for_account(account_id).await?;
        self.attach_payments(records).await
    }

    pub async fn list_all(&self, status: Option<TransactionStatus>) -> Result<Vec<TransactionResponse>, AppError> {
        let records = self.transactions.list_all(status).await?;
        self.attach_payments(records).await
    }

    async fn attach_payments(
        &self,
        records: Vec<TransactionRecord>,
    ) -> Result<Vec<TransactionResponse>, AppError> {
        let ids: Vec<i32> = records.iter().map(|r| r.transaction.id).collect();
        let payments = if ids.is_empty() {
            Vec::new()
        } else {
            self.transactions.payments_for(&ids).await?
        };

        Ok(TransactionResponse::with_payments(records, payments))
    }

    pub async fn get(&self, id: i32, user: &AuthenticatedUser) -> Result<TransactionResponse, AppError> {
        let response = self.load(id).await?;
        engagement::ensure_owner_or_admin(response.user_id, user.account_id, user.role)?;
        Ok(response)
    }

    /// Cambio de estado administrativo con reconciliación de stock
    pub async fn update_status(
        &self,
        id: i32,
        request: UpdateTransactionStatusRequest,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let transaction = TransactionRepository::lock_by_id(&mut tx, id)
            .await?
            .ok_or(OrderError::TransactionNotFound)?;

        // validar el estado antes de bloquear el vehículo
        order_engine::parse_settable_status(&request.status)?;

        let vehicle = VehicleRepository::lock_by_id(&mut tx, transaction.vehicle_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Transaction {} references a missing vehicle", id)))?;

        let plan = order_engine::plan_status_change(
            &transaction,
            (&vehicle).into(),
            &request.status,
            Utc::now(),
        )
        .map_err(|e| {
            warn!("⚠️ Cambio de estado de la transacción {} rechazado: {}", id, e);
            e
        })?;

        TransactionRepository::apply_status_change(&mut tx, id, &plan, request.admin_notes.as_deref())
            .await?;

        if plan.stock_movement != StockMovement::None {
            VehicleRepository::set_stock(&mut tx, vehicle.id, plan.stock_after).await?;
        }

        tx.commit().await?;

        info!(
            "💰 Transacción {}: {} -> {} (stock {:?}, vehículo {} stock={} estado={})",
            id,
            plan.old_status,
            plan.new_status,
            plan.stock_movement,
            vehicle.id,
            plan.stock_after.stock,
            plan.stock_after.status
        );
        Ok(())
    }

    /// Adjuntar la URL del comprobante a una transacción pendiente propia
    pub async fn upload_payment_proof(
        &self,
        id: i32,
        account_id: i32,
        request: UploadPaymentProofRequest,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let transaction = TransactionRepository::lock_owned(&mut tx, id, account_id).await?;
        let payment = match &transaction {
            Some(t) => TransactionRepository::payment_of(&mut tx, t.id).await?,
            None => None,
        };

        order_engine::check_proof_upload(transaction.as_ref(), payment.as_ref())?;

        if let Some(payment) = payment {
            TransactionRepository::set_proof_url(&mut tx, payment.id, &request.payment_proof_url).await?;
        }

        tx.commit().await?;

        info!("🧾 Comprobante de pago adjuntado a la transacción {}", id);
        Ok(())
    }
}
