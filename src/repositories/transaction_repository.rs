//! Repositorio de transacciones y pagos
//!
//! Las lecturas usan el pool. Las escrituras del motor de órdenes son
//! funciones asociadas que reciben la conexión de una transacción abierta.

use sqlx::{PgConnection, PgPool};

use crate::models::transaction::{Payment, PaymentStatus, Transaction, TransactionRecord, TransactionStatus};
use crate::services::order_engine::{PaymentUpdate, PurchasePlan, StatusChangePlan};
use crate::utils::errors::AppError;

const RECORD_SELECT: &str = r#"
    SELECT t.*, a.full_name AS user_name, a.email AS user_email,
           v.brand AS vehicle_brand, v.model AS vehicle_model, v.year AS vehicle_year
    FROM transactions t
    JOIN accounts a ON a.id = t.account_id
    JOIN vehicles v ON v.id = t.vehicle_id
"#;

pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_account(&self, account_id: i32) -> Result<Vec<TransactionRecord>, AppError> {
        let query = format!(
            "{} WHERE t.account_id = $1 ORDER BY t.created_at DESC, t.id DESC",
            RECORD_SELECT
        );
        let records = sqlx::query_as::<_, TransactionRecord>(&query)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    pub async fn list_all(&self, status: Option<TransactionStatus>) -> Result<Vec<TransactionRecord>, AppError> {
        let query = format!(
            "{} WHERE ($1::TEXT IS NULL OR t.status = $1) ORDER BY t.created_at DESC, t.id DESC",
            RECORD_SELECT
        );
        let records = sqlx::query_as::<_, TransactionRecord>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    pub async fn find_record(&self, id: i32) -> Result<Option<TransactionRecord>, AppError> {
        let query = format!("{} WHERE t.id = $1", RECORD_SELECT);
        let record = sqlx::query_as::<_, TransactionRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    pub async fn payments_for(&self, transaction_ids: &[i32]) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE transaction_id = ANY($1)")
            .bind(transaction_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(payments)
    }

    /// Insertar la transacción de una compra ya evaluada
    pub async fn insert(
        conn: &mut PgConnection,
        account_id: i32,
        plan: &PurchasePlan,
    ) -> Result<Transaction, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (account_id, vehicle_id, total_price, payment_method, status, stock_adjusted)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(plan.vehicle_id)
        .bind(plan.total_price)
        .bind(plan.payment_method.as_str())
        .bind(plan.transaction_status.as_str())
        .bind(plan.stock_adjusted)
        .fetch_one(conn)
        .await?;

        Ok(transaction)
    }

    /// Insertar el pago 1:1 de la transacción
    pub async fn insert_payment(
        conn: &mut PgConnection,
        transaction: &Transaction,
        plan: &PurchasePlan,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (transaction_id, payment_method, amount, payment_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(transaction.id)
        .bind(plan.payment_method.as_str())
        .bind(plan.total_price)
        .bind(plan.payment_date)
        .bind(plan.payment_status.as_str())
        .fetch_one(conn)
        .await?;

        Ok(payment)
    }

    pub async fn lock_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<Transaction>, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(transaction)
    }

    /// Igual que `lock_by_id` pero sólo si la transacción es de la cuenta
    pub async fn lock_owned(
        conn: &mut PgConnection,
        id: i32,
        account_id: i32,
    ) -> Result<Option<Transaction>, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE id = $1 AND account_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(conn)
        .await?;

        Ok(transaction)
    }

    pub async fn payment_of(conn: &mut PgConnection, transaction_id: i32) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE transaction_id = $1 FOR UPDATE")
            .bind(transaction_id)
            .fetch_optional(conn)
            .await?;

        Ok(payment)
    }

    /// Aplicar un cambio de estado. Las notas del administrador se sobrescriben.
    pub async fn apply_status_change(
        conn: &mut PgConnection,
        id: i32,
        plan: &StatusChangePlan,
        admin_notes: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE transactions
            SET status = $2, stock_adjusted = $3, admin_notes = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(plan.new_status.as_str())
        .bind(plan.stock_adjusted)
        .bind(admin_notes)
        .execute(&mut *conn)
        .await?;

        match plan.payment {
            PaymentUpdate::Verify { at } => {
                sqlx::query(
                    r#"
                    UPDATE payments
                    SET status = $2, payment_date = $3, admin_notes = $4, updated_at = NOW()
                    WHERE transaction_id = $1
                    "#,
                )
                .bind(id)
                .bind(PaymentStatus::Verified.as_str())
                .bind(at)
                .bind(admin_notes)
                .execute(&mut *conn)
                .await?;
            }
            PaymentUpdate::Reject => {
                sqlx::query(
                    r#"
                    UPDATE payments
                    SET status = $2, admin_notes = $3, updated_at = NOW()
                    WHERE transaction_id = $1
                    "#,
                )
                .bind(id)
                .bind(PaymentStatus::Rejected.as_str())
                .bind(admin_notes)
                .execute(&mut *conn)
                .await?;
            }
            PaymentUpdate::Unchanged => {
                sqlx::query("UPDATE payments SET updated_at = NOW() WHERE transaction_id = $1")
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
            }
        }

        Ok(())
    }

    pub async fn set_proof_url(conn: &mut PgConnection, payment_id: i32, url: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE payments SET payment_proof_url = $2, updated_at = NOW() WHERE id = $1")
            .bind(payment_id)
            .bind(url)
            .execute(conn)
            .await?;

        Ok(())
    }
}
