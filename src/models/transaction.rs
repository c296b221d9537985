//! Modelos de Transaction y Payment
//!
//! Cada transacción tiene exactamente un pago (1:1) creado en la misma
//! transacción de base de datos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

text_enum! {
    /// Método de pago aceptado por el showroom
    PaymentMethod {
        Cash => "Cash",
        BankTransfer => "BankTransfer",
    }
}

text_enum! {
    /// Estado de la orden de compra
    TransactionStatus {
        Pending => "Pending",
        Completed => "Completed",
        Rejected => "Rejected",
        Cancelled => "Cancelled",
    }
}

text_enum! {
    /// Estado de verificación del pago
    PaymentStatus {
        Pending => "Pending",
        Verified => "Verified",
        Rejected => "Rejected",
    }
}

/// Transaction - mapea a la tabla transactions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: i32,
    pub account_id: i32,
    pub vehicle_id: i32,
    pub total_price: Decimal,
    #[sqlx(try_from = "String")]
    pub payment_method: PaymentMethod,
    #[sqlx(try_from = "String")]
    pub status: TransactionStatus,
    pub stock_adjusted: bool,
    pub transaction_date: DateTime<Utc>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Transaction con los datos del cliente y del vehículo para las respuestas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TransactionRecord {
    #[sqlx(flatten)]
    pub transaction: Transaction,
    pub user_name: String,
    pub user_email: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
}

/// Payment - mapea a la tabla payments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i32,
    pub transaction_id: i32,
    #[sqlx(try_from = "String")]
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
    pub payment_proof_url: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
