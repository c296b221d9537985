use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::transaction::{
    Payment, PaymentMethod, PaymentStatus, TransactionRecord, TransactionStatus,
};
use crate::utils::validation::validate_not_blank;

// El método de pago llega como texto: se valida después de comprobar
// vehículo y stock
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub vehicle_id: i32,
    #[validate(length(max = 50))]
    pub payment_method: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionStatusRequest {
    #[validate(length(max = 50))]
    pub status: String,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadPaymentProofRequest {
    #[validate(length(min = 1, max = 2000), custom = "validate_not_blank")]
    pub payment_proof_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: i32,
    pub transaction_id: i32,
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
    pub payment_proof_url: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub status: PaymentStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            transaction_id: payment.transaction_id,
            payment_method: payment.payment_method,
            amount: payment.amount,
            payment_proof_url: payment.payment_proof_url,
            payment_date: payment.payment_date,
            status: payment.status,
            admin_notes: payment.admin_notes,
            created_at: payment.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub vehicle_id: i32,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub transaction_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub admin_notes: Option<String>,
    pub payment: Option<PaymentResponse>,
}

impl TransactionResponse {
    pub fn new(record: TransactionRecord, payment: Option<Payment>) -> Self {
        let transaction = record.transaction;
        Self {
            id: transaction.id,
            user_id: transaction.account_id,
            user_name: record.user_name,
            user_email: record.user_email,
            vehicle_id: transaction.vehicle_id,
            vehicle_brand: record.vehicle_brand,
            vehicle_model: record.vehicle_model,
            vehicle_year: record.vehicle_year,
            total_price: transaction.total_price,
            payment_method: transaction.payment_method,
            status: transaction.status,
            transaction_date: transaction.transaction_date,
            created_at: transaction.created_at,
            admin_notes: transaction.admin_notes,
            payment: payment.map(PaymentResponse::from),
        }
    }

    /// Emparejar cada transacción con su pago
    pub fn with_payments(records: Vec<TransactionRecord>, payments: Vec<Payment>) -> Vec<Self> {
        let mut by_transaction: HashMap<i32, Payment> = payments
            .into_iter()
            .map(|payment| (payment.transaction_id, payment))
            .collect();

        records
            .into_iter()
            .map(|record| {
                let payment = by_transaction.remove(&record.transaction.id);
                Self::new(record, payment)
            })
            .collect()
    }
}
