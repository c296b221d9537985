//! Motor de órdenes, inventario y pagos
//!
//! Reglas puras que deciden cómo una compra o un cambio de estado afecta a la
//! transacción, a su pago y al stock del vehículo. El controller aplica el plan
//! resultante dentro de una única transacción de base de datos, con el
//! vehículo bloqueado (`FOR UPDATE`) mientras se lee y escribe el stock.
//!
//! El stock se mueve según el flag `stock_adjusted` de la transacción y no
//! según el estado anterior inmediato: una venta retiene como máximo una
//! unidad, y sólo una reversión de una venta que la retiene la devuelve.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    transaction::{Payment, PaymentMethod, PaymentStatus, Transaction, TransactionStatus},
    vehicle::{StockLevel, Vehicle, VehicleStatus},
};

/// Errores de negocio del flujo de compra
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Vehicle not found")]
    VehicleNotFound,

    #[error("Vehicle is out of stock")]
    OutOfStock,

    #[error("Invalid payment method '{0}'. Use 'Cash' or 'BankTransfer'")]
    InvalidPaymentMethod(String),

    #[error("Transaction not found")]
    TransactionNotFound,

    #[error("Can only upload payment proof for pending transactions")]
    NotPending,

    #[error("Payment record not found")]
    PaymentRecordMissing,

    #[error("Invalid status '{0}'. Use 'Completed', 'Rejected', or 'Cancelled'")]
    InvalidStatus(String),
}

/// Movimiento de stock producido por una operación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockMovement {
    None,
    Taken,
    Returned,
}

/// Qué le pasa al pago cuando el administrador cambia el estado de la orden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentUpdate {
    Verify { at: DateTime<Utc> },
    Reject,
    Unchanged,
}

/// Resultado de evaluar una compra nueva
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchasePlan {
    pub vehicle_id: i32,
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    pub transaction_status: TransactionStatus,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub stock_adjusted: bool,
    pub stock_movement: StockMovement,
    pub stock_after: StockLevel,
}

/// Resultado de evaluar un cambio de estado administrativo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangePlan {
    pub old_status: TransactionStatus,
    pub new_status: TransactionStatus,
    pub payment: PaymentUpdate,
    pub stock_adjusted: bool,
    pub stock_movement: StockMovement,
    pub stock_after: StockLevel,
}

/// Estados que un administrador puede asignar. `Pending` sólo es estado inicial.
pub const SETTABLE_STATUSES: [TransactionStatus; 3] = [
    TransactionStatus::Completed,
    TransactionStatus::Rejected,
    TransactionStatus::Cancelled,
];

/// Retirar una unidad del stock; el vehículo pasa a `Sold` al llegar a cero
pub fn take_unit(level: StockLevel) -> Result<StockLevel, OrderError> {
    if level.stock <= 0 {
        return Err(OrderError::OutOfStock);
    }

    let stock = level.stock - 1;
    let status = if stock == 0 {
        VehicleStatus::Sold
    } else {
        level.status
    };

    Ok(StockLevel { stock, status })
}

/// Devolver una unidad al stock; un vehículo `Sold` vuelve a `Available`
pub fn return_unit(level: StockLevel) -> StockLevel {
    let status = match level.status {
        VehicleStatus::Sold => VehicleStatus::Available,
        other => other,
    };

    StockLevel {
        stock: level.stock + 1,
        status,
    }
}

/// Evaluar una compra. El orden de las comprobaciones es parte del contrato:
/// vehículo, stock y después método de pago.
pub fn plan_purchase(
    vehicle: Option<&Vehicle>,
    payment_method: &str,
    now: DateTime<Utc>,
) -> Result<PurchasePlan, OrderError> {
    let vehicle = vehicle.ok_or(OrderError::VehicleNotFound)?;
    let level = StockLevel::from(vehicle);

    if level.stock <= 0 {
        return Err(OrderError::OutOfStock);
    }

    let payment_method: PaymentMethod = payment_method
        .parse()
        .map_err(|_| OrderError::InvalidPaymentMethod(payment_method.to_string()))?;

    let plan = match payment_method {
        PaymentMethod::Cash => PurchasePlan {
            vehicle_id: vehicle.id,
            total_price: vehicle.price,
            payment_method,
            transaction_status: TransactionStatus::Completed,
            payment_status: PaymentStatus::Verified,
            payment_date: Some(now),
            stock_adjusted: true,
            stock_movement: StockMovement::Taken,
            stock_after: take_unit(level)?,
        },
        PaymentMethod::BankTransfer => PurchasePlan {
            vehicle_id: vehicle.id,
            total_price: vehicle.price,
            payment_method,
            transaction_status: TransactionStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_date: None,
            stock_adjusted: false,
            stock_movement: StockMovement::None,
            stock_after: level,
        },
    };

    Ok(plan)
}

/// Interpretar el estado pedido por el administrador
pub fn parse_settable_status(requested: &str) -> Result<TransactionStatus, OrderError> {
    requested
        .parse::<TransactionStatus>()
        .ok()
        .filter(|status| SETTABLE_STATUSES.contains(status))
        .ok_or_else(|| OrderError::InvalidStatus(requested.to_string()))
}

/// Evaluar un cambio de estado administrativo sobre una transacción existente
pub fn plan_status_change(
    transaction: &Transaction,
    level: StockLevel,
    requested: &str,
    now: DateTime<Utc>,
) -> Result<StatusChangePlan, OrderError> {
    let new_status = parse_settable_status(requested)?;

    let payment = match new_status {
        TransactionStatus::Completed => PaymentUpdate::Verify { at: now },
        TransactionStatus::Rejected => PaymentUpdate::Reject,
        _ => PaymentUpdate::Unchanged,
    };

    let (stock_adjusted, stock_movement, stock_after) =
        match (new_status, transaction.stock_adjusted) {
            (TransactionStatus::Completed, false) => (true, StockMovement::Taken, take_unit(level)?),
            (TransactionStatus::Rejected | TransactionStatus::Cancelled, true) => {
                (false, StockMovement::Returned, return_unit(level))
            }
            (_, adjusted) => (adjusted, StockMovement::None, level),
        };

    Ok(StatusChangePlan {
        old_status: transaction.status,
        new_status,
        payment,
        stock_adjusted,
        stock_movement,
        stock_after,
    })
}

/// Comprobar que se puede adjuntar un comprobante de pago
pub fn check_proof_upload(
    transaction: Option<&Transaction>,
    payment: Option<&Payment>,
) -> Result<(), OrderError> {
    let transaction = transaction.ok_or(OrderError::TransactionNotFound)?;

    if transaction.status != TransactionStatus::Pending {
        return Err(OrderError::NotPending);
    }

    if payment.is_none() {
        return Err(OrderError::PaymentRecordMissing);
    }

    Ok(())
}
