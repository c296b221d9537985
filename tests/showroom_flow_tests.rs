//! Flujos completos contra PostgreSQL
//!
//! Se ejecutan sólo si `TEST_DATABASE_URL` apunta a una base de pruebas;
//! sin ella cada test termina sin hacer nada. Cada test crea sus propias
//! cuentas y vehículos, así que pueden correr en paralelo.

use std::collections::HashMap;

use axum::http::StatusCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use car_showroom::{
    config::EnvironmentConfig,
    controllers::{
        test_drive_controller::TestDriveController,
        transaction_controller::TransactionController,
        wishlist_controller::WishlistController,
    },
    database::DatabaseConnection,
    dto::{
        test_drive_dto::{CreateTestDriveRequest, UpdateTestDriveStatusRequest},
        transaction_dto::{
            CreateTransactionRequest, UpdateTransactionStatusRequest, UploadPaymentProofRequest,
        },
    },
    middleware::auth::AuthenticatedUser,
    models::{
        account::{NewAccount, Role},
        test_drive::TestDriveStatus,
        transaction::{PaymentStatus, TransactionStatus},
        vehicle::{NewVehicle, Vehicle, VehicleStatus},
    },
    repositories::{AccountRepository, VehicleRepository},
};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let vars: HashMap<&str, String> = [
        ("DATABASE_URL", url),
        ("JWT_SECRET", "flow-secret".to_string()),
        ("DB_MAX_CONNECTIONS", "5".to_string()),
    ]
    .into_iter()
    .collect();

    let config = EnvironmentConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let connection = DatabaseConnection::connect(&config).await.unwrap();
    Some(connection.pool().clone())
}

async fn create_account(pool: &PgPool, role: Role) -> AuthenticatedUser {
    let email = format!("{}@flow.test", Uuid::new_v4());
    let account = AccountRepository::new(pool.clone())
        .create(NewAccount {
            role,
            full_name: "Flow Tester".to_string(),
            email: email.clone(),
            password_hash: "not-a-real-hash".to_string(),
            phone_number: Some("0812000000".to_string()),
            address: None,
        })
        .await
        .unwrap();

    AuthenticatedUser {
        account_id: account.id,
        email,
        role,
    }
}

async fn create_vehicle(pool: &PgPool, stock: i32) -> Vehicle {
    VehicleRepository::new(pool.clone())
        .create(NewVehicle {
            brand: "Toyota".to_string(),
            model: format!("Flow {}", Uuid::new_v4()),
            year: 2024,
            price: Decimal::new(100_000_000, 0),
            color: None,
            fuel_type: Some("Gasoline".to_string()),
            transmission: Some("Automatic".to_string()),
            mileage: None,
            engine_capacity: None,
            seats: Some(5),
            body_type: Some("SUV".to_string()),
            description: None,
            features: None,
            stock,
            is_featured: false,
        })
        .await
        .unwrap()
}

async fn reload(pool: &PgPool, id: i32) -> Vehicle {
    VehicleRepository::new(pool.clone())
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
}

fn purchase(vehicle_id: i32, method: &str) -> CreateTransactionRequest {
    CreateTransactionRequest {
        vehicle_id,
        payment_method: method.to_string(),
    }
}

fn set_status(status: &str) -> UpdateTransactionStatusRequest {
    UpdateTransactionStatusRequest {
        status: status.to_string(),
        admin_notes: Some(format!("set to {}", status)),
    }
}

#[tokio::test]
async fn test_cash_purchase_sells_last_unit() {
    let Some(pool) = test_pool().await else { return };
    let buyer_a = create_account(&pool, Role::User).await;
    let buyer_b = create_account(&pool, Role::User).await;
    let vehicle = create_vehicle(&pool, 1).await;
    let controller = TransactionController::new(pool.clone());

    let created = controller
        .create(buyer_a.account_id, purchase(vehicle.id, "Cash"))
        .await
        .unwrap();

    assert_eq!(created.status, TransactionStatus::Completed);
    assert_eq!(created.total_price, vehicle.price);
    let payment = created.payment.unwrap();
    assert_eq!(payment.status, PaymentStatus::Verified);
    assert!(payment.payment_date.is_some());

    let after = reload(&pool, vehicle.id).await;
    assert_eq!(after.stock, 0);
    assert_eq!(after.status, VehicleStatus::Sold);

    let err = controller
        .create(buyer_b.account_id, purchase(vehicle.id, "Cash"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert!(err.to_string().contains("out of stock"));
}

#[tokio::test]
async fn test_invalid_payment_method_leaves_no_rows() {
    let Some(pool) = test_pool().await else { return };
    let buyer = create_account(&pool, Role::User).await;
    let vehicle = create_vehicle(&pool, 3).await;
    let controller = TransactionController::new(pool.clone());

    let err = controller
        .create(buyer.account_id, purchase(vehicle.id, "Crypto"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    assert!(controller.list_own(buyer.account_id).await.unwrap().is_empty());
    assert_eq!(reload(&pool, vehicle.id).await.stock, 3);
}

#[tokio::test]
async fn test_bank_transfer_rejected_before_approval_keeps_stock() {
    let Some(pool) = test_pool().await else { return };
    let buyer = create_account(&pool, Role::User).await;
    let vehicle = create_vehicle(&pool, 2).await;
    let controller = TransactionController::new(pool.clone());

    let created = controller
        .create(buyer.account_id, purchase(vehicle.id, "BankTransfer"))
        .await
        .unwrap();
    assert_eq!(created.status, TransactionStatus::Pending);
    assert_eq!(created.payment.as_ref().unwrap().status, PaymentStatus::Pending);
    assert_eq!(reload(&pool, vehicle.id).await.stock, 2);

    controller
        .update_status(created.id, set_status("Rejected"))
        .await
        .unwrap();

    assert_eq!(reload(&pool, vehicle.id).await.stock, 2);
    let admin = create_account(&pool, Role::Admin).await;
    let updated = controller.get(created.id, &admin).await.unwrap();
    assert_eq!(updated.status, TransactionStatus::Rejected);
    assert_eq!(updated.payment.unwrap().status, PaymentStatus::Rejected);
}

#[tokio::test]
async fn test_bank_transfer_approve_then_reverse() {
    let Some(pool) = test_pool().await else { return };
    let buyer = create_account(&pool, Role::User).await;
    let vehicle = create_vehicle(&pool, 1).await;
    let controller = TransactionController::new(pool.clone());

    let created = controller
        .create(buyer.account_id, purchase(vehicle.id, "BankTransfer"))
        .await
        .unwrap();

    controller
        .upload_payment_proof(
            created.id,
            buyer.account_id,
            UploadPaymentProofRequest {
                payment_proof_url: "https://files.example/proof.jpg".to_string(),
            },
        )
        .await
        .unwrap();

    controller
        .update_status(created.id, set_status("Completed"))
        .await
        .unwrap();
    let sold = reload(&pool, vehicle.id).await;
    assert_eq!(sold.stock, 0);
    assert_eq!(sold.status, VehicleStatus::Sold);

    // una segunda aprobación no vuelve a descontar
    controller
        .update_status(created.id, set_status("Completed"))
        .await
        .unwrap();
    assert_eq!(reload(&pool, vehicle.id).await.stock, 0);

    controller
        .update_status(created.id, set_status("Rejected"))
        .await
        .unwrap();
    let restocked = reload(&pool, vehicle.id).await;
    assert_eq!(restocked.stock, 1);
    assert_eq!(restocked.status, VehicleStatus::Available);

    let response = controller.get(created.id, &buyer).await.unwrap();
    let payment = response.payment.unwrap();
    assert_eq!(payment.status, PaymentStatus::Rejected);
    assert_eq!(
        payment.payment_proof_url.as_deref(),
        Some("https://files.example/proof.jpg")
    );

    // la prueba sólo se acepta con la orden pendiente
    let err = controller
        .upload_payment_proof(
            created.id,
            buyer.account_id,
            UploadPaymentProofRequest {
                payment_proof_url: "https://files.example/late.jpg".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pending_is_not_a_settable_status() {
    let Some(pool) = test_pool().await else { return };
    let buyer = create_account(&pool, Role::User).await;
    let vehicle = create_vehicle(&pool, 1).await;
    let controller = TransactionController::new(pool.clone());

    let created = controller
        .create(buyer.account_id, purchase(vehicle.id, "BankTransfer"))
        .await
        .unwrap();

    let err = controller
        .update_status(created.id, set_status("Pending"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    let err = controller
        .update_status(i32::MAX, set_status("Completed"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_approvals_do_not_oversell() {
    let Some(pool) = test_pool().await else { return };
    let buyer_a = create_account(&pool, Role::User).await;
    let buyer_b = create_account(&pool, Role::User).await;
    let vehicle = create_vehicle(&pool, 1).await;
    let controller = TransactionController::new(pool.clone());

    let first = controller
        .create(buyer_a.account_id, purchase(vehicle.id, "BankTransfer"))
        .await
        .unwrap();
    let second = controller
        .create(buyer_b.account_id, purchase(vehicle.id, "BankTransfer"))
        .await
        .unwrap();

    let other = TransactionController::new(pool.clone());
    let (a, b) = tokio::join!(
        controller.update_status(first.id, set_status("Completed")),
        other.update_status(second.id, set_status("Completed")),
    );

    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    let after = reload(&pool, vehicle.id).await;
    assert_eq!(after.stock, 0);
    assert_eq!(after.status, VehicleStatus::Sold);
}

#[tokio::test]
async fn test_wishlist_round_trip() {
    let Some(pool) = test_pool().await else { return };
    let user = create_account(&pool, Role::User).await;
    let vehicle = create_vehicle(&pool, 1).await;
    let controller = WishlistController::new(pool.clone());

    controller.add(user.account_id, vehicle.id).await.unwrap();
    assert!(controller.contains(user.account_id, vehicle.id).await.unwrap());

    let err = controller.add(user.account_id, vehicle.id).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    let listed = controller.list(user.account_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, vehicle.id);

    controller.remove(user.account_id, vehicle.id).await.unwrap();
    assert!(!controller.contains(user.account_id, vehicle.id).await.unwrap());

    let err = controller
        .remove(user.account_id, vehicle.id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_test_drive_cancel_rules() {
    let Some(pool) = test_pool().await else { return };
    let owner = create_account(&pool, Role::User).await;
    let stranger = create_account(&pool, Role::User).await;
    let admin = create_account(&pool, Role::Admin).await;
    let vehicle = create_vehicle(&pool, 1).await;
    let controller = TestDriveController::new(pool.clone());

    let request = || CreateTestDriveRequest {
        vehicle_id: vehicle.id,
        requested_date: NaiveDate::from_ymd_opt(2030, 5, 17).unwrap(),
        requested_time: "10:00 - 11:00".to_string(),
        notes: None,
    };

    let pending = controller.create(owner.account_id, request()).await.unwrap();
    assert_eq!(pending.status, TestDriveStatus::Pending);
    assert_eq!(pending.user_phone.as_deref(), Some("0812000000"));

    let err = controller
        .cancel(pending.id, stranger.account_id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

    controller.cancel(pending.id, owner.account_id).await.unwrap();
    let cancelled = controller.get(pending.id, &owner).await.unwrap();
    assert_eq!(cancelled.status, TestDriveStatus::Cancelled);

    let completed = controller.create(owner.account_id, request()).await.unwrap();
    controller
        .update_status(
            completed.id,
            admin.account_id,
            UpdateTestDriveStatusRequest {
                status: "Completed".to_string(),
                admin_notes: Some("Went well".to_string()),
            },
        )
        .await
        .unwrap();

    let err = controller
        .cancel(completed.id, owner.account_id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    let err = controller.get(completed.id, &stranger).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
}
