//! Sistema de manejo de errores
//!
//! Este módulo define el error principal de la aplicación y su conversión
//! a respuestas HTTP. Los errores de dominio de cada servicio se convierten
//! aquí a `AppError` para que el handler sólo tenga que usar `?`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::services::{
    auth_service::AuthError, engagement::EngagementError, order_engine::OrderError,
};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: code.to_string(),
        }
    }
}

impl AppError {
    /// Código HTTP asociado al error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Internal(_)
            | AppError::Jwt(_)
            | AppError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Database(e) => {
                error!("❌ Error de base de datos: {}", e);
                ErrorResponse::new(
                    "Database Error",
                    "An error occurred while accessing the database".to_string(),
                    "DB_ERROR",
                )
            }

            AppError::Migration(e) => {
                error!("❌ Error de migración: {}", e);
                ErrorResponse::new(
                    "Database Error",
                    "An error occurred while preparing the database".to_string(),
                    "DB_ERROR",
                )
            }

            AppError::Validation(e) => {
                warn!("⚠️ Error de validación: {}", e);
                ErrorResponse {
                    details: Some(json!(e)),
                    ..ErrorResponse::new(
                        "Validation Error",
                        "The provided data is invalid".to_string(),
                        "VALIDATION_ERROR",
                    )
                }
            }

            AppError::Unauthorized(msg) => {
                warn!("🔒 Acceso no autenticado: {}", msg);
                ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED")
            }

            AppError::Forbidden(msg) => {
                warn!("🚫 Acceso prohibido: {}", msg);
                ErrorResponse::new("Forbidden", msg, "FORBIDDEN")
            }

            AppError::NotFound(msg) => ErrorResponse::new("Not Found", msg, "NOT_FOUND"),

            AppError::Conflict(msg) => {
                warn!("⚠️ Conflicto: {}", msg);
                ErrorResponse::new("Conflict", msg, "CONFLICT")
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Solicitud incorrecta: {}", msg);
                ErrorResponse::new("Bad Request", msg, "BAD_REQUEST")
            }

            AppError::Internal(msg) => {
                error!("❌ Error interno: {}", msg);
                ErrorResponse::new(
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                    "INTERNAL_ERROR",
                )
            }

            AppError::Jwt(msg) => {
                error!("❌ Error JWT: {}", msg);
                ErrorResponse::new(
                    "JWT Error",
                    "An error occurred while issuing the token".to_string(),
                    "JWT_ERROR",
                )
            }

            AppError::Hash(msg) => {
                error!("❌ Error de hash: {}", msg);
                ErrorResponse::new(
                    "Hash Error",
                    "An error occurred while processing credentials".to_string(),
                    "HASH_ERROR",
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl AppError {
    /// Violación de una restricción UNIQUE en PostgreSQL
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, AppError::Database(sqlx::Error::Database(db)) if db.is_unique_violation())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::AccountInactive => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::DuplicateEmail => AppError::Conflict(err.to_string()),
            AuthError::Hash(msg) => AppError::Hash(msg),
        }
    }
}

impl From<EngagementError> for AppError {
    fn from(err: EngagementError) -> Self {
        match err {
            EngagementError::VehicleNotFound
            | EngagementError::NotInWishlist
            | EngagementError::TestDriveNotFound
            | EngagementError::InquiryNotFound => AppError::NotFound(err.to_string()),
            EngagementError::AlreadyInWishlist => AppError::Conflict(err.to_string()),
            EngagementError::InvalidTransition(_) => AppError::BadRequest(err.to_string()),
            EngagementError::Forbidden => AppError::Forbidden(err.to_string()),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::VehicleNotFound | OrderError::TransactionNotFound => {
                AppError::NotFound(err.to_string())
            }
            OrderError::OutOfStock
            | OrderError::InvalidPaymentMethod(_)
            | OrderError::NotPending
            | OrderError::PaymentRecordMissing
            | OrderError::InvalidStatus(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} not found", resource))
}
