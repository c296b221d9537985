//! Modelo de Account
//!
//! Una única tabla para clientes y administradores; el rol separa los dos
//! pools de credenciales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

text_enum! {
    /// Rol de la cuenta, viaja en el claim `role` del JWT
    Role {
        User => "User",
        Admin => "Admin",
    }
}

/// Account - mapea exactamente a la tabla accounts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i32,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Datos para insertar una cuenta nueva
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub role: Role,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}
