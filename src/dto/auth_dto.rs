use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::account::{Account, Role};
use crate::utils::validation::validate_not_blank;

// Registro de cliente
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub full_name: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    #[validate(length(max = 20))]
    pub phone_number: Option<String>,

    #[validate(length(max = 200))]
    pub address: Option<String>,
}

// Login (cliente o administrador)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

// Respuesta de registro y login
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub token: String,
    pub role: Role,
}

impl AuthResponse {
    pub fn new(account: &Account, token: String) -> Self {
        Self {
            id: account.id,
            full_name: account.full_name.clone(),
            email: account.email.clone(),
            token,
            role: account.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: "Siti Rahma".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone_number: None,
            address: None,
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register("siti@example.com", "secret1").validate().is_ok());

        let errors = register("not-an-email", "123").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_reads_camel_case() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"fullName":"Siti","email":"siti@example.com","password":"secret1","phoneNumber":"0812"}"#,
        )
        .unwrap();
        assert_eq!(request.full_name, "Siti");
        assert_eq!(request.phone_number.as_deref(), Some("0812"));
    }
}
