//! Servicio de autenticación
//!
//! Verificación de credenciales contra el pool de cuentas de un rol.
//! Email inexistente y contraseña incorrecta producen el mismo error.

use bcrypt::{hash, verify};
use thiserror::Error;

use crate::models::account::Account;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("{0}")]
    Hash(String),
}

/// Hashear una contraseña con el coste configurado
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    hash(password, cost).map_err(|e| AuthError::Hash(format!("Error hasheando contraseña: {}", e)))
}

/// Verificar credenciales. El flag `is_active` sólo se comprueba después de
/// que la contraseña sea correcta.
pub fn verify_credentials(account: Option<Account>, password: &str) -> Result<Account, AuthError> {
    let account = account.ok_or(AuthError::InvalidCredentials)?;

    let matches = verify(password, &account.password_hash)
        .map_err(|e| AuthError::Hash(format!("Error verificando contraseña: {}", e)))?;

    if !matches {
        return Err(AuthError::InvalidCredentials);
    }

    if !account.is_active {
        return Err(AuthError::AccountInactive);
    }

    Ok(account)
}

/// Rechazar el registro si el email ya existe en el pool
pub fn ensure_email_available(existing: Option<&Account>) -> Result<(), AuthError> {
    match existing {
        Some(_) => Err(AuthError::DuplicateEmail),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::Role;
    use chrono::Utc;

    const TEST_COST: u32 = 4;

    fn account(password: &str, is_active: bool) -> Account {
        Account {
            id: 1,
            role: Role::User,
            full_name: "Budi Santoso".to_string(),
            email: "budi@example.com".to_string(),
            password_hash: hash_password(password, TEST_COST).unwrap(),
            phone_number: None,
            address: None,
            is_active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_valid_credentials() {
        let verified = verify_credentials(Some(account("secret1", true)), "secret1").unwrap();
        assert_eq!(verified.email, "budi@example.com");
    }

    #[test]
    fn test_unknown_email_and_wrong_password_look_the_same() {
        let missing = verify_credentials(None, "secret1").unwrap_err();
        let wrong = verify_credentials(Some(account("secret1", true)), "other").unwrap_err();

        assert_eq!(missing, AuthError::InvalidCredentials);
        assert_eq!(missing.to_string(), wrong.to_string());
    }

    #[test]
    fn test_inactive_only_reported_after_password_matches() {
        assert_eq!(
            verify_credentials(Some(account("secret1", false)), "nope").unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            verify_credentials(Some(account("secret1", false)), "secret1").unwrap_err(),
            AuthError::AccountInactive
        );
    }

    #[test]
    fn test_duplicate_email() {
        let existing = account("secret1", true);
        assert_eq!(
            ensure_email_available(Some(&existing)),
            Err(AuthError::DuplicateEmail)
        );
        assert!(ensure_email_available(None).is_ok());
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hashed = hash_password("secret1", TEST_COST).unwrap();
        assert_ne!(hashed, "secret1");
        assert!(verify("secret1", &hashed).unwrap());
    }
}
