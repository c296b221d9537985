use sqlx::PgPool;

use crate::models::account::{Account, NewAccount, Role};
use crate::utils::errors::AppError;

pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buscar una cuenta dentro del pool de un rol. El email se compara tal
    /// como está almacenado.
    pub async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE role = $1 AND email = $2",
        )
        .bind(role.as_str())
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn create(&self, account: NewAccount) -> Result<Account, AppError> {
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (role, full_name, email, password_hash, phone_number, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(account.role.as_str())
        .bind(account.full_name)
        .bind(account.email)
        .bind(account.password_hash)
        .bind(account.phone_number)
        .bind(account.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Borrar la cuenta de un rol por email. Devuelve si existía.
    pub async fn delete_by_email(&self, role: Role, email: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE role = $1 AND email = $2")
            .bind(role.as_str())
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
