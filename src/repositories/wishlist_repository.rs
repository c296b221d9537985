use sqlx::PgPool;

use crate::models::wishlist::WishlistEntry;
use crate::utils::errors::AppError;

pub struct WishlistRepository {
    pool: PgPool,
}

impl WishlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Entradas de una cuenta, la más reciente primero
    pub async fn list_for_account(&self, account_id: i32) -> Result<Vec<WishlistEntry>, AppError> {
        let entries = sqlx::query_as::<_, WishlistEntry>(
            "SELECT * FROM wishlist_entries WHERE account_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn contains(&self, account_id: i32, vehicle_id: i32) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM wishlist_entries WHERE account_id = $1 AND vehicle_id = $2)",
        )
        .bind(account_id)
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn add(&self, account_id: i32, vehicle_id: i32) -> Result<WishlistEntry, AppError> {
        let entry = sqlx::query_as::<_, WishlistEntry>(
            "INSERT INTO wishlist_entries (account_id, vehicle_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(account_id)
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn remove(&self, account_id: i32, vehicle_id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM wishlist_entries WHERE account_id = $1 AND vehicle_id = $2")
            .bind(account_id)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
