//! Repository for the `wards` table.

use sqlx::PgPool;
use wardroster_core::models::CreateWard;
use wardroster_core::types::DbId;

use crate::models::ward::WardRow;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for wards.
pub struct WardRepo;

impl WardRepo {
    /// Insert a new ward, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWard) -> Result<WardRow, sqlx::Error> {
        let query = format!("INSERT INTO wards (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, WardRow>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WardRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wards WHERE id = $1");
        sqlx::query_as::<_, WardRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all wards in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<WardRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wards ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, WardRow>(&query).fetch_all(pool).await
    }

    /// Delete a ward by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
