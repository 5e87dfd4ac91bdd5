//! Repository for the `staff` table.

use sqlx::PgPool;
use wardroster_core::models::CreateStaff;
use wardroster_core::types::DbId;

use crate::models::staff::StaffRow;

const COLUMNS: &str = "id, ward_id, name, role, user_id, created_at, updated_at";

/// Provides CRUD operations for rostered staff.
pub struct StaffRepo;

impl StaffRepo {
    /// Insert a new staff member, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStaff) -> Result<StaffRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff (ward_id, name, role, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StaffRow>(&query)
            .bind(input.ward_id)
            .bind(&input.name)
            .bind(input.role.as_str())
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StaffRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE id = $1");
        sqlx::query_as::<_, StaffRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the staff of a ward in insertion order.
    pub async fn list_by_ward(pool: &PgPool, ward_id: DbId) -> Result<Vec<StaffRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM staff WHERE ward_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, StaffRow>(&query)
            .bind(ward_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a staff member by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM staff WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
