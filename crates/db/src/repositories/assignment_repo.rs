//! Repository for the `assignments` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use wardroster_core::models::AssignmentKey;
use wardroster_core::shifts::Shift;
use wardroster_core::types::DbId;

use crate::models::assignment::AssignmentRow;

const COLUMNS: &str = "id, ward_id, date_key, shift_id, staff_id, created_at, updated_at";

/// Provides grid-cell operations for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert an assignment.
    ///
    /// Returns `None` when the same (ward, date, shift, staff) entry already
    /// exists; the unique constraint makes a retry harmless.
    pub async fn create(
        pool: &PgPool,
        key: &AssignmentKey,
    ) -> Result<Option<AssignmentRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments (ward_id, date_key, shift_id, staff_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (ward_id, date_key, shift_id, staff_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(key.ward_id)
            .bind(key.date_key.date())
            .bind(key.shift_id.as_str())
            .bind(key.staff_id)
            .fetch_optional(pool)
            .await
    }

    /// Every assignment of a ward, oldest first.
    pub async fn list_by_ward(
        pool: &PgPool,
        ward_id: DbId,
    ) -> Result<Vec<AssignmentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments WHERE ward_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(ward_id)
            .fetch_all(pool)
            .await
    }

    /// Assignments of one (date, shift) cell, oldest first.
    pub async fn list_cell(
        pool: &PgPool,
        ward_id: DbId,
        date_key: NaiveDate,
        shift: Shift,
    ) -> Result<Vec<AssignmentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE ward_id = $1 AND date_key = $2 AND shift_id = $3
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(ward_id)
            .bind(date_key)
            .bind(shift.as_str())
            .fetch_all(pool)
            .await
    }

    /// Delete one entry by its composite key. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, key: &AssignmentKey) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM assignments
             WHERE ward_id = $1 AND date_key = $2 AND shift_id = $3 AND staff_id = $4",
        )
        .bind(key.ward_id)
        .bind(key.date_key.date())
        .bind(key.shift_id.as_str())
        .bind(key.staff_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
