//! Repository for the `change_requests` table.

use sqlx::PgPool;
use wardroster_core::models::CreateChangeRequest;
use wardroster_core::types::DbId;
use wardroster_core::workflow::RequestStatus;

use crate::models::change_request::ChangeRequestRow;

const COLUMNS: &str = "id, ward_id, requested_by, requested_by_name, date_key, shift_label, \
                       reason, status, created_at, updated_at";

/// Provides CRUD operations for change requests.
pub struct ChangeRequestRepo;

impl ChangeRequestRepo {
    /// Insert a new request. The status column defaults to `pending`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateChangeRequest,
    ) -> Result<ChangeRequestRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO change_requests
                (ward_id, requested_by, requested_by_name, date_key, shift_label, reason)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeRequestRow>(&query)
            .bind(input.ward_id)
            .bind(input.requested_by)
            .bind(&input.requested_by_name)
            .bind(input.date_key.date())
            .bind(&input.shift_label)
            .bind(&input.reason)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ChangeRequestRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM change_requests WHERE id = $1");
        sqlx::query_as::<_, ChangeRequestRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the requests of a ward, most recent first.
    pub async fn list_by_ward(
        pool: &PgPool,
        ward_id: DbId,
    ) -> Result<Vec<ChangeRequestRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM change_requests
             WHERE ward_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ChangeRequestRow>(&query)
            .bind(ward_id)
            .fetch_all(pool)
            .await
    }

    /// Move a request from `from` to `to`. Returns `None` if no row has that
    /// id in status `from`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<Option<ChangeRequestRow>, sqlx::Error> {
        let query = format!(
            "UPDATE change_requests SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeRequestRow>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a request by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM change_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
