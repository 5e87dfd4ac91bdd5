//! Change request row model.

use chrono::NaiveDate;
use sqlx::FromRow;
use wardroster_core::calendar::DateKey;
use wardroster_core::error::StoreError;
use wardroster_core::models::ChangeRequest;
use wardroster_core::types::{DbId, Timestamp};
use wardroster_core::workflow::RequestStatus;

use super::corrupt;

/// A row from the `change_requests` table.
#[derive(Debug, Clone, FromRow)]
pub struct ChangeRequestRow {
    pub id: DbId,
    pub ward_id: DbId,
    pub requested_by: DbId,
    pub requested_by_name: String,
    pub date_key: NaiveDate,
    pub shift_label: String,
    pub reason: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ChangeRequestRow> for ChangeRequest {
    type Error = StoreError;

    fn try_from(row: ChangeRequestRow) -> Result<Self, Self::Error> {
        Ok(ChangeRequest {
            id: row.id,
            ward_id: row.ward_id,
            requested_by: row.requested_by,
            requested_by_name: row.requested_by_name,
            date_key: DateKey::new(row.date_key),
            shift_label: row.shift_label,
            reason: row.reason,
            status: RequestStatus::from_str_value(&row.status)
                .map_err(|e| corrupt("change_requests", e))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
