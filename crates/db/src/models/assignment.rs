//! Assignment row model.

use chrono::NaiveDate;
use sqlx::FromRow;
use wardroster_core::calendar::DateKey;
use wardroster_core::error::StoreError;
use wardroster_core::models::Assignment;
use wardroster_core::shifts::Shift;
use wardroster_core::types::{DbId, Timestamp};

use super::corrupt;

/// A row from the `assignments` table.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRow {
    pub id: DbId,
    pub ward_id: DbId,
    pub date_key: NaiveDate,
    pub shift_id: String,
    pub staff_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = StoreError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Assignment {
            id: row.id,
            ward_id: row.ward_id,
            date_key: DateKey::new(row.date_key),
            shift_id: Shift::from_str_value(&row.shift_id)
                .map_err(|e| corrupt("assignments", e))?,
            staff_id: row.staff_id,
            created_at: row.created_at,
        })
    }
}
