//! Staff row model.

use sqlx::FromRow;
use wardroster_core::error::StoreError;
use wardroster_core::models::Staff;
use wardroster_core::roles::DutyRole;
use wardroster_core::types::{DbId, Timestamp};

use super::corrupt;

/// A row from the `staff` table.
#[derive(Debug, Clone, FromRow)]
pub struct StaffRow {
    pub id: DbId,
    pub ward_id: DbId,
    pub name: String,
    /// One of the duty role names, e.g. `"attendant"`.
    pub role: String,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<StaffRow> for Staff {
    type Error = StoreError;

    fn try_from(row: StaffRow) -> Result<Self, Self::Error> {
        Ok(Staff {
            id: row.id,
            ward_id: row.ward_id,
            name: row.name,
            role: DutyRole::from_str_value(&row.role).map_err(|e| corrupt("staff", e))?,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}
