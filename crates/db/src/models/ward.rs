//! Ward row model.

use sqlx::FromRow;
use wardroster_core::models::Ward;
use wardroster_core::types::{DbId, Timestamp};

/// A row from the `wards` table.
#[derive(Debug, Clone, FromRow)]
pub struct WardRow {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<WardRow> for Ward {
    fn from(row: WardRow) -> Self {
        Ward {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}
