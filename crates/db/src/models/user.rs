//! Login user row model.

use sqlx::FromRow;
use wardroster_core::error::StoreError;
use wardroster_core::models::LoginUser;
use wardroster_core::roles::UserRole;
use wardroster_core::types::{DbId, Timestamp};

use super::corrupt;

/// A row from the `users` table.
///
/// Contains the password hash -- never serialize this.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub assigned_wards: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<UserRow> for LoginUser {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(LoginUser {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role: UserRole::from_str_value(&row.role).map_err(|e| corrupt("users", e))?,
            assigned_wards: row.assigned_wards,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
