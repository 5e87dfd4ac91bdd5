//! Row models.
//!
//! Each struct mirrors one table and converts into the matching
//! `wardroster_core::models` entity. Text-encoded enums are parsed on the
//! way out; a value the `CHECK` constraints should have rejected surfaces as
//! a [`StoreError::Corrupt`].

use wardroster_core::error::StoreError;

pub mod assignment;
pub mod change_request;
pub mod staff;
pub mod user;
pub mod ward;

/// Wrap an enum parse failure for a row column.
pub(crate) fn corrupt(table: &str, msg: String) -> StoreError {
    StoreError::Corrupt(format!("{table} row: {msg}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::staff::StaffRow;
    use chrono::Utc;
    use wardroster_core::models::Staff;

    #[test]
    fn test_unknown_role_text_is_corrupt() {
        let row = StaffRow {
            id: 1,
            ward_id: 1,
            name: "Asha".into(),
            role: "nurse".into(),
            user_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let err = Staff::try_from(row).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(ref m) if m.starts_with("staff row")));
    }
}
