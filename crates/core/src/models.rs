//! Domain entities and the create/update DTOs the stores accept.

use serde::{Deserialize, Serialize};

use crate::calendar::DateKey;
use crate::roles::{DutyRole, UserRole};
use crate::shifts::Shift;
use crate::types::{DbId, Timestamp};
use crate::workflow::RequestStatus;

// ---------------------------------------------------------------------------
// Ward
// ---------------------------------------------------------------------------

/// An independent scheduling namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ward {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateWard {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Login users
// ---------------------------------------------------------------------------

/// A credentialed actor.
///
/// Contains the password hash -- never serialize this directly. Use
/// [`UserProfile`] for outbound data.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginUser {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    /// Ward ids in the order the administrator assigned them.
    pub assigned_wards: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
    pub role_label: &'static str,
    pub assigned_wards: Vec<DbId>,
    pub created_at: Timestamp,
}

impl LoginUser {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            role_label: self.role.label(),
            assigned_wards: self.assigned_wards.clone(),
            created_at: self.created_at,
        }
    }

    pub fn is_assigned_to(&self, ward_id: DbId) -> bool {
        self.assigned_wards.contains(&ward_id)
    }
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    pub assigned_wards: Vec<DbId>,
}

/// Partial user update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub assigned_wards: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

/// A rosterable duty-slot occupant of one ward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Staff {
    pub id: DbId,
    pub ward_id: DbId,
    pub name: String,
    pub role: DutyRole,
    /// Login user this record was promoted from, if any.
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateStaff {
    pub ward_id: DbId,
    pub name: String,
    pub role: DutyRole,
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

/// Composite identity of one assignment entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentKey {
    pub ward_id: DbId,
    pub date_key: DateKey,
    pub shift_id: Shift,
    pub staff_id: DbId,
}

/// One staff member placed in one (date, shift) cell of a ward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub ward_id: DbId,
    pub date_key: DateKey,
    pub shift_id: Shift,
    pub staff_id: DbId,
    pub created_at: Timestamp,
}

impl Assignment {
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey {
            ward_id: self.ward_id,
            date_key: self.date_key,
            shift_id: self.shift_id,
            staff_id: self.staff_id,
        }
    }

    pub fn is_in_cell(&self, date_key: DateKey, shift: Shift) -> bool {
        self.date_key == date_key && self.shift_id == shift
    }
}

// ---------------------------------------------------------------------------
// Change requests
// ---------------------------------------------------------------------------

/// A restricted user's request to change a duty cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRequest {
    pub id: DbId,
    pub ward_id: DbId,
    /// Login user id of the requester.
    pub requested_by: DbId,
    /// Requester's display name at submission time.
    pub requested_by_name: String,
    pub date_key: DateKey,
    /// Shift label as shown on the grid (e.g. `"Night"`).
    pub shift_label: String,
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateChangeRequest {
    pub ward_id: DbId,
    pub requested_by: DbId,
    pub requested_by_name: String,
    pub date_key: DateKey,
    pub shift_label: String,
    pub reason: String,
}

/// Identity of the user submitting a change request.
#[derive(Debug, Clone)]
pub struct Requester {
    pub user_id: DbId,
    pub display_name: String,
}

impl From<&LoginUser> for Requester {
    fn from(user: &LoginUser) -> Self {
        Self {
            user_id: user.id,
            display_name: user.full_name.clone(),
        }
    }
}
