//! Login roles, duty roles and the static capability table.
//!
//! Role names must match the `CHECK` constraints in the `users` and `staff`
//! migrations.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_IN_CHARGE: &str = "in_charge";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_ATTENDANT: &str = "attendant";
pub const ROLE_SWEEPER: &str = "sweeper";
pub const ROLE_RELIEVER: &str = "reliever";

// ---------------------------------------------------------------------------
// Login roles
// ---------------------------------------------------------------------------

/// Role of a credentialed login user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    InCharge,
    Staff,
    Attendant,
    Sweeper,
}

/// All login roles, in display order.
pub const USER_ROLES: &[UserRole] = &[
    UserRole::Admin,
    UserRole::InCharge,
    UserRole::Staff,
    UserRole::Attendant,
    UserRole::Sweeper,
];

impl UserRole {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_IN_CHARGE => Ok(Self::InCharge),
            ROLE_STAFF => Ok(Self::Staff),
            ROLE_ATTENDANT => Ok(Self::Attendant),
            ROLE_SWEEPER => Ok(Self::Sweeper),
            _ => Err(format!(
                "Invalid user role '{s}'. Must be one of: {ROLE_ADMIN}, {ROLE_IN_CHARGE}, \
                 {ROLE_STAFF}, {ROLE_ATTENDANT}, {ROLE_SWEEPER}"
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::InCharge => ROLE_IN_CHARGE,
            Self::Staff => ROLE_STAFF,
            Self::Attendant => ROLE_ATTENDANT,
            Self::Sweeper => ROLE_SWEEPER,
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::InCharge => "In-Charge Sister",
            Self::Staff => "Staff (Sis/Bro)",
            Self::Attendant => "Attendant",
            Self::Sweeper => "Sweeper",
        }
    }

    /// Whether the role is offered on the login screen. Administrators sign
    /// in through a separate path.
    pub fn shows_in_login(self) -> bool {
        !matches!(self, Self::Admin)
    }

    /// The duty role a user of this role occupies when rostered, if any.
    pub fn duty_role(self) -> Option<DutyRole> {
        match self {
            Self::Admin => None,
            Self::InCharge => Some(DutyRole::InCharge),
            Self::Staff => Some(DutyRole::Staff),
            Self::Attendant => Some(DutyRole::Attendant),
            Self::Sweeper => Some(DutyRole::Sweeper),
        }
    }

    /// The capability record for this role.
    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::Admin => Capabilities {
                can_edit: false,
                can_approve: false,
                can_manage_users: true,
                can_print: false,
                can_create_ward: true,
                can_add_staff: true,
                visible_duty_roles: None,
            },
            Self::InCharge => Capabilities {
                can_edit: true,
                can_approve: true,
                can_manage_users: false,
                can_print: true,
                can_create_ward: false,
                can_add_staff: false,
                visible_duty_roles: Some(vec![
                    DutyRole::InCharge,
                    DutyRole::Staff,
                    DutyRole::Attendant,
                    DutyRole::Sweeper,
                ]),
            },
            Self::Staff => Capabilities {
                visible_duty_roles: Some(vec![DutyRole::InCharge, DutyRole::Staff]),
                ..Capabilities::none()
            },
            Self::Attendant => Capabilities {
                visible_duty_roles: Some(vec![DutyRole::Attendant, DutyRole::Sweeper]),
                ..Capabilities::none()
            },
            Self::Sweeper => Capabilities {
                visible_duty_roles: Some(vec![DutyRole::Sweeper]),
                ..Capabilities::none()
            },
        }
    }
}

/// Look up the capabilities for a role name.
///
/// Unknown names get [`Capabilities::none`].
pub fn capabilities_of(role: &str) -> Capabilities {
    UserRole::from_str_value(role)
        .map(UserRole::capabilities)
        .unwrap_or_else(|_| Capabilities::none())
}

// ---------------------------------------------------------------------------
// Duty roles
// ---------------------------------------------------------------------------

/// Job role of a rostered staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyRole {
    InCharge,
    Staff,
    Attendant,
    Sweeper,
    Reliever,
}

/// All duty roles, in display order.
pub const DUTY_ROLES: &[DutyRole] = &[
    DutyRole::InCharge,
    DutyRole::Staff,
    DutyRole::Attendant,
    DutyRole::Sweeper,
    DutyRole::Reliever,
];

impl DutyRole {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_IN_CHARGE => Ok(Self::InCharge),
            ROLE_STAFF => Ok(Self::Staff),
            ROLE_ATTENDANT => Ok(Self::Attendant),
            ROLE_SWEEPER => Ok(Self::Sweeper),
            ROLE_RELIEVER => Ok(Self::Reliever),
            _ => Err(format!(
                "Invalid duty role '{s}'. Must be one of: {ROLE_IN_CHARGE}, {ROLE_STAFF}, \
                 {ROLE_ATTENDANT}, {ROLE_SWEEPER}, {ROLE_RELIEVER}"
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InCharge => ROLE_IN_CHARGE,
            Self::Staff => ROLE_STAFF,
            Self::Attendant => ROLE_ATTENDANT,
            Self::Sweeper => ROLE_SWEEPER,
            Self::Reliever => ROLE_RELIEVER,
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::InCharge => "In-Charge Sister",
            Self::Staff => "Staff (Sis/Bro)",
            Self::Attendant => "Attendant",
            Self::Sweeper => "Sweeper",
            Self::Reliever => "Leave Reliever",
        }
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// A single gated action, used with [`Capabilities::require`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Edit,
    Approve,
    ManageUsers,
    Print,
    CreateWard,
    AddStaff,
}

impl Capability {
    fn name(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Approve => "approve",
            Self::ManageUsers => "manage-users",
            Self::Print => "print",
            Self::CreateWard => "create-ward",
            Self::AddStaff => "add-staff",
        }
    }
}

/// What a login role may do and which duty roles it may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub can_edit: bool,
    pub can_approve: bool,
    pub can_manage_users: bool,
    pub can_print: bool,
    pub can_create_ward: bool,
    pub can_add_staff: bool,
    /// `None` means no restriction.
    pub visible_duty_roles: Option<Vec<DutyRole>>,
}

impl Capabilities {
    /// The most restrictive capability set: nothing allowed, nothing visible.
    pub fn none() -> Self {
        Self {
            can_edit: false,
            can_approve: false,
            can_manage_users: false,
            can_print: false,
            can_create_ward: false,
            can_add_staff: false,
            visible_duty_roles: Some(Vec::new()),
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Edit => self.can_edit,
            Capability::Approve => self.can_approve,
            Capability::ManageUsers => self.can_manage_users,
            Capability::Print => self.can_print,
            Capability::CreateWard => self.can_create_ward,
            Capability::AddStaff => self.can_add_staff,
        }
    }

    /// Return `Forbidden` unless `capability` is granted.
    pub fn require(&self, capability: Capability) -> Result<(), CoreError> {
        if self.allows(capability) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "The '{}' capability is required",
                capability.name()
            )))
        }
    }

    /// Whether a staff member with `role` is visible under these capabilities.
    pub fn can_see(&self, role: DutyRole) -> bool {
        match &self.visible_duty_roles {
            None => true,
            Some(roles) => roles.contains(&role),
        }
    }

    /// Only editors can change the grid directly; everyone else goes through
    /// change requests.
    pub fn is_restricted(&self) -> bool {
        !self.can_edit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_db_string() {
        for role in USER_ROLES {
            assert_eq!(UserRole::from_str_value(role.as_str()), Ok(*role));
        }
        for role in DUTY_ROLES {
            assert_eq!(DutyRole::from_str_value(role.as_str()), Ok(*role));
        }
    }

    #[test]
    fn test_unknown_role_is_fail_closed() {
        let caps = capabilities_of("superuser");
        assert_eq!(caps, Capabilities::none());
        assert!(!caps.can_see(DutyRole::Staff));
        assert!(caps.require(Capability::Edit).is_err());
    }

    #[test]
    fn test_admin_manages_users_but_does_not_edit_roster() {
        let caps = UserRole::Admin.capabilities();
        assert!(caps.can_manage_users);
        assert!(caps.can_create_ward);
        assert!(!caps.can_edit);
        assert!(!caps.can_approve);
        assert_eq!(caps.visible_duty_roles, None);
        assert!(caps.can_see(DutyRole::Reliever));
    }

    #[test]
    fn test_in_charge_sees_everyone_but_relievers() {
        let caps = UserRole::InCharge.capabilities();
        assert!(caps.can_edit && caps.can_approve && caps.can_print);
        assert!(caps.can_see(DutyRole::Sweeper));
        assert!(!caps.can_see(DutyRole::Reliever));
    }

    #[test]
    fn test_restricted_roles_see_their_tier() {
        let staff = UserRole::Staff.capabilities();
        assert!(staff.can_see(DutyRole::InCharge));
        assert!(!staff.can_see(DutyRole::Attendant));

        let attendant = UserRole::Attendant.capabilities();
        assert!(attendant.can_see(DutyRole::Sweeper));
        assert!(!attendant.can_see(DutyRole::Staff));

        let sweeper = UserRole::Sweeper.capabilities();
        assert_eq!(sweeper.visible_duty_roles, Some(vec![DutyRole::Sweeper]));
        assert!(sweeper.is_restricted());
    }

    #[test]
    fn test_require_names_missing_capability() {
        let err = UserRole::Staff
            .capabilities()
            .require(Capability::Approve)
            .unwrap_err();
        assert!(err.to_string().contains("approve"));
    }

    #[test]
    fn test_admin_has_no_duty_role() {
        assert_eq!(UserRole::Admin.duty_role(), None);
        assert_eq!(UserRole::InCharge.duty_role(), Some(DutyRole::InCharge));
        assert!(!UserRole::Admin.shows_in_login());
        assert!(UserRole::Sweeper.shows_in_login());
    }

    #[test]
    fn test_roles_serialize_snake_case() {
        let json = serde_json::to_string(&DutyRole::InCharge).unwrap();
        assert_eq!(json, "\"in_charge\"");
    }
}
