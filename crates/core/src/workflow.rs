//! Change-request status values and state machine.
//!
//! Status strings must match the `CHECK` constraint on
//! `change_requests.status`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(format!(
                "Invalid request status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod state_machine {
    use super::RequestStatus;
    use crate::error::CoreError;

    /// Statuses reachable from `from`. Terminal states return an empty slice.
    pub fn valid_transitions(from: RequestStatus) -> &'static [RequestStatus] {
        match from {
            RequestStatus::Pending => &[RequestStatus::Approved, RequestStatus::Rejected],
            RequestStatus::Approved | RequestStatus::Rejected => &[],
        }
    }

    pub fn can_transition(from: RequestStatus, to: RequestStatus) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a transition, returning [`CoreError::InvalidTransition`] for
    /// anything the machine does not allow.
    pub fn validate_transition(from: RequestStatus, to: RequestStatus) -> Result<(), CoreError> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

/// Validate a free-text reason, returning it trimmed.
pub fn validate_reason(reason: &str) -> Result<String, CoreError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "A reason is required for a change request".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::state_machine::*;
    use super::*;

    #[test]
    fn test_pending_to_approved() {
        assert!(can_transition(RequestStatus::Pending, RequestStatus::Approved));
    }

    #[test]
    fn test_pending_to_rejected() {
        assert!(can_transition(RequestStatus::Pending, RequestStatus::Rejected));
    }

    #[test]
    fn test_terminal_states_have_no_transitions() {
        assert!(valid_transitions(RequestStatus::Approved).is_empty());
        assert!(valid_transitions(RequestStatus::Rejected).is_empty());
    }

    #[test]
    fn test_approved_to_rejected_invalid() {
        let err = validate_transition(RequestStatus::Approved, RequestStatus::Rejected).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTransition { ref from, ref to } if from == "approved" && to == "rejected"
        ));
    }

    #[test]
    fn test_pending_to_pending_invalid() {
        assert!(!can_transition(RequestStatus::Pending, RequestStatus::Pending));
    }

    #[test]
    fn test_status_db_values() {
        assert_eq!(RequestStatus::from_str_value("approved"), Ok(RequestStatus::Approved));
        assert!(RequestStatus::from_str_value("cancelled").is_err());
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
    }

    #[test]
    fn test_reason_is_trimmed_and_required() {
        assert_eq!(validate_reason("  medical ").unwrap(), "medical");
        assert!(validate_reason("   ").is_err());
    }
}
