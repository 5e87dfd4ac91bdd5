//! Role-scoped read filtering.
//!
//! Applied wherever roster or grid data crosses into a viewer's read,
//! including the staff picker offered to editors.

use std::collections::HashMap;

use crate::models::Staff;
use crate::roles::{Capabilities, DutyRole};
use crate::types::DbId;

/// Keep only the staff whose duty role the viewer may see.
pub fn visible_staff(caps: &Capabilities, staff: Vec<Staff>) -> Vec<Staff> {
    if caps.visible_duty_roles.is_none() {
        return staff;
    }
    staff.into_iter().filter(|s| caps.can_see(s.role)).collect()
}

/// Keep only the cell entries whose staff the viewer may see.
///
/// `roles` maps staff id to duty role. Ids without a roster record are kept
/// only for unrestricted viewers.
pub fn visible_cell(
    caps: &Capabilities,
    staff_ids: &[DbId],
    roles: &HashMap<DbId, DutyRole>,
) -> Vec<DbId> {
    if caps.visible_duty_roles.is_none() {
        return staff_ids.to_vec();
    }
    staff_ids
        .iter()
        .copied()
        .filter(|id| roles.get(id).is_some_and(|role| caps.can_see(*role)))
        .collect()
}

/// Build the staff id → duty role lookup used by [`visible_cell`].
pub fn role_index(staff: &[Staff]) -> HashMap<DbId, DutyRole> {
    staff.iter().map(|s| (s.id, s.role)).collect()
}
