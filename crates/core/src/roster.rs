//! The roster engine.
//!
//! [`RosterService`] binds wards, staff, grid assignments, change requests
//! and login users together over an injected [`RosterStore`]. Capability
//! checks happen at the API boundary; read operations here take the viewer's
//! [`UserRole`] so every read that crosses into a viewer is filtered.
//!
//! Each store call is independent. Multi-step operations (ward deletion,
//! approval) are not rolled back when a later step fails.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::{self, DateKey};
use crate::error::{CoreError, StoreError};
use crate::models::{
    AssignmentKey, ChangeRequest, CreateChangeRequest, CreateStaff, CreateUser, CreateWard,
    LoginUser, Requester, Staff, UpdateUser, Ward,
};
use crate::repository::RosterStore;
use crate::roles::{DutyRole, UserRole};
use crate::shifts::{Shift, SHIFTS};
use crate::types::DbId;
use crate::visibility;
use crate::workflow::{state_machine, validate_reason, RequestStatus};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// What [`RosterService::delete_ward`] removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardDeletion {
    pub ward_id: DbId,
    pub assignments_removed: usize,
    pub requests_removed: usize,
    pub staff_removed: usize,
    pub users_updated: usize,
    /// The ward a client should switch to: the first remaining one.
    pub next_ward_id: Option<DbId>,
}

/// A removed staff record and the grid entries cleaned up with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffRemoval {
    pub staff: Staff,
    pub assignments_removed: usize,
}

/// Side effect of approving a change request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApprovalEffect {
    /// The requester was placed in the requested cell.
    Assigned { key: AssignmentKey },
    /// The requester was already in the requested cell.
    AlreadyAssigned { key: AssignmentKey },
    /// No roster entry in the ward matches the requester.
    NoMatchingStaff,
    /// The stored shift label does not name a shift.
    UnresolvedShift,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalOutcome {
    pub request: ChangeRequest,
    pub effect: ApprovalEffect,
}

/// Column header of the weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHeader {
    pub date_key: DateKey,
    /// Short weekday name, `Mon` through `Sun`.
    pub weekday: String,
    pub is_sunday: bool,
    pub holiday: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub date_key: DateKey,
    pub shift: Shift,
    pub staff_ids: Vec<DbId>,
    pub shaded: bool,
}

/// One Monday-start week of a ward, filtered for a viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekGrid {
    pub ward_id: DbId,
    pub days: Vec<DayHeader>,
    /// Day-major: the four shifts of Monday, then Tuesday, and so on.
    pub cells: Vec<GridCell>,
    pub previous_anchor: DateKey,
    pub next_anchor: DateKey,
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Pick the ward a client should show after the ward list changed.
///
/// Keeps `current` if it still exists, otherwise falls back to the first
/// ward, otherwise `None`.
pub fn select_current_ward(wards: &[Ward], current: Option<DbId>) -> Option<DbId> {
    current
        .filter(|id| wards.iter().any(|w| w.id == *id))
        .or_else(|| wards.first().map(|w| w.id))
}

/// Find the roster entry that stands for a login user.
///
/// An explicit `user_id` link wins. Otherwise the first entry whose name
/// equals `display_name` ignoring case, in roster order.
pub fn match_staff<'a>(staff: &'a [Staff], user_id: DbId, display_name: &str) -> Option<&'a Staff> {
    staff
        .iter()
        .find(|s| s.user_id == Some(user_id))
        .or_else(|| {
            let wanted = display_name.trim().to_lowercase();
            staff.iter().find(|s| s.name.trim().to_lowercase() == wanted)
        })
}

fn required_text(value: &str, field: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Drop repeated ward ids, keeping the first occurrence.
fn dedup_wards(wards: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::new();
    wards.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Log a failed cascade step and turn it into a transport error.
fn cascade_failure(ward_id: DbId, step: &'static str) -> impl FnOnce(StoreError) -> CoreError {
    move |err| {
        tracing::error!(ward_id, step, error = %err, "Ward deletion stopped part-way");
        CoreError::Transport(format!("ward deletion failed while removing {step}: {err}"))
    }
}

/// Report a unique-constraint hit on write as a duplicate of `name`. The
/// pre-insert lookups can race a concurrent insert.
fn duplicate_on_conflict(entity: &'static str, name: &str) -> impl FnOnce(StoreError) -> CoreError {
    let name = name.to_string();
    move |err| match err {
        StoreError::Conflict { .. } => CoreError::DuplicateName { entity, name },
        other => other.into(),
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// The roster engine over a store.
#[derive(Debug, Clone)]
pub struct RosterService<S> {
    store: S,
}

impl<S: RosterStore> RosterService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -- wards ---------------------------------------------------------------

    pub async fn list_wards(&self) -> Result<Vec<Ward>, CoreError> {
        Ok(self.store.list_wards().await?)
    }

    pub async fn find_ward(&self, id: DbId) -> Result<Ward, CoreError> {
        self.store
            .find_ward(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Ward", id })
    }

    pub async fn create_ward(&self, name: &str) -> Result<Ward, CoreError> {
        let name = required_text(name, "Ward name")?;
        let wanted = name.to_lowercase();
        let wards = self.store.list_wards().await?;
        if wards.iter().any(|w| w.name.to_lowercase() == wanted) {
            return Err(CoreError::DuplicateName {
                entity: "Ward",
                name,
            });
        }

        let ward = self
            .store
            .create_ward(&CreateWard { name: name.clone() })
            .await
            .map_err(duplicate_on_conflict("Ward", &name))?;
        tracing::info!(ward_id = ward.id, name = %ward.name, "Ward created");
        Ok(ward)
    }

    /// Delete a ward and everything keyed to it.
    ///
    /// Steps run in order: assignments, change requests, staff, the ward id
    /// in users' assignment lists, then the ward row.
    pub async fn delete_ward(&self, id: DbId) -> Result<WardDeletion, CoreError> {
        self.find_ward(id).await?;

        let assignments = self
            .store
            .list_assignments_by_ward(id)
            .await
            .map_err(cascade_failure(id, "assignments"))?;
        for assignment in &assignments {
            self.store
                .delete_assignment(&assignment.key())
                .await
                .map_err(cascade_failure(id, "assignments"))?;
        }
        tracing::debug!(ward_id = id, count = assignments.len(), "Ward assignments removed");

        let requests = self
            .store
            .list_requests_by_ward(id)
            .await
            .map_err(cascade_failure(id, "change requests"))?;
        for request in &requests {
            self.store
                .delete_request(request.id)
                .await
                .map_err(cascade_failure(id, "change requests"))?;
        }
        tracing::debug!(ward_id = id, count = requests.len(), "Ward change requests removed");

        let staff = self
            .store
            .list_staff_by_ward(id)
            .await
            .map_err(cascade_failure(id, "staff"))?;
        for member in &staff {
            self.store
                .delete_staff(member.id)
                .await
                .map_err(cascade_failure(id, "staff"))?;
        }
        tracing::debug!(ward_id = id, count = staff.len(), "Ward staff removed");

        let users = self
            .store
            .list_users()
            .await
            .map_err(cascade_failure(id, "user ward links"))?;
        let mut users_updated = 0;
        for user in users.iter().filter(|u| u.is_assigned_to(id)) {
            let update = UpdateUser {
                assigned_wards: Some(
                    user.assigned_wards
                        .iter()
                        .copied()
                        .filter(|w| *w != id)
                        .collect(),
                ),
                ..UpdateUser::default()
            };
            self.store
                .update_user(user.id, &update)
                .await
                .map_err(cascade_failure(id, "user ward links"))?;
            users_updated += 1;
        }

        self.store
            .delete_ward(id)
            .await
            .map_err(cascade_failure(id, "ward"))?;

        let remaining = self.store.list_wards().await?;
        let deletion = WardDeletion {
            ward_id: id,
            assignments_removed: assignments.len(),
            requests_removed: requests.len(),
            staff_removed: staff.len(),
            users_updated,
            next_ward_id: select_current_ward(&remaining, None),
        };
        tracing::info!(
            ward_id = id,
            staff_removed = deletion.staff_removed,
            assignments_removed = deletion.assignments_removed,
            requests_removed = deletion.requests_removed,
            "Ward deleted",
        );
        Ok(deletion)
    }

    // -- staff ---------------------------------------------------------------

    /// Staff of a ward in insertion order. Unknown wards have no staff.
    pub async fn list_staff(&self, ward_id: DbId) -> Result<Vec<Staff>, CoreError> {
        Ok(self.store.list_staff_by_ward(ward_id).await?)
    }

    pub async fn list_visible_staff(
        &self,
        ward_id: DbId,
        viewer: UserRole,
    ) -> Result<Vec<Staff>, CoreError> {
        let staff = self.list_staff(ward_id).await?;
        Ok(visibility::visible_staff(&viewer.capabilities(), staff))
    }

    pub async fn find_staff(&self, id: DbId) -> Result<Staff, CoreError> {
        self.store
            .find_staff(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Staff", id })
    }

    pub async fn add_staff(
        &self,
        ward_id: DbId,
        name: &str,
        role: DutyRole,
    ) -> Result<Staff, CoreError> {
        self.find_ward(ward_id).await?;
        let name = required_text(name, "Staff name")?;

        let staff = self
            .store
            .create_staff(&CreateStaff {
                ward_id,
                name,
                role,
                user_id: None,
            })
            .await?;
        tracing::info!(ward_id, staff_id = staff.id, role = role.as_str(), "Staff added");
        Ok(staff)
    }

    /// Put a login user assigned to the ward on its roster, linked by id.
    pub async fn promote_user(&self, ward_id: DbId, user_id: DbId) -> Result<Staff, CoreError> {
        self.find_ward(ward_id).await?;
        let user = self.find_user(user_id).await?;

        if !user.is_assigned_to(ward_id) {
            return Err(CoreError::Validation(format!(
                "User '{}' is not assigned to this ward",
                user.username
            )));
        }
        let role = user.role.duty_role().ok_or_else(|| {
            CoreError::Validation(format!(
                "Users with role '{}' cannot be rostered",
                user.role.label()
            ))
        })?;

        let existing = self.store.list_staff_by_ward(ward_id).await?;
        if existing.iter().any(|s| s.user_id == Some(user_id)) {
            return Err(CoreError::DuplicateName {
                entity: "Staff",
                name: user.full_name,
            });
        }

        let staff = self
            .store
            .create_staff(&CreateStaff {
                ward_id,
                name: user.full_name.clone(),
                role,
                user_id: Some(user_id),
            })
            .await?;
        tracing::info!(ward_id, staff_id = staff.id, user_id, "User promoted to staff");
        Ok(staff)
    }

    /// Remove a staff member and every grid entry that references them.
    ///
    /// Returns `None` when no such staff exists.
    pub async fn remove_staff(&self, staff_id: DbId) -> Result<Option<StaffRemoval>, CoreError> {
        let Some(staff) = self.store.find_staff(staff_id).await? else {
            return Ok(None);
        };

        let assignments = self.store.list_assignments_by_ward(staff.ward_id).await?;
        let mut assignments_removed = 0;
        for assignment in assignments.iter().filter(|a| a.staff_id == staff_id) {
            if self.store.delete_assignment(&assignment.key()).await? {
                assignments_removed += 1;
            }
        }
        self.store.delete_staff(staff_id).await?;

        tracing::info!(
            ward_id = staff.ward_id,
            staff_id,
            assignments_removed,
            "Staff removed",
        );
        Ok(Some(StaffRemoval {
            staff,
            assignments_removed,
        }))
    }

    /// Staff across every ward the user is assigned to, ward by ward.
    pub async fn list_staff_for_user(&self, user_id: DbId) -> Result<Vec<Staff>, CoreError> {
        let user = self.find_user(user_id).await?;
        let mut staff = Vec::new();
        for ward_id in &user.assigned_wards {
            staff.extend(self.store.list_staff_by_ward(*ward_id).await?);
        }
        Ok(staff)
    }

    // -- grid ----------------------------------------------------------------

    /// Place a staff member in a cell. Returns `false` if they were already
    /// there.
    pub async fn assign(
        &self,
        ward_id: DbId,
        date_key: DateKey,
        shift: Shift,
        staff_id: DbId,
    ) -> Result<bool, CoreError> {
        let key = AssignmentKey {
            ward_id,
            date_key,
            shift_id: shift,
            staff_id,
        };
        let created = self.store.create_assignment(&key).await?.is_some();
        if created {
            tracing::info!(ward_id, %date_key, shift = shift.as_str(), staff_id, "Staff assigned");
        } else {
            tracing::debug!(ward_id, %date_key, shift = shift.as_str(), staff_id, "Already assigned");
        }
        Ok(created)
    }

    /// Take a staff member out of a cell. Returns `false` if they were not
    /// there.
    pub async fn unassign(
        &self,
        ward_id: DbId,
        date_key: DateKey,
        shift: Shift,
        staff_id: DbId,
    ) -> Result<bool, CoreError> {
        let key = AssignmentKey {
            ward_id,
            date_key,
            shift_id: shift,
            staff_id,
        };
        let removed = self.store.delete_assignment(&key).await?;
        if removed {
            tracing::info!(ward_id, %date_key, shift = shift.as_str(), staff_id, "Staff unassigned");
        }
        Ok(removed)
    }

    /// Staff ids in a cell, in the order they were assigned.
    pub async fn get_cell(
        &self,
        ward_id: DbId,
        date_key: DateKey,
        shift: Shift,
    ) -> Result<Vec<DbId>, CoreError> {
        let cell = self.store.list_cell(ward_id, date_key, shift).await?;
        Ok(cell.into_iter().map(|a| a.staff_id).collect())
    }

    pub async fn list_visible_cell(
        &self,
        ward_id: DbId,
        date_key: DateKey,
        shift: Shift,
        viewer: UserRole,
    ) -> Result<Vec<DbId>, CoreError> {
        let ids = self.get_cell(ward_id, date_key, shift).await?;
        let caps = viewer.capabilities();
        if caps.visible_duty_roles.is_none() {
            return Ok(ids);
        }
        let staff = self.store.list_staff_by_ward(ward_id).await?;
        Ok(visibility::visible_cell(
            &caps,
            &ids,
            &visibility::role_index(&staff),
        ))
    }

    /// The Monday-start week containing `anchor`, filtered for `viewer`.
    pub async fn week_grid(
        &self,
        ward_id: DbId,
        anchor: NaiveDate,
        viewer: UserRole,
    ) -> Result<WeekGrid, CoreError> {
        self.find_ward(ward_id).await?;
        let caps = viewer.capabilities();
        let staff = self.store.list_staff_by_ward(ward_id).await?;
        let roles = visibility::role_index(&staff);
        let assignments = self.store.list_assignments_by_ward(ward_id).await?;
        let dates = calendar::week_dates(anchor);

        let days = dates
            .iter()
            .map(|date| DayHeader {
                date_key: DateKey::new(*date),
                weekday: date.weekday().to_string(),
                is_sunday: calendar::is_sunday(*date),
                holiday: calendar::holiday_name(*date),
            })
            .collect();

        let mut cells = Vec::with_capacity(dates.len() * SHIFTS.len());
        for (date_key, shift) in calendar::week_cells(anchor) {
            let ids: Vec<DbId> = assignments
                .iter()
                .filter(|a| a.is_in_cell(date_key, shift))
                .map(|a| a.staff_id)
                .collect();
            cells.push(GridCell {
                date_key,
                shift,
                staff_ids: visibility::visible_cell(&caps, &ids, &roles),
                shaded: calendar::is_shaded(date_key.date(), shift),
            });
        }

        Ok(WeekGrid {
            ward_id,
            days,
            cells,
            previous_anchor: DateKey::new(calendar::previous_week(anchor)),
            next_anchor: DateKey::new(calendar::next_week(anchor)),
        })
    }

    // -- change requests -----------------------------------------------------

    /// Requests of a ward, most recent first.
    pub async fn list_requests(&self, ward_id: DbId) -> Result<Vec<ChangeRequest>, CoreError> {
        Ok(self.store.list_requests_by_ward(ward_id).await?)
    }

    pub async fn count_pending(&self, ward_id: DbId) -> Result<usize, CoreError> {
        let requests = self.store.list_requests_by_ward(ward_id).await?;
        Ok(requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .count())
    }

    pub async fn find_request(&self, id: DbId) -> Result<ChangeRequest, CoreError> {
        self.store
            .find_request(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ChangeRequest",
                id,
            })
    }

    /// File a pending change request for a duty cell.
    ///
    /// The shift label must name a shift; it is stored in its display form.
    pub async fn submit(
        &self,
        ward_id: DbId,
        requester: &Requester,
        date_key: DateKey,
        shift_label: &str,
        reason: &str,
    ) -> Result<ChangeRequest, CoreError> {
        self.find_ward(ward_id).await?;
        let reason = validate_reason(reason)?;
        let shift = Shift::resolve_label(shift_label).ok_or_else(|| {
            CoreError::Validation(format!("Unknown shift '{}'", shift_label.trim()))
        })?;

        let request = self
            .store
            .create_request(&CreateChangeRequest {
                ward_id,
                requested_by: requester.user_id,
                requested_by_name: requester.display_name.clone(),
                date_key,
                shift_label: shift.label().to_string(),
                reason,
            })
            .await?;
        tracing::info!(
            ward_id,
            request_id = request.id,
            user_id = requester.user_id,
            %date_key,
            shift = shift.as_str(),
            "Change request submitted",
        );
        Ok(request)
    }

    /// Approve a pending request and place the requester in the cell.
    ///
    /// The status changes first. If the shift label or the requester cannot
    /// be resolved the request stays approved with no assignment, reported
    /// in [`ApprovalOutcome::effect`].
    pub async fn approve(&self, request_id: DbId) -> Result<ApprovalOutcome, CoreError> {
        let request = self.transition(request_id, RequestStatus::Approved).await?;

        let Some(shift) = Shift::resolve_label(&request.shift_label) else {
            tracing::warn!(
                request_id,
                shift_label = %request.shift_label,
                "Approved request names no known shift; nothing assigned",
            );
            return Ok(ApprovalOutcome {
                request,
                effect: ApprovalEffect::UnresolvedShift,
            });
        };

        let staff = self.store.list_staff_by_ward(request.ward_id).await?;
        let Some(member) = match_staff(&staff, request.requested_by, &request.requested_by_name)
        else {
            tracing::warn!(
                request_id,
                ward_id = request.ward_id,
                requested_by = request.requested_by,
                "Approved request has no matching staff; nothing assigned",
            );
            return Ok(ApprovalOutcome {
                request,
                effect: ApprovalEffect::NoMatchingStaff,
            });
        };

        let key = AssignmentKey {
            ward_id: request.ward_id,
            date_key: request.date_key,
            shift_id: shift,
            staff_id: member.id,
        };
        let created = self
            .assign(key.ward_id, key.date_key, key.shift_id, key.staff_id)
            .await
            .inspect_err(|err| {
                tracing::error!(
                    request_id,
                    error = %err,
                    "Request approved but the assignment was not written",
                );
            })?;
        let effect = if created {
            ApprovalEffect::Assigned { key }
        } else {
            ApprovalEffect::AlreadyAssigned { key }
        };
        Ok(ApprovalOutcome { request, effect })
    }

    pub async fn reject(&self, request_id: DbId) -> Result<ChangeRequest, CoreError> {
        self.transition(request_id, RequestStatus::Rejected).await
    }

    async fn transition(
        &self,
        request_id: DbId,
        to: RequestStatus,
    ) -> Result<ChangeRequest, CoreError> {
        let current = self.find_request(request_id).await?;
        state_machine::validate_transition(current.status, to)?;

        let Some(updated) = self
            .store
            .update_request_status(request_id, current.status, to)
            .await?
        else {
            // Another caller resolved or removed the request in between.
            let latest = self.find_request(request_id).await?;
            tracing::warn!(
                request_id,
                status = latest.status.as_str(),
                "Change request was resolved concurrently",
            );
            return Err(CoreError::InvalidTransition {
                from: latest.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        };
        tracing::info!(
            request_id,
            ward_id = updated.ward_id,
            from = current.status.as_str(),
            to = to.as_str(),
            "Change request resolved",
        );
        Ok(updated)
    }

    // -- users ---------------------------------------------------------------

    pub async fn list_users(&self) -> Result<Vec<LoginUser>, CoreError> {
        Ok(self.store.list_users().await?)
    }

    pub async fn find_user(&self, id: DbId) -> Result<LoginUser, CoreError> {
        self.store
            .find_user(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "User", id })
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<LoginUser>, CoreError> {
        Ok(self.store.find_user_by_username(username.trim()).await?)
    }

    /// Login users assigned to a ward.
    pub async fn list_ward_users(&self, ward_id: DbId) -> Result<Vec<LoginUser>, CoreError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().filter(|u| u.is_assigned_to(ward_id)).collect())
    }

    pub async fn create_user(&self, input: CreateUser) -> Result<LoginUser, CoreError> {
        let username = required_text(&input.username, "Username")?;
        let full_name = required_text(&input.full_name, "Full name")?;
        if input.password_hash.is_empty() {
            return Err(CoreError::Validation("Password is required".to_string()));
        }
        if self.store.find_user_by_username(&username).await?.is_some() {
            return Err(CoreError::DuplicateName {
                entity: "User",
                name: username,
            });
        }
        let assigned_wards = self.checked_wards(&input.assigned_wards).await?;

        let on_conflict = duplicate_on_conflict("User", &username);
        let user = self
            .store
            .create_user(&CreateUser {
                username,
                password_hash: input.password_hash,
                full_name,
                role: input.role,
                assigned_wards,
            })
            .await
            .map_err(on_conflict)?;
        tracing::info!(user_id = user.id, role = user.role.as_str(), "User created");
        Ok(user)
    }

    pub async fn update_user(&self, id: DbId, input: UpdateUser) -> Result<LoginUser, CoreError> {
        let existing = self.find_user(id).await?;

        let username = match input.username.as_deref() {
            Some(raw) => {
                let username = required_text(raw, "Username")?;
                if username != existing.username {
                    if let Some(other) = self.store.find_user_by_username(&username).await? {
                        if other.id != id {
                            return Err(CoreError::DuplicateName {
                                entity: "User",
                                name: username,
                            });
                        }
                    }
                }
                Some(username)
            }
            None => None,
        };
        let full_name = input
            .full_name
            .as_deref()
            .map(|raw| required_text(raw, "Full name"))
            .transpose()?;
        if input.password_hash.as_deref() == Some("") {
            return Err(CoreError::Validation("Password is required".to_string()));
        }
        let assigned_wards = match &input.assigned_wards {
            Some(wards) => Some(self.checked_wards(wards).await?),
            None => None,
        };

        let on_conflict =
            duplicate_on_conflict("User", username.as_deref().unwrap_or(&existing.username));
        let update = UpdateUser {
            username,
            password_hash: input.password_hash,
            full_name,
            role: input.role,
            assigned_wards,
        };
        let user = self
            .store
            .update_user(id, &update)
            .await
            .map_err(on_conflict)?
            .ok_or(CoreError::NotFound { entity: "User", id })?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: DbId) -> Result<(), CoreError> {
        if !self.store.delete_user(id).await? {
            return Err(CoreError::NotFound { entity: "User", id });
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Collapse repeated ids and check every ward exists.
    async fn checked_wards(&self, wards: &[DbId]) -> Result<Vec<DbId>, CoreError> {
        let wards = dedup_wards(wards);
        for ward_id in &wards {
            self.find_ward(*ward_id).await?;
        }
        Ok(wards)
    }
}
