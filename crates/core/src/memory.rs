//! In-process store backed by mutex-guarded tables.
//!
//! Used by tests and by tooling that does not need a database. The lock is
//! only held inside the synchronous body of each call, never across an
//! `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::calendar::DateKey;
use crate::error::StoreError;
use crate::models::{
    Assignment, AssignmentKey, ChangeRequest, CreateChangeRequest, CreateStaff, CreateUser,
    CreateWard, LoginUser, Staff, UpdateUser, Ward,
};
use crate::repository::{AssignmentStore, ChangeRequestStore, StaffStore, UserStore, WardStore};
use crate::shifts::Shift;
use crate::types::DbId;
use crate::workflow::RequestStatus;

#[derive(Debug, Default)]
struct Tables {
    next_id: DbId,
    wards: Vec<Ward>,
    staff: Vec<Staff>,
    assignments: Vec<Assignment>,
    requests: Vec<ChangeRequest>,
    users: Vec<LoginUser>,
}

impl Tables {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Row store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with [`StoreError::Backend`], as a
    /// remote store would when its transport drops.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("store is offline".to_string()));
        }
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }
}

// ---------------------------------------------------------------------------
// Wards
// ---------------------------------------------------------------------------

impl WardStore for MemoryStore {
    async fn list_wards(&self) -> Result<Vec<Ward>, StoreError> {
        Ok(self.lock()?.wards.clone())
    }

    async fn find_ward(&self, id: DbId) -> Result<Option<Ward>, StoreError> {
        Ok(self.lock()?.wards.iter().find(|w| w.id == id).cloned())
    }

    async fn create_ward(&self, input: &CreateWard) -> Result<Ward, StoreError> {
        let mut tables = self.lock()?;
        let wanted = input.name.to_lowercase();
        if tables.wards.iter().any(|w| w.name.to_lowercase() == wanted) {
            return Err(StoreError::Conflict {
                constraint: "uq_wards_name_lower".to_string(),
            });
        }
        let ward = Ward {
            id: tables.allocate_id(),
            name: input.name.clone(),
            created_at: Utc::now(),
        };
        tables.wards.push(ward.clone());
        Ok(ward)
    }

    async fn delete_ward(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.wards.len();
        tables.wards.retain(|w| w.id != id);
        Ok(tables.wards.len() != before)
    }
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

impl StaffStore for MemoryStore {
    async fn list_staff_by_ward(&self, ward_id: DbId) -> Result<Vec<Staff>, StoreError> {
        Ok(self
            .lock()?
            .staff
            .iter()
            .filter(|s| s.ward_id == ward_id)
            .cloned()
            .collect())
    }

    async fn find_staff(&self, id: DbId) -> Result<Option<Staff>, StoreError> {
        Ok(self.lock()?.staff.iter().find(|s| s.id == id).cloned())
    }

    async fn create_staff(&self, input: &CreateStaff) -> Result<Staff, StoreError> {
        let mut tables = self.lock()?;
        let staff = Staff {
            id: tables.allocate_id(),
            ward_id: input.ward_id,
            name: input.name.clone(),
            role: input.role,
            user_id: input.user_id,
            created_at: Utc::now(),
        };
        tables.staff.push(staff.clone());
        Ok(staff)
    }

    async fn delete_staff(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.staff.len();
        tables.staff.retain(|s| s.id != id);
        Ok(tables.staff.len() != before)
    }
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

impl AssignmentStore for MemoryStore {
    async fn list_assignments_by_ward(&self, ward_id: DbId) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .lock()?
            .assignments
            .iter()
            .filter(|a| a.ward_id == ward_id)
            .cloned()
            .collect())
    }

    async fn list_cell(
        &self,
        ward_id: DbId,
        date_key: DateKey,
        shift: Shift,
    ) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .lock()?
            .assignments
            .iter()
            .filter(|a| a.ward_id == ward_id && a.is_in_cell(date_key, shift))
            .cloned()
            .collect())
    }

    async fn create_assignment(&self, key: &AssignmentKey) -> Result<Option<Assignment>, StoreError> {
        let mut tables = self.lock()?;
        if tables.assignments.iter().any(|a| a.key() == *key) {
            return Ok(None);
        }
        let assignment = Assignment {
            id: tables.allocate_id(),
            ward_id: key.ward_id,
            date_key: key.date_key,
            shift_id: key.shift_id,
            staff_id: key.staff_id,
            created_at: Utc::now(),
        };
        tables.assignments.push(assignment.clone());
        Ok(Some(assignment))
    }

    async fn delete_assignment(&self, key: &AssignmentKey) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.assignments.len();
        tables.assignments.retain(|a| a.key() != *key);
        Ok(tables.assignments.len() != before)
    }
}

// ---------------------------------------------------------------------------
// Change requests
// ---------------------------------------------------------------------------

impl ChangeRequestStore for MemoryStore {
    async fn list_requests_by_ward(&self, ward_id: DbId) -> Result<Vec<ChangeRequest>, StoreError> {
        let mut requests: Vec<ChangeRequest> = self
            .lock()?
            .requests
            .iter()
            .filter(|r| r.ward_id == ward_id)
            .cloned()
            .collect();
        // Ids are monotonic, so they break ties between equal timestamps.
        requests.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(requests)
    }

    async fn find_request(&self, id: DbId) -> Result<Option<ChangeRequest>, StoreError> {
        Ok(self.lock()?.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn create_request(&self, input: &CreateChangeRequest) -> Result<ChangeRequest, StoreError> {
        let mut tables = self.lock()?;
        let now = Utc::now();
        let request = ChangeRequest {
            id: tables.allocate_id(),
            ward_id: input.ward_id,
            requested_by: input.requested_by,
            requested_by_name: input.requested_by_name.clone(),
            date_key: input.date_key,
            shift_label: input.shift_label.clone(),
            reason: input.reason.clone(),
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.requests.push(request.clone());
        Ok(request)
    }

    async fn update_request_status(
        &self,
        id: DbId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<Option<ChangeRequest>, StoreError> {
        let mut tables = self.lock()?;
        let Some(request) = tables
            .requests
            .iter_mut()
            .find(|r| r.id == id && r.status == from)
        else {
            return Ok(None);
        };
        request.status = to;
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }

    async fn delete_request(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.requests.len();
        tables.requests.retain(|r| r.id != id);
        Ok(tables.requests.len() != before)
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<LoginUser>, StoreError> {
        Ok(self.lock()?.users.clone())
    }

    async fn find_user(&self, id: DbId) -> Result<Option<LoginUser>, StoreError> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<LoginUser>, StoreError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<LoginUser, StoreError> {
        let mut tables = self.lock()?;
        if tables.users.iter().any(|u| u.username == input.username) {
            return Err(StoreError::Conflict {
                constraint: "users_username_key".to_string(),
            });
        }
        let now = Utc::now();
        let user = LoginUser {
            id: tables.allocate_id(),
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            full_name: input.full_name.clone(),
            role: input.role,
            assigned_wards: input.assigned_wards.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> Result<Option<LoginUser>, StoreError> {
        let mut tables = self.lock()?;
        if let Some(username) = &input.username {
            if tables.users.iter().any(|u| u.id != id && &u.username == username) {
                return Err(StoreError::Conflict {
                    constraint: "users_username_key".to_string(),
                });
            }
        }
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(username) = &input.username {
            user.username = username.clone();
        }
        if let Some(hash) = &input.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(full_name) = &input.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        if let Some(wards) = &input.assigned_wards {
            user.assigned_wards = wards.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn key(staff_id: DbId) -> AssignmentKey {
        AssignmentKey {
            ward_id: 1,
            date_key: DateKey::parse("2024-06-03").unwrap(),
            shift_id: Shift::Morning,
            staff_id,
        }
    }

    #[tokio::test]
    async fn test_ids_are_unique_across_tables() {
        let store = MemoryStore::new();
        let ward = store
            .create_ward(&CreateWard { name: "ICU".into() })
            .await
            .unwrap();
        let staff = store
            .create_staff(&CreateStaff {
                ward_id: ward.id,
                name: "Asha".into(),
                role: crate::roles::DutyRole::Staff,
                user_id: None,
            })
            .await
            .unwrap();
        assert_ne!(ward.id, staff.id);
    }

    #[tokio::test]
    async fn test_duplicate_assignment_is_not_inserted() {
        let store = MemoryStore::new();
        assert!(store.create_assignment(&key(7)).await.unwrap().is_some());
        assert!(store.create_assignment(&key(7)).await.unwrap().is_none());
        assert_eq!(store.list_assignments_by_ward(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_assignment_reports_whether_removed() {
        let store = MemoryStore::new();
        store.create_assignment(&key(7)).await.unwrap();
        assert!(store.delete_assignment(&key(7)).await.unwrap());
        assert!(!store.delete_assignment(&key(7)).await.unwrap());
    }

    #[tokio::test]
    async fn test_requests_list_newest_first() {
        let store = MemoryStore::new();
        let input = |reason: &str| CreateChangeRequest {
            ward_id: 1,
            requested_by: 9,
            requested_by_name: "Ravi".into(),
            date_key: DateKey::parse("2024-06-10").unwrap(),
            shift_label: "Night".into(),
            reason: reason.into(),
        };
        let first = store.create_request(&input("first")).await.unwrap();
        let second = store.create_request(&input("second")).await.unwrap();
        let listed = store.list_requests_by_ward(1).await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_status_update_only_from_expected_status() {
        let store = MemoryStore::new();
        let request = store
            .create_request(&CreateChangeRequest {
                ward_id: 1,
                requested_by: 9,
                requested_by_name: "Ravi".into(),
                date_key: DateKey::parse("2024-06-10").unwrap(),
                shift_label: "Night".into(),
                reason: "medical".into(),
            })
            .await
            .unwrap();

        let approved = store
            .update_request_status(request.id, RequestStatus::Pending, RequestStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.unwrap().status, RequestStatus::Approved);

        // A second writer that also read `pending` loses.
        let stale = store
            .update_request_status(request.id, RequestStatus::Pending, RequestStatus::Rejected)
            .await
            .unwrap();
        assert!(stale.is_none());
        assert_eq!(
            store.find_request(request.id).await.unwrap().unwrap().status,
            RequestStatus::Approved
        );
    }

    #[tokio::test]
    async fn test_duplicate_ward_name_is_conflict() {
        let store = MemoryStore::new();
        store
            .create_ward(&CreateWard { name: "ICU".into() })
            .await
            .unwrap();
        assert_matches!(
            store.create_ward(&CreateWard { name: "icu".into() }).await,
            Err(StoreError::Conflict { .. })
        );
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert_matches!(store.list_wards().await, Err(StoreError::Backend(_)));
        store.set_offline(false);
        assert!(store.list_wards().await.unwrap().is_empty());
    }
}
