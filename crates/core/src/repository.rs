//! Store traits the roster engine depends on.
//!
//! One trait per entity, each exposing only the calls the engine makes.
//! Implementations decide where rows live ([`crate::memory::MemoryStore`]
//! in-process, `PgStore` in the database crate); the engine never reaches
//! past these traits. Every call is an independent request/response and may
//! fail with [`StoreError`].

use std::future::Future;

use crate::calendar::DateKey;
use crate::error::StoreError;
use crate::models::{
    Assignment, AssignmentKey, ChangeRequest, CreateChangeRequest, CreateStaff, CreateUser,
    CreateWard, LoginUser, Staff, UpdateUser, Ward,
};
use crate::shifts::Shift;
use crate::types::DbId;
use crate::workflow::RequestStatus;

pub trait WardStore: Send + Sync {
    /// All wards in creation order.
    fn list_wards(&self) -> impl Future<Output = Result<Vec<Ward>, StoreError>> + Send;

    fn find_ward(&self, id: DbId) -> impl Future<Output = Result<Option<Ward>, StoreError>> + Send;

    fn create_ward(
        &self,
        input: &CreateWard,
    ) -> impl Future<Output = Result<Ward, StoreError>> + Send;

    /// Returns `true` if a row was removed.
    fn delete_ward(&self, id: DbId) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

pub trait StaffStore: Send + Sync {
    /// Staff of one ward in insertion order.
    fn list_staff_by_ward(
        &self,
        ward_id: DbId,
    ) -> impl Future<Output = Result<Vec<Staff>, StoreError>> + Send;

    fn find_staff(&self, id: DbId)
        -> impl Future<Output = Result<Option<Staff>, StoreError>> + Send;

    fn create_staff(
        &self,
        input: &CreateStaff,
    ) -> impl Future<Output = Result<Staff, StoreError>> + Send;

    /// Returns `true` if a row was removed.
    fn delete_staff(&self, id: DbId) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

pub trait AssignmentStore: Send + Sync {
    /// Every assignment of one ward, oldest first.
    fn list_assignments_by_ward(
        &self,
        ward_id: DbId,
    ) -> impl Future<Output = Result<Vec<Assignment>, StoreError>> + Send;

    /// Assignments of one (date, shift) cell, oldest first.
    fn list_cell(
        &self,
        ward_id: DbId,
        date_key: DateKey,
        shift: Shift,
    ) -> impl Future<Output = Result<Vec<Assignment>, StoreError>> + Send;

    /// Insert an entry. Returns `None` if the same key is already present.
    fn create_assignment(
        &self,
        key: &AssignmentKey,
    ) -> impl Future<Output = Result<Option<Assignment>, StoreError>> + Send;

    /// Returns `true` if a row was removed.
    fn delete_assignment(
        &self,
        key: &AssignmentKey,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

pub trait ChangeRequestStore: Send + Sync {
    /// Requests of one ward, most recent first.
    fn list_requests_by_ward(
        &self,
        ward_id: DbId,
    ) -> impl Future<Output = Result<Vec<ChangeRequest>, StoreError>> + Send;

    fn find_request(
        &self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<ChangeRequest>, StoreError>> + Send;

    /// Insert a new request in the `pending` state.
    fn create_request(
        &self,
        input: &CreateChangeRequest,
    ) -> impl Future<Output = Result<ChangeRequest, StoreError>> + Send;

    /// Move a request from `from` to `to`. Returns `None` if no row has
    /// that id in status `from`, leaving the row untouched.
    fn update_request_status(
        &self,
        id: DbId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> impl Future<Output = Result<Option<ChangeRequest>, StoreError>> + Send;

    /// Returns `true` if a row was removed.
    fn delete_request(&self, id: DbId) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

pub trait UserStore: Send + Sync {
    /// All login users in creation order.
    fn list_users(&self) -> impl Future<Output = Result<Vec<LoginUser>, StoreError>> + Send;

    fn find_user(
        &self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<LoginUser>, StoreError>> + Send;

    /// Exact (case-sensitive) username lookup.
    fn find_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<LoginUser>, StoreError>> + Send;

    fn create_user(
        &self,
        input: &CreateUser,
    ) -> impl Future<Output = Result<LoginUser, StoreError>> + Send;

    /// Apply the non-`None` fields. Returns `None` if no row has that id.
    fn update_user(
        &self,
        id: DbId,
        input: &UpdateUser,
    ) -> impl Future<Output = Result<Option<LoginUser>, StoreError>> + Send;

    /// Returns `true` if a row was removed.
    fn delete_user(&self, id: DbId) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Everything the roster engine needs from persistence.
pub trait RosterStore: WardStore + StaffStore + AssignmentStore + ChangeRequestStore + UserStore {}

impl<T> RosterStore for T where
    T: WardStore + StaffStore + AssignmentStore + ChangeRequestStore + UserStore
{
}
