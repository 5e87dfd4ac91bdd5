//! [`PgStore`]: the roster store traits over PostgreSQL.

use sqlx::PgPool;
use wardroster_core::calendar::DateKey;
use wardroster_core::error::StoreError;
use wardroster_core::models::{
    Assignment, AssignmentKey, ChangeRequest, CreateChangeRequest, CreateStaff, CreateUser,
    CreateWard, LoginUser, Staff, UpdateUser, Ward,
};
use wardroster_core::repository::{
    AssignmentStore, ChangeRequestStore, StaffStore, UserStore, WardStore,
};
use wardroster_core::shifts::Shift;
use wardroster_core::types::DbId;
use wardroster_core::workflow::RequestStatus;

use crate::repositories::{AssignmentRepo, ChangeRequestRepo, StaffRepo, UserRepo, WardRepo};

/// Store backed by a connection pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a sqlx failure onto the store error the engine understands.
///
/// Unique violations (SQLSTATE 23505) are duplicates, not outages.
fn backend(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            tracing::warn!(%constraint, "Unique constraint violated");
            return StoreError::Conflict { constraint };
        }
    }
    tracing::error!(error = %err, "Database call failed");
    StoreError::Backend(err.to_string())
}

/// Convert a batch of rows, failing on the first corrupt one.
fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

impl WardStore for PgStore {
    async fn list_wards(&self) -> Result<Vec<Ward>, StoreError> {
        let rows = WardRepo::list(&self.pool).await.map_err(backend)?;
        Ok(rows.into_iter().map(Ward::from).collect())
    }

    async fn find_ward(&self, id: DbId) -> Result<Option<Ward>, StoreError> {
        let row = WardRepo::find_by_id(&self.pool, id).await.map_err(backend)?;
        Ok(row.map(Ward::from))
    }

    async fn create_ward(&self, input: &CreateWard) -> Result<Ward, StoreError> {
        let row = WardRepo::create(&self.pool, input).await.map_err(backend)?;
        Ok(row.into())
    }

    async fn delete_ward(&self, id: DbId) -> Result<bool, StoreError> {
        WardRepo::delete(&self.pool, id).await.map_err(backend)
    }
}

impl StaffStore for PgStore {
    async fn list_staff_by_ward(&self, ward_id: DbId) -> Result<Vec<Staff>, StoreError> {
        let rows = StaffRepo::list_by_ward(&self.pool, ward_id)
            .await
            .map_err(backend)?;
        convert_all(rows)
    }

    async fn find_staff(&self, id: DbId) -> Result<Option<Staff>, StoreError> {
        StaffRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?
            .map(Staff::try_from)
            .transpose()
    }

    async fn create_staff(&self, input: &CreateStaff) -> Result<Staff, StoreError> {
        let row = StaffRepo::create(&self.pool, input).await.map_err(backend)?;
        Staff::try_from(row)
    }

    async fn delete_staff(&self, id: DbId) -> Result<bool, StoreError> {
        StaffRepo::delete(&self.pool, id).await.map_err(backend)
    }
}

impl AssignmentStore for PgStore {
    async fn list_assignments_by_ward(&self, ward_id: DbId) -> Result<Vec<Assignment>, StoreError> {
        let rows = AssignmentRepo::list_by_ward(&self.pool, ward_id)
            .await
            .map_err(backend)?;
        convert_all(rows)
    }

    async fn list_cell(
        &self,
        ward_id: DbId,
        date_key: DateKey,
        shift: Shift,
    ) -> Result<Vec<Assignment>, StoreError> {
        let rows = AssignmentRepo::list_cell(&self.pool, ward_id, date_key.date(), shift)
            .await
            .map_err(backend)?;
        convert_all(rows)
    }

    async fn create_assignment(&self, key: &AssignmentKey) -> Result<Option<Assignment>, StoreError> {
        AssignmentRepo::create(&self.pool, key)
            .await
            .map_err(backend)?
            .map(Assignment::try_from)
            .transpose()
    }

    async fn delete_assignment(&self, key: &AssignmentKey) -> Result<bool, StoreError> {
        AssignmentRepo::delete(&self.pool, key).await.map_err(backend)
    }
}

impl ChangeRequestStore for PgStore {
    async fn list_requests_by_ward(&self, ward_id: DbId) -> Result<Vec<ChangeRequest>, StoreError> {
        let rows = ChangeRequestRepo::list_by_ward(&self.pool, ward_id)
            .await
            .map_err(backend)?;
        convert_all(rows)
    }

    async fn find_request(&self, id: DbId) -> Result<Option<ChangeRequest>, StoreError> {
        ChangeRequestRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?
            .map(ChangeRequest::try_from)
            .transpose()
    }

    async fn create_request(&self, input: &CreateChangeRequest) -> Result<ChangeRequest, StoreError> {
        let row = ChangeRequestRepo::create(&self.pool, input)
            .await
            .map_err(backend)?;
        ChangeRequest::try_from(row)
    }

    async fn update_request_status(
        &self,
        id: DbId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<Option<ChangeRequest>, StoreError> {
        ChangeRequestRepo::update_status(&self.pool, id, from, to)
            .await
            .map_err(backend)?
            .map(ChangeRequest::try_from)
            .transpose()
    }

    async fn delete_request(&self, id: DbId) -> Result<bool, StoreError> {
        ChangeRequestRepo::delete(&self.pool, id)
            .await
            .map_err(backend)
    }
}

impl UserStore for PgStore {
    async fn list_users(&self) -> Result<Vec<LoginUser>, StoreError> {
        let rows = UserRepo::list(&self.pool).await.map_err(backend)?;
        convert_all(rows)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<LoginUser>, StoreError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?
            .map(LoginUser::try_from)
            .transpose()
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<LoginUser>, StoreError> {
        UserRepo::find_by_username(&self.pool, username)
            .await
            .map_err(backend)?
            .map(LoginUser::try_from)
            .transpose()
    }

    async fn create_user(&self, input: &CreateUser) -> Result<LoginUser, StoreError> {
        let row = UserRepo::create(&self.pool, input).await.map_err(backend)?;
        LoginUser::try_from(row)
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> Result<Option<LoginUser>, StoreError> {
        UserRepo::update(&self.pool, id, input)
            .await
            .map_err(backend)?
            .map(LoginUser::try_from)
            .transpose()
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError> {
        UserRepo::delete(&self.pool, id).await.map_err(backend)
    }
}
