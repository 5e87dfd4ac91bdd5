//! Capability-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects the request with 403 unless
//! the caller's role grants the named capability. Use them as handler
//! parameters so the requirement is visible in the signature.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use wardroster_core::error::CoreError;
use wardroster_core::roles::Capability;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Declare an extractor that requires a single capability.
macro_rules! require_capability {
    ($(#[$doc:meta])* $name:ident, $capability:expr) => {
        $(#[$doc])*
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let user = AuthUser::from_request_parts(parts, state).await?;
                user.capabilities().require($capability)?;
                Ok($name(user))
            }
        }
    };
}

require_capability!(
    /// Requires the manage-users capability (administrators).
    RequireManageUsers,
    Capability::ManageUsers
);

require_capability!(
    /// Requires the create-ward capability (administrators).
    RequireCreateWard,
    Capability::CreateWard
);

require_capability!(
    /// Requires direct grid edit rights (in-charge).
    RequireEditor,
    Capability::Edit
);

require_capability!(
    /// Requires the right to approve or reject change requests.
    RequireApprover,
    Capability::Approve
);

/// Requires edit or add-staff rights (in-charge or administrators).
pub struct RequireStaffManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaffManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let caps = user.capabilities();
        if !caps.allows(Capability::Edit) && !caps.allows(Capability::AddStaff) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Edit or add-staff capability required".into(),
            )));
        }
        Ok(RequireStaffManager(user))
    }
}

/// Requires a rostered role without edit rights (staff, attendant,
/// sweeper). These roles change the grid through change requests.
pub struct RequireRestricted(pub AuthUser);

impl FromRequestParts<AppState> for RequireRestricted {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.capabilities().is_restricted() || user.role.duty_role().is_none() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only roles without edit rights submit change requests".into(),
            )));
        }
        Ok(RequireRestricted(user))
    }
}
