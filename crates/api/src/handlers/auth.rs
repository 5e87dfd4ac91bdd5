//! Handlers for the `/auth` resource (login, current user).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use wardroster_core::error::CoreError;
use wardroster_core::models::UserProfile;
use wardroster_core::roles::Capabilities;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserProfile,
    pub capabilities: Capabilities,
}

/// The caller and what their role allows.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
    pub capabilities: Capabilities,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    if input.username.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username and password are required".into(),
        )));
    }

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = state
        .roster
        .find_user_by_username(&input.username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    let access_token = generate_access_token(user.id, user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = user.role.as_str(), "User logged in");

    Ok(Json(DataResponse {
        data: AuthResponse {
            access_token,
            expires_in: state.config.jwt.access_token_expiry_mins * 60,
            capabilities: user.role.capabilities(),
            user: user.profile(),
        },
    }))
}

/// GET /api/v1/auth/me
///
/// The current user's profile and capabilities. A token for a deleted user
/// is rejected with 401.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<MeResponse>>> {
    let user = state
        .roster
        .find_user(auth_user.user_id)
        .await
        .map_err(|e| match e {
            CoreError::NotFound { .. } => {
                AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
            }
            other => AppError::Core(other),
        })?;

    Ok(Json(DataResponse {
        data: MeResponse {
            capabilities: user.role.capabilities(),
            user: user.profile(),
        },
    }))
}
