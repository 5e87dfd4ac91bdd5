//! Authentication and capability checks at the HTTP layer.
//!
//! Every request here is rejected before the database is reached, except the
//! store-outage tests, which rely on it being unreachable.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, get_auth, post_json, post_json_auth, send, token_for};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use wardroster_api::auth::jwt::Claims;
use wardroster_core::roles::UserRole;

async fn assert_error(response: axum::response::Response, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected body: {json}");
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let response = get(common::build_offline_app(), "/api/v1/wards").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn test_non_bearer_header_is_unauthorized() {
    let app = common::build_offline_app();
    let request = axum::http::Request::builder()
        .uri("/api/v1/auth/me")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let response = get_auth(common::build_offline_app(), "/api/v1/auth/me", "not-a-jwt").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn test_token_with_unknown_role_is_unauthorized() {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: 9,
        role: "nurse".into(),
        exp: now + 600,
        iat: now,
        jti: "jti".into(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(common::TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let response = get_auth(common::build_offline_app(), "/api/v1/wards", &token).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn test_login_requires_username_and_password() {
    let response = post_json(
        common::build_offline_app(),
        "/api/v1/auth/login",
        json!({ "username": "  ", "password": "" }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_only_admins_create_wards() {
    for role in [UserRole::InCharge, UserRole::Staff, UserRole::Sweeper] {
        let response = post_json_auth(
            common::build_offline_app(),
            "/api/v1/wards",
            json!({ "name": "ICU" }),
            &token_for(1, role),
        )
        .await;
        assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    }
}

#[tokio::test]
async fn test_only_admins_manage_users() {
    let response = get_auth(
        common::build_offline_app(),
        "/api/v1/admin/users",
        &token_for(2, UserRole::InCharge),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[tokio::test]
async fn test_admin_cannot_edit_the_grid() {
    let response = send(
        common::build_offline_app(),
        Method::PUT,
        "/api/v1/wards/1/cells/2024-06-03/morning/staff/5",
        Some(&token_for(1, UserRole::Admin)),
        None,
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[tokio::test]
async fn test_restricted_roles_cannot_approve() {
    for role in [UserRole::Staff, UserRole::Attendant, UserRole::Admin] {
        let response = send(
            common::build_offline_app(),
            Method::POST,
            "/api/v1/requests/1/approve",
            Some(&token_for(3, role)),
            None,
        )
        .await;
        assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    }
}

#[tokio::test]
async fn test_editors_and_admins_do_not_submit_requests() {
    for role in [UserRole::InCharge, UserRole::Admin] {
        let response = post_json_auth(
            common::build_offline_app(),
            "/api/v1/wards/1/requests",
            json!({ "date_key": "2024-06-10", "shift": "Night", "reason": "medical" }),
            &token_for(4, role),
        )
        .await;
        assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    }
}

#[tokio::test]
async fn test_staff_cannot_remove_roster_entries() {
    let response = send(
        common::build_offline_app(),
        Method::DELETE,
        "/api/v1/staff/1",
        Some(&token_for(5, UserRole::Staff)),
        None,
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[tokio::test]
async fn test_analytics_requires_edit() {
    let response = get_auth(
        common::build_offline_app(),
        "/api/v1/wards/1/analytics?month=2024-06",
        &token_for(6, UserRole::Attendant),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[tokio::test]
async fn test_my_staff_requires_edit() {
    let response = get_auth(
        common::build_offline_app(),
        "/api/v1/my/staff",
        &token_for(7, UserRole::Sweeper),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

// ---------------------------------------------------------------------------
// Path validation and store outages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_shift_in_path_is_bad_request() {
    let response = get_auth(
        common::build_offline_app(),
        "/api/v1/wards/1/cells/2024-06-03/afternoon",
        &token_for(8, UserRole::Staff),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let response = get_auth(
        common::build_offline_app(),
        "/api/v1/admin/users",
        &token_for(1, UserRole::Admin),
    )
    .await;
    assert_error(response, StatusCode::SERVICE_UNAVAILABLE, "TRANSPORT_ERROR").await;
}

#[tokio::test]
async fn test_login_during_store_outage_is_service_unavailable() {
    let response = post_json(
        common::build_offline_app(),
        "/api/v1/auth/login",
        json!({ "username": "meera", "password": "night-shift-42" }),
    )
    .await;
    assert_error(response, StatusCode::SERVICE_UNAVAILABLE, "TRANSPORT_ERROR").await;
}
