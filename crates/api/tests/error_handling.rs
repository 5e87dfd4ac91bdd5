//! `AppError` to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use wardroster_api::error::AppError;
use wardroster_core::error::{CoreError, StoreError};

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let (status, json) = render(CoreError::NotFound { entity: "Ward", id: 7 }.into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Ward with id 7 not found");
}

#[tokio::test]
async fn test_validation_maps_to_400() {
    let (status, json) = render(CoreError::Validation("Ward name is required".into()).into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Ward name is required");
}

#[tokio::test]
async fn test_duplicate_name_maps_to_409() {
    let err = CoreError::DuplicateName {
        entity: "Ward",
        name: "ICU".into(),
    };
    let (status, json) = render(err.into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("ICU"));
}

#[tokio::test]
async fn test_invalid_transition_maps_to_409() {
    let err = CoreError::InvalidTransition {
        from: "approved".into(),
        to: "rejected".into(),
    };
    let (status, json) = render(err.into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_auth_errors_map_to_401_and_403() {
    let (status, json) = render(CoreError::Unauthorized("no token".into()).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) = render(CoreError::Forbidden("no edit".into()).into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_transport_maps_to_503_without_leaking_details() {
    let err = CoreError::Transport("backend error: password authentication failed".into());
    let (status, json) = render(err.into()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "TRANSPORT_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_internal_errors_are_sanitized() {
    let (status, json) = render(CoreError::Internal("stack trace".into()).into()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");

    let (status, json) = render(AppError::InternalError("hash failure".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_bad_request_maps_to_400() {
    let (status, json) = render(AppError::BadRequest("self-delete".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_store_conflict_maps_to_409_not_503() {
    let err: CoreError = StoreError::Conflict {
        constraint: "users_username_key".into(),
    }
    .into();
    let (status, json) = render(err.into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn test_corrupt_row_maps_to_500() {
    let err: CoreError = StoreError::Corrupt("staff row: unknown duty role".into()).into();
    let (status, json) = render(err.into()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}
