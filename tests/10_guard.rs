mod common;

use axum::http::{header, StatusCode};
use serde_json::json;
use uuid::Uuid;

use portfolio_api::auth::{generate_token, Role};

const ADMIN_ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/api/admin/posts"),
    ("POST", "/api/admin/posts"),
    ("GET", "/api/admin/posts/1f9c2aee-9a35-4f0c-8f0b-0f2f3a5a9a11"),
    ("PATCH", "/api/admin/posts/1f9c2aee-9a35-4f0c-8f0b-0f2f3a5a9a11"),
    ("DELETE", "/api/admin/posts/1f9c2aee-9a35-4f0c-8f0b-0f2f3a5a9a11"),
    ("GET", "/api/admin/projects"),
    ("POST", "/api/admin/projects"),
    ("GET", "/api/admin/projects/1f9c2aee-9a35-4f0c-8f0b-0f2f3a5a9a11"),
    ("PATCH", "/api/admin/projects/1f9c2aee-9a35-4f0c-8f0b-0f2f3a5a9a11"),
    ("DELETE", "/api/admin/projects/1f9c2aee-9a35-4f0c-8f0b-0f2f3a5a9a11"),
];

#[tokio::test]
async fn admin_endpoints_reject_missing_session_with_403() {
    for (method, path) in ADMIN_ENDPOINTS {
        let (status, body) =
            common::send(common::test_app(), common::empty_request(method, path)).await;

        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {path}");
        assert_eq!(body["code"], "unauthenticated", "{method} {path}");
        assert_eq!(body["error"], true);
    }
}

#[tokio::test]
async fn admin_endpoints_reject_garbage_token_with_403() {
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/admin/posts")
        .header(header::AUTHORIZATION, "Bearer not.a.valid.token")
        .body(axum::body::Body::empty())
        .unwrap();

    let (status, body) = common::send(common::test_app(), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "unauthenticated");
}

#[tokio::test]
async fn admin_endpoints_reject_user_role_with_403_forbidden() {
    // Build the app first so the signing secret is configured.
    let app = common::test_app();
    let token = generate_token(Uuid::new_v4(), "user@example.com", Role::User).unwrap();

    for (method, path) in ADMIN_ENDPOINTS {
        let request = axum::http::Request::builder()
            .method(*method)
            .uri(*path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(axum::body::Body::empty())
            .unwrap();

        let (status, body) = common::send(app.clone(), request).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {path}");
        assert_eq!(body["code"], "forbidden", "{method} {path}");
    }
}

#[tokio::test]
async fn root_endpoint_is_public() {
    let (status, body) = common::send(common::test_app(), common::empty_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Portfolio API");
}

#[tokio::test]
async fn login_with_missing_fields_fails_before_storage() {
    let (status, body) = common::send(
        common::test_app(),
        common::json_request("POST", "/auth/login", json!({ "email": "", "password": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "missing_fields");
}
