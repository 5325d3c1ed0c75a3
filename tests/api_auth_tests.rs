//! 认证与授权 API 集成测试（内存存储，不依赖数据库）

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use staff_directory::{models::role::Role, routes};
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{
    create_test_app_state, create_test_app_state_with_config, create_test_config, seed_user,
    MemoryStore,
};

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// 通过登录端点获取会话令牌
async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": email, "password": password }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    body["data"]["token"]
        .as_str()
        .expect("Login response missing token")
        .to_string()
}

#[tokio::test]
async fn test_login_success_sets_cookie_and_envelope() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "jane@example.com", "Secret123", Role::Employee).await;

    let app = routes::create_router(create_test_app_state(store));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "jane@example.com", "password": "Secret123" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Missing session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 200);
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["email"], "jane@example.com");
    assert!(body["data"]["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_uniform_message() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "jane@example.com", "Secret123", Role::Employee).await;

    let app = routes::create_router(create_test_app_state(store));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "jane@example.com", "password": "wrong" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email_uniform_message() {
    let store = Arc::new(MemoryStore::new());
    let app = routes::create_router(create_test_app_state(store));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "ghost@example.com", "password": "Secret123" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_invalid_email_format_is_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let app = routes::create_router(create_test_app_state(store));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "not-an-email", "password": "Secret123" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_without_token_is_unauthorized() {
    let store = Arc::new(MemoryStore::new());
    let app = routes::create_router(create_test_app_state(store));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_with_bearer_token() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "jane@example.com", "Secret123", Role::Employee).await;

    let app = routes::create_router(create_test_app_state(store));
    let token = login_token(&app, "jane@example.com", "Secret123").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/session")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert_eq!(body["data"]["role"], "employee");
}

#[tokio::test]
async fn test_session_with_cookie_fallback() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "jane@example.com", "Secret123", Role::Employee).await;

    let app = routes::create_router(create_test_app_state(store));
    let token = login_token(&app, "jane@example.com", "Secret123").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/session")
                .header(header::COOKIE, format!("auth_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_with_tampered_token_is_unauthorized() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "jane@example.com", "Secret123", Role::Employee).await;

    let app = routes::create_router(create_test_app_state(store));
    let mut token = login_token(&app, "jane@example.com", "Secret123").await;
    token.push_str("tampered");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/session")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_requires_admin_role() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "emp@example.com", "Secret123", Role::Employee).await;

    let app = routes::create_router(create_test_app_state(store));
    let token = login_token(&app, "emp@example.com", "Secret123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "firstName": "New",
                        "lastName": "Person",
                        "email": "new@example.com",
                        "password": "Secret123",
                        "department": "Sales",
                        "salary": 40000,
                        "joinedAt": "2026-01-05T00:00:00Z"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_as_admin_forces_employee_role() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "boss@example.com", "Secret123", Role::Admin).await;

    let app = routes::create_router(create_test_app_state(store));
    let token = login_token(&app, "boss@example.com", "Secret123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "firstName": "New",
                        "lastName": "Person",
                        "email": "new@example.com",
                        "password": "Secret123",
                        "role": "admin",
                        "department": "Sales",
                        "salary": 40000,
                        "joinedAt": "2026-01-05T00:00:00Z"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["role"], "employee");
}

#[tokio::test]
async fn test_register_enforces_configured_password_minimum() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "boss@example.com", "Secret123", Role::Admin).await;

    let mut config = create_test_config();
    config.security.password_min_length = 10;
    let app = routes::create_router(create_test_app_state_with_config(store, config));

    let token = login_token(&app, "boss@example.com", "Secret123").await;

    // 8 字符密码满足结构校验，但低于配置的下限
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "firstName": "New",
                        "lastName": "Person",
                        "email": "new@example.com",
                        "password": "Pass1234",
                        "department": "Sales",
                        "salary": 40000,
                        "joinedAt": "2026-01-05T00:00:00Z"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Password must be at least 10 characters");
}

#[tokio::test]
async fn test_employee_self_route_rejects_other_roles() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "viewer@example.com", "Secret123", Role::User).await;

    let app = routes::create_router(create_test_app_state(store));
    let token = login_token(&app, "viewer@example.com", "Secret123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/employees/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "department": "Support" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_analytics_requires_admin_role() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, "emp@example.com", "Secret123", Role::Employee).await;

    let app = routes::create_router(create_test_app_state(store));
    let token = login_token(&app, "emp@example.com", "Secret123").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/analytics/employees")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_responses_echo_request_id() {
    let store = Arc::new(MemoryStore::new());
    let app = routes::create_router(create_test_app_state(store));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "test-req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-req-42"
    );
}
