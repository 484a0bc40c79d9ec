//! HTTP-level integration tests for registration, login, and profile.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, TEST_PASSWORD};
use orderdesk_api::auth::jwt::validate_token;
use orderdesk_api::bootstrap::ensure_admin;
use orderdesk_api::config::AdminBootstrap;
use orderdesk_db::repositories::UserRepo;
use sqlx::PgPool;

fn registration(email: &str) -> serde_json::Value {
    serde_json::json!({ "name": "Ana", "email": email, "password": "abcdef" })
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registering returns 201 with a token that decodes to the new user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/api/auth/register", registration("ana@x.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["user"]["name"], "Ana");
    assert_eq!(json["user"]["email"], "ana@x.com");
    assert_eq!(json["user"]["role"], "user");
    assert!(json["user"].get("password_hash").is_none());

    let token = json["token"].as_str().expect("token must be a string");
    let config = common::test_config(std::path::PathBuf::new());
    let claims = validate_token(token, &config.jwt).expect("token should validate");
    assert_eq!(claims.user_id, json["user"]["id"].as_i64().unwrap());
    assert_eq!(claims.role, "user");

    let stored = UserRepo::find_by_email(&pool, "ana@x.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "abcdef");
}

/// Emails are stored lowercased, so a differently-cased repeat conflicts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = post_json(app.clone(), "/api/auth/register", registration("ana@x.com")).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/auth/register", registration("ANA@x.com")).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["message"], "Email already registered");
}

/// Invalid fields are all reported, with no account created.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validation_errors(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "name": "A", "email": "not-an-email", "password": "123" });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .expect("errors must be an array")
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "name", "password"]);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

/// A body that is not JSON is a 400, not a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_malformed_body(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, _) = common::create_regular_user(&pool, "ana@x.com").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "Ana@X.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "user");
}

/// Wrong password and unknown email are indistinguishable.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_failures_are_uniform(pool: PgPool) {
    common::create_regular_user(&pool, "ana@x.com").await;
    let app = common::build_test_app(pool);

    let wrong_password = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "email": "ana@x.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_email = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": "nobody@x.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a["message"], "Invalid email or password");
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_returns_caller(pool: PgPool) {
    let (user, token) = common::create_regular_user(&pool, "ana@x.com").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/users/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "ana@x.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let missing = get(app.clone(), "/api/users/profile").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let invalid = get_auth(app, "/api/users/profile", "not-a-jwt").await;
    assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(invalid).await["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Admin bootstrap
// ---------------------------------------------------------------------------

/// The configured admin is created once and left alone afterwards.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ensure_admin_is_idempotent(pool: PgPool) {
    let admin = AdminBootstrap {
        name: "Root".to_string(),
        email: "Root@X.com".to_string(),
        password: "admin-password".to_string(),
    };

    assert!(ensure_admin(&pool, &admin).await.unwrap());
    assert!(!ensure_admin(&pool, &admin).await.unwrap());

    let stored = UserRepo::find_by_email(&pool, "root@x.com").await.unwrap().unwrap();
    assert_eq!(stored.role, "admin");

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": "root@x.com", "password": "admin-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["role"], "admin");
}
