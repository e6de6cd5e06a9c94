mod common;

use anyhow::Result;
use axum::http::StatusCode;
use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use serde_json::json;

use restaurants_api::auth::{generate_jwt, Claims};

#[tokio::test]
async fn signup_rejects_empty_fields() -> Result<()> {
    let app = common::test_app().await;

    let request = common::json_request(
        "POST",
        "/auth/signup",
        json!({ "email": "", "password": "pw1", "name": "A" }),
    );
    let (status, body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Provide email, password and name");
    Ok(())
}

#[tokio::test]
async fn login_rejects_empty_fields() -> Result<()> {
    let app = common::test_app().await;

    let request = common::json_request(
        "POST",
        "/auth/login",
        json!({ "email": "a@x.com", "password": "" }),
    );
    let (status, body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Provide email and password.");
    Ok(())
}

#[tokio::test]
async fn verify_rejects_missing_token() -> Result<()> {
    let app = common::test_app().await;

    let (status, _body) = common::send(app, common::empty_request("GET", "/auth/verify")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn verify_rejects_garbage_token() -> Result<()> {
    let app = common::test_app().await;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/auth/verify")
        .header("authorization", "Bearer not.a.token")
        .body(axum::body::Body::empty())?;
    let (status, _body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn verify_rejects_token_signed_with_other_secret() -> Result<()> {
    let app = common::test_app().await;

    let claims = Claims::new(&ObjectId::new(), "a@x.com".to_string(), 6);
    let token = generate_jwt(&claims, "some-other-secret")?;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/auth/verify")
        .header("authorization", format!("Bearer {}", token))
        .body(axum::body::Body::empty())?;
    let (status, _body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn verify_rejects_expired_token() -> Result<()> {
    let app = common::test_app().await;

    let now = Utc::now();
    let claims = Claims {
        sub: ObjectId::new().to_hex(),
        email: "a@x.com".to_string(),
        exp: (now - Duration::hours(1)).timestamp(),
        iat: (now - Duration::hours(7)).timestamp(),
    };
    let token = generate_jwt(&claims, common::TEST_SECRET)?;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/auth/verify")
        .header("authorization", format!("Bearer {}", token))
        .body(axum::body::Body::empty())?;
    let (status, _body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn verify_echoes_payload_for_valid_token() -> Result<()> {
    let app = common::test_app().await;

    let user_id = ObjectId::new();
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/auth/verify")
        .header("authorization", common::bearer_for(&user_id))
        .body(axum::body::Body::empty())?;
    let (status, body) = common::send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], user_id.to_hex());
    assert_eq!(body["email"], "test@x.com");
    Ok(())
}
