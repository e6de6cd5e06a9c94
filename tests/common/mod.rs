use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bson::oid::ObjectId;
use http_body_util::BodyExt;
use mongodb::Client;
use serde_json::Value;
use tower::ServiceExt;

use restaurants_api::auth::{generate_jwt, Claims};
use restaurants_api::config::{AppConfig, DatabaseConfig, SecurityConfig, ServerConfig};
use restaurants_api::db::MongoContext;
use restaurants_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build the router against a store client that is never reached: these
/// tests only exercise paths that fail before any database I/O. The driver
/// does not connect until an operation runs, so construction is safe.
pub async fn test_app() -> Router {
    let config = AppConfig {
        database: DatabaseConfig {
            uri: "mongodb://127.0.0.1:27099".to_string(),
            database_name: "restaurants-api-test".to_string(),
        },
        security: SecurityConfig {
            token_secret: TEST_SECRET.to_string(),
            token_expiry_hours: 6,
            bcrypt_cost: 4,
            cors_origin: "http://localhost:3000".to_string(),
        },
        server: ServerConfig { port: 0 },
    };

    let client = Client::with_uri_str(&config.database.uri)
        .await
        .expect("client construction should not require a live server");
    let db = MongoContext::new(client, &config.database.database_name);

    app(AppState {
        db,
        config: Arc::new(config),
    })
}

pub fn bearer_for(user_id: &ObjectId) -> String {
    let claims = Claims::new(user_id, "test@x.com".to_string(), 6);
    let token = generate_jwt(&claims, TEST_SECRET).expect("token generation");
    format!("Bearer {}", token)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request should complete");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };

    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}
