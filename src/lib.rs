pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use config::AppConfig;
use db::MongoContext;

/// Shared per-request context: the store handle and the configuration the
/// process was started with.
#[derive(Clone)]
pub struct AppState {
    pub db: MongoContext,
    pub config: Arc<AppConfig>,
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(restaurant_routes())
        .merge(user_routes())
        // Unmatched routes get a fixed 404 message
        .fallback(route_not_found)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
}

fn restaurant_routes() -> Router<AppState> {
    use handlers::restaurants;

    Router::new()
        // Collection: public listing, token-gated bulk create
        .route(
            "/api/restaurants",
            get(restaurants::list).post(restaurants::create),
        )
        // Record: public read, owner-gated update/delete
        .route(
            "/api/restaurants/:id",
            get(restaurants::get_one)
                .put(restaurants::update)
                .delete(restaurants::remove),
        )
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route("/user", get(users::get_self))
        .route("/user/restaurants", put(users::add_favorites))
        .route("/user/restaurants/:id", delete(users::remove_favorite))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    match config.security.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!(
                "Invalid ORIGIN value {:?}; falling back to permissive CORS",
                config.security.cors_origin
            );
            CorsLayer::permissive()
        }
    }
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Restaurants API",
        "version": version,
        "endpoints": {
            "auth": "/auth/signup, /auth/login (public), /auth/verify (bearer)",
            "restaurants": "/api/restaurants[/:id] (GET public; POST/PUT/DELETE bearer)",
            "user": "/user, /user/restaurants[/:id] (bearer)",
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match state.db.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}

async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "This route does not exist" })),
    )
}
