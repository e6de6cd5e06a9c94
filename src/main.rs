use std::sync::Arc;

use mongodb::Client;

use restaurants_api::{app, config::AppConfig, db::MongoContext, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URI, TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    if config.security.token_secret.is_empty() {
        tracing::warn!("TOKEN_SECRET is not set; login and token verification will fail");
    }

    // Connect before serving: reach the store and create indexes up front so
    // a misconfigured database fails the process instead of the first request
    tracing::info!("Connecting to MongoDB at {}...", config.database.uri);
    let client = Client::with_uri_str(&config.database.uri)
        .await
        .unwrap_or_else(|e| panic!("invalid MongoDB URI {}: {}", config.database.uri, e));

    let db = MongoContext::new(client, &config.database.database_name);
    db.ping()
        .await
        .unwrap_or_else(|e| panic!("failed to reach MongoDB: {}", e));
    db.init_indexes()
        .await
        .unwrap_or_else(|e| panic!("failed to create indexes: {}", e));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);

    let state = AppState {
        db,
        config: Arc::new(config),
    };
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Restaurants API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("Shutdown signal received, draining connections");
}
